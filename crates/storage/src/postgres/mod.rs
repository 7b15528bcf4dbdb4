//! Postgres storage backend for the transactions and history tables.

mod conversions;
mod error;
mod repository;
mod schema;

pub use conversions::transaction_from_columns;
pub use error::map_sqlx_error;
pub use repository::PostgresRepository;
