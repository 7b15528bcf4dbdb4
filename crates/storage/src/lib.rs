//! Storage backend implementations.
//!
//! This crate provides concrete implementations of the repository traits
//! defined in `petadoptions_core::storage`. Backends are selected via feature
//! flags and can be combined: a service may read pets from DynamoDB and
//! write transactions to Postgres.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): everything in process memory, for tests and local runs
//! - `dynamodb`: pets, pet foods and carts tables on DynamoDB using `aws-sdk-dynamodb`
//! - `postgres`: transactions and history tables on Postgres using `sqlx`
//!
//! # Examples
//!
//! ```bash
//! cargo build -p petadoptions_storage --features dynamodb,postgres
//! ```

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "dynamodb")]
pub use dynamodb::{DynamoDbCartRepository, DynamoDbFoodRepository, DynamoDbPetRepository};

#[cfg(feature = "postgres")]
pub use postgres::PostgresRepository;
