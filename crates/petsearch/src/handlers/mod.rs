pub mod error;
pub mod health;
pub mod search;

pub use error::AppError;
