pub mod adoptions;
pub mod error;
pub mod health;

pub use error::AppError;
