pub mod adoption;
pub mod error;
pub mod health;
pub mod seeding;

pub use error::AppError;
