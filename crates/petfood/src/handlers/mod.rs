pub mod admin;
pub mod cart;
pub mod error;
pub mod foods;
pub mod health;

pub use error::AppError;
