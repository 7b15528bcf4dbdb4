use thiserror::Error;

/// Errors raised by the food catalog and the carts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FoodError {
    #[error("Food not found: {0}")]
    FoodNotFound(String),
    #[error("Cart not found for user: {0}")]
    CartNotFound(String),
    #[error("Item {food_id} not found in cart of user {user_id}")]
    CartItemNotFound { user_id: String, food_id: String },
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Food is not available: {0}")]
    ProductUnavailable(String),
    #[error("Insufficient stock for {food_id}: requested {requested}, available {available}")]
    InsufficientStock {
        food_id: String,
        requested: u32,
        available: u32,
    },
    #[error("Cart is empty")]
    EmptyCart,
}

impl FoodError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            FoodError::FoodNotFound(_)
            | FoodError::CartNotFound(_)
            | FoodError::CartItemNotFound { .. } => 404,
            FoodError::Validation(_) | FoodError::EmptyCart => 400,
            FoodError::ProductUnavailable(_) | FoodError::InsufficientStock { .. } => 409,
        }
    }
}
