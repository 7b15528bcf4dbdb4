//! DynamoDB storage backend for the pets, pet foods and carts tables.
//!
//! Scans are paginated and every SDK call is retried on throttling.

mod conversions;
mod error;
mod food_conversions;
mod food_repository;
mod repository;

pub use conversions::{item_to_pet, pet_key, pet_to_item};
pub use food_conversions::{cart_to_item, food_to_item, item_to_cart, item_to_food};
pub use food_repository::{DynamoDbCartRepository, DynamoDbFoodRepository};
pub use repository::DynamoDbPetRepository;
