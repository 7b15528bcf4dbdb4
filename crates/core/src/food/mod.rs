//! Pet food catalog, carts and checkout pricing.
//!
//! Prices are `Decimal`. Carts hold the price seen when an item was added,
//! while checkout charges the current price.

mod cart;
mod checkout;
mod error;
mod seed;
mod types;
pub mod validation;

pub use cart::{AddCartItemRequest, Cart, CartItem, CartLine, CartView, UpdateCartItemRequest};
pub use checkout::{
    generate_order_id, price_order, Address, CheckoutRequest, CheckoutResponse, OrderItem,
    OrderStatus, PaymentMethod, DELIVERY_DAYS, FREE_SHIPPING_THRESHOLD, SHIPPING_FEE, TAX_RATE,
};
pub use error::FoodError;
pub use seed::{seed_foods, SEED_FOODS_JSON};
pub use types::{
    generate_food_id, AvailabilityStatus, CreateFoodRequest, Food, FoodFilters, FoodList,
    FoodQuery, FoodType, FoodView, PetType, UpdateFoodRequest,
};
