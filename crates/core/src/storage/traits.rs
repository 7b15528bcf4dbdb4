use async_trait::async_trait;

use crate::adoption::Transaction;
use crate::food::{Cart, Food, FoodFilters};
use crate::pet::{Availability, Pet, PetSearchQuery};

use super::Result;

/// Repository for the pets table.
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Returns every pet matching all filters of the query.
    async fn search(&self, query: &PetSearchQuery) -> Result<Vec<Pet>>;

    /// Sets the availability of an existing pet.
    ///
    /// Fails with `NotFound` when the pet does not exist.
    async fn update_availability(
        &self,
        pettype: &str,
        petid: &str,
        availability: Availability,
    ) -> Result<()>;

    /// Inserts or replaces pets.
    async fn put_pets(&self, pets: &[Pet]) -> Result<()>;
}

/// Repository for the transactions table.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Creates the transactions and history tables if they are missing.
    async fn create_tables(&self) -> Result<()>;

    /// Records a completed adoption.
    async fn create_transaction(&self, transaction: &Transaction) -> Result<()>;

    /// Most recent transactions, newest first.
    async fn latest_transactions(&self, limit: i64) -> Result<Vec<Transaction>>;

    /// Copies every transaction to the history table, then clears the table.
    ///
    /// Returns the number of archived rows.
    async fn archive_transactions(&self) -> Result<u64>;
}

/// Repository for the transactions history table.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn list_history(&self) -> Result<Vec<Transaction>>;

    /// Deletes all history rows, returning how many were removed.
    async fn clear_history(&self) -> Result<u64>;

    async fn count_history(&self) -> Result<i64>;

    /// Appends one adoption to the history.
    async fn record_history(&self, transaction: &Transaction) -> Result<()>;
}

/// Repository for the pet foods table.
#[async_trait]
pub trait FoodRepository: Send + Sync {
    /// Creates the table if it is missing and returns its name.
    async fn create_table(&self) -> Result<String>;

    /// Active foods matching the filters.
    async fn list_foods(&self, filters: &FoodFilters) -> Result<Vec<Food>>;

    /// Returns the food whether or not it is active.
    async fn get_food(&self, food_id: &str) -> Result<Option<Food>>;

    /// Inserts or replaces a food.
    async fn put_food(&self, food: &Food) -> Result<()>;
}

/// Repository for the carts table, keyed by user id.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Creates the table if it is missing and returns its name.
    async fn create_table(&self) -> Result<String>;

    async fn get_cart(&self, user_id: &str) -> Result<Option<Cart>>;

    /// Inserts or replaces a cart.
    async fn put_cart(&self, cart: &Cart) -> Result<()>;

    /// Removes a cart. Returns whether it existed.
    async fn delete_cart(&self, user_id: &str) -> Result<bool>;
}
