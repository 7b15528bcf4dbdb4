//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use petadoptions_core::adoption::Transaction;
use petadoptions_core::food::{Cart, Food, FoodFilters};
use petadoptions_core::pet::{Availability, Pet, PetSearchQuery};
use petadoptions_core::storage::{
    CartRepository, FoodRepository, HistoryRepository, PetRepository, RepositoryError, Result,
    TransactionRepository,
};

/// Names returned by `create_table`.
pub const FOODS_TABLE: &str = "foods";
pub const CARTS_TABLE: &str = "carts";

/// In-memory storage backend.
///
/// Pets are keyed by `(pettype, petid)` like the DynamoDB table. Transactions
/// keep insertion order, which stands in for the serial id column. Foods
/// and carts are keyed by food id and user id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    pets: Arc<RwLock<BTreeMap<(String, String), Pet>>>,
    transactions: Arc<RwLock<Vec<Transaction>>>,
    history: Arc<RwLock<Vec<Transaction>>>,
    foods: Arc<RwLock<BTreeMap<String, Food>>>,
    carts: Arc<RwLock<BTreeMap<String, Cart>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with pets.
    pub fn with_pets(pets: impl IntoIterator<Item = Pet>) -> Self {
        let pets = pets
            .into_iter()
            .map(|pet| ((pet.pettype.clone(), pet.petid.clone()), pet))
            .collect();
        Self {
            pets: Arc::new(RwLock::new(pets)),
            ..Self::default()
        }
    }

    /// Creates a repository pre-populated with foods.
    pub fn with_foods(foods: impl IntoIterator<Item = Food>) -> Self {
        let foods = foods.into_iter().map(|f| (f.id.clone(), f)).collect();
        Self {
            foods: Arc::new(RwLock::new(foods)),
            ..Self::default()
        }
    }
}

#[async_trait]
impl PetRepository for InMemoryRepository {
    async fn search(&self, query: &PetSearchQuery) -> Result<Vec<Pet>> {
        let pets = self.pets.read().await;
        Ok(pets.values().filter(|p| query.matches(p)).cloned().collect())
    }

    async fn update_availability(
        &self,
        pettype: &str,
        petid: &str,
        availability: Availability,
    ) -> Result<()> {
        let mut pets = self.pets.write().await;
        match pets.get_mut(&(pettype.to_string(), petid.to_string())) {
            Some(pet) => {
                pet.availability = availability.to_string();
                Ok(())
            }
            None => Err(RepositoryError::NotFound {
                entity_type: "Pet",
                id: format!("{pettype}/{petid}"),
            }),
        }
    }

    async fn put_pets(&self, new_pets: &[Pet]) -> Result<()> {
        let mut pets = self.pets.write().await;
        for pet in new_pets {
            if pet.pettype.is_empty() || pet.petid.is_empty() {
                return Err(RepositoryError::InvalidData(
                    "pet requires pettype and petid".to_string(),
                ));
            }
            pets.insert((pet.pettype.clone(), pet.petid.clone()), pet.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionRepository for InMemoryRepository {
    async fn create_tables(&self) -> Result<()> {
        Ok(())
    }

    async fn create_transaction(&self, transaction: &Transaction) -> Result<()> {
        let mut transactions = self.transactions.write().await;
        if transactions
            .iter()
            .any(|t| t.transaction_id == transaction.transaction_id)
        {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Transaction",
                id: transaction.transaction_id.to_string(),
            });
        }
        transactions.push(transaction.clone());
        Ok(())
    }

    async fn latest_transactions(&self, limit: i64) -> Result<Vec<Transaction>> {
        let transactions = self.transactions.read().await;
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(transactions.iter().rev().take(limit).cloned().collect())
    }

    async fn archive_transactions(&self) -> Result<u64> {
        let mut transactions = self.transactions.write().await;
        let mut history = self.history.write().await;
        let archived = transactions.len() as u64;
        history.append(&mut transactions);
        Ok(archived)
    }
}

#[async_trait]
impl HistoryRepository for InMemoryRepository {
    async fn list_history(&self) -> Result<Vec<Transaction>> {
        Ok(self.history.read().await.clone())
    }

    async fn clear_history(&self) -> Result<u64> {
        let mut history = self.history.write().await;
        let removed = history.len() as u64;
        history.clear();
        Ok(removed)
    }

    async fn count_history(&self) -> Result<i64> {
        Ok(self.history.read().await.len() as i64)
    }

    async fn record_history(&self, transaction: &Transaction) -> Result<()> {
        self.history.write().await.push(transaction.clone());
        Ok(())
    }
}

#[async_trait]
impl FoodRepository for InMemoryRepository {
    async fn create_table(&self) -> Result<String> {
        Ok(FOODS_TABLE.to_string())
    }

    async fn list_foods(&self, filters: &FoodFilters) -> Result<Vec<Food>> {
        let foods = self.foods.read().await;
        Ok(foods.values().filter(|f| filters.matches(f)).cloned().collect())
    }

    async fn get_food(&self, food_id: &str) -> Result<Option<Food>> {
        Ok(self.foods.read().await.get(food_id).cloned())
    }

    async fn put_food(&self, food: &Food) -> Result<()> {
        if food.id.is_empty() {
            return Err(RepositoryError::InvalidData("food requires an id".to_string()));
        }
        self.foods
            .write()
            .await
            .insert(food.id.clone(), food.clone());
        Ok(())
    }
}

#[async_trait]
impl CartRepository for InMemoryRepository {
    async fn create_table(&self) -> Result<String> {
        Ok(CARTS_TABLE.to_string())
    }

    async fn get_cart(&self, user_id: &str) -> Result<Option<Cart>> {
        Ok(self.carts.read().await.get(user_id).cloned())
    }

    async fn put_cart(&self, cart: &Cart) -> Result<()> {
        self.carts
            .write()
            .await
            .insert(cart.user_id.clone(), cart.clone());
        Ok(())
    }

    async fn delete_cart(&self, user_id: &str) -> Result<bool> {
        Ok(self.carts.write().await.remove(user_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use petadoptions_core::food::{seed_foods, PetType};

    fn pet(pettype: &str, petid: &str, petcolor: &str) -> Pet {
        Pet {
            petid: petid.to_string(),
            pettype: pettype.to_string(),
            petcolor: petcolor.to_string(),
            availability: "yes".to_string(),
            cuteness_rate: "5".to_string(),
            price: "100".to_string(),
            image: format!("{pettype}{petid}"),
        }
    }

    fn seeded() -> InMemoryRepository {
        InMemoryRepository::with_pets([
            pet("puppy", "001", "brown"),
            pet("puppy", "002", "white"),
            pet("kitten", "003", "black"),
            pet("bunny", "004", "white"),
        ])
    }

    #[tokio::test]
    async fn test_search_without_filters_returns_all() {
        let repo = seeded();
        let pets = repo.search(&PetSearchQuery::default()).await.unwrap();
        assert_eq!(pets.len(), 4);
    }

    #[tokio::test]
    async fn test_search_by_type_and_color() {
        let repo = seeded();
        let query = PetSearchQuery::by_type("puppy").with_color("white");

        let pets = repo.search(&query).await.unwrap();

        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].petid, "002");
    }

    #[tokio::test]
    async fn test_search_by_id() {
        let repo = seeded();
        let pets = repo.search(&PetSearchQuery::by_id("003")).await.unwrap();
        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].pettype, "kitten");
    }

    #[tokio::test]
    async fn test_update_availability() {
        let repo = seeded();
        repo.update_availability("kitten", "003", Availability::No)
            .await
            .unwrap();

        let pets = repo.search(&PetSearchQuery::by_id("003")).await.unwrap();
        assert_eq!(pets[0].availability, "no");
    }

    #[tokio::test]
    async fn test_update_availability_unknown_pet() {
        let repo = seeded();
        let result = repo
            .update_availability("kitten", "999", Availability::No)
            .await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_put_pets_replaces_existing() {
        let repo = seeded();
        let mut updated = pet("puppy", "001", "golden");
        updated.availability = "no".to_string();

        repo.put_pets(&[updated, pet("puppy", "010", "black")])
            .await
            .unwrap();

        let puppies = repo.search(&PetSearchQuery::by_type("puppy")).await.unwrap();
        assert_eq!(puppies.len(), 3);
        let first = puppies.iter().find(|p| p.petid == "001").unwrap();
        assert_eq!(first.petcolor, "golden");
    }

    #[tokio::test]
    async fn test_put_pets_rejects_missing_key() {
        let repo = InMemoryRepository::new();
        let result = repo.put_pets(&[pet("", "001", "brown")]).await;
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_latest_transactions_newest_first_with_limit() {
        let repo = InMemoryRepository::new();
        for i in 0..30 {
            repo.create_transaction(&Transaction::new(format!("{i:03}"), None))
                .await
                .unwrap();
        }

        let latest = repo.latest_transactions(25).await.unwrap();

        assert_eq!(latest.len(), 25);
        assert_eq!(latest[0].pet_id, "029");
        assert_eq!(latest[24].pet_id, "005");
    }

    #[tokio::test]
    async fn test_duplicate_transaction_rejected() {
        let repo = InMemoryRepository::new();
        let transaction = Transaction::new("001", None);
        repo.create_transaction(&transaction).await.unwrap();

        let result = repo.create_transaction(&transaction).await;

        assert!(matches!(result, Err(RepositoryError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_archive_moves_transactions_to_history() {
        let repo = InMemoryRepository::new();
        repo.create_transaction(&Transaction::new("001", None))
            .await
            .unwrap();
        repo.create_transaction(&Transaction::new("002", None))
            .await
            .unwrap();

        let archived = repo.archive_transactions().await.unwrap();

        assert_eq!(archived, 2);
        assert!(repo.latest_transactions(25).await.unwrap().is_empty());
        assert_eq!(repo.count_history().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_history_record_list_and_clear() {
        let repo = InMemoryRepository::new();
        repo.record_history(&Transaction::new("007", Some("user".to_string())))
            .await
            .unwrap();

        let history = repo.list_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].user_id.as_deref(), Some("user"));

        assert_eq!(repo.clear_history().await.unwrap(), 1);
        assert_eq!(repo.count_history().await.unwrap(), 0);
    }

    fn seeded_foods() -> InMemoryRepository {
        let now = Utc::now();
        InMemoryRepository::with_foods(
            seed_foods()
                .unwrap()
                .into_iter()
                .map(|request| Food::new(request, now)),
        )
    }

    #[tokio::test]
    async fn test_list_foods_by_pet_type() {
        let repo = seeded_foods();
        let filters = FoodFilters {
            pet_type: Some(PetType::Bunny),
            ..Default::default()
        };

        let foods = repo.list_foods(&filters).await.unwrap();

        assert_eq!(foods.len(), 3);
        assert!(foods.iter().all(|f| f.pet_type == PetType::Bunny));
    }

    #[tokio::test]
    async fn test_list_foods_hides_discontinued() {
        let repo = seeded_foods();
        let mut food = repo.get_food("F00000001").await.unwrap().unwrap();
        food.discontinue(Utc::now());
        repo.put_food(&food).await.unwrap();

        let foods = repo.list_foods(&FoodFilters::default()).await.unwrap();

        assert_eq!(foods.len(), 8);
        assert!(repo.get_food("F00000001").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_cart_put_get_delete() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_cart("u1").await.unwrap().is_none());

        repo.put_cart(&Cart::new("u1", Utc::now())).await.unwrap();
        assert_eq!(repo.get_cart("u1").await.unwrap().unwrap().user_id, "u1");

        assert!(repo.delete_cart("u1").await.unwrap());
        assert!(!repo.delete_cart("u1").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_table_names() {
        let repo = InMemoryRepository::new();
        assert_eq!(FoodRepository::create_table(&repo).await.unwrap(), "foods");
        assert_eq!(CartRepository::create_table(&repo).await.unwrap(), "carts");
    }
}
