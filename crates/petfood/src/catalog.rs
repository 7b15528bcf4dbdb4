//! Food catalog operations over a `FoodRepository`.

use chrono::Utc;
use petadoptions_core::food::validation::{
    validate_create_food, validate_food_id, validate_update_food,
};
use petadoptions_core::food::{
    seed_foods, CreateFoodRequest, Food, FoodError, FoodFilters, FoodQuery, UpdateFoodRequest,
};
use petadoptions_core::storage::{FoodRepository, RepositoryError};

/// Active foods matching the query.
pub async fn list_foods(
    repo: &dyn FoodRepository,
    query: &FoodQuery,
) -> anyhow::Result<Vec<Food>> {
    let filters = query.filters()?;
    let mut foods = repo.list_foods(&filters).await?;
    foods.sort_by(|a, b| a.name.cmp(&b.name));

    tracing::debug!(?filters, count = foods.len(), "Foods listed");
    Ok(foods)
}

/// An active food. Discontinued foods are not found.
pub async fn get_food(repo: &dyn FoodRepository, food_id: &str) -> anyhow::Result<Food> {
    validate_food_id(food_id)?;
    match repo.get_food(food_id).await? {
        Some(food) if food.is_active => Ok(food),
        _ => Err(FoodError::FoodNotFound(food_id.to_string()).into()),
    }
}

/// Validates and stores a new food. A caller-chosen id must not belong to
/// an active food.
pub async fn create_food(
    repo: &dyn FoodRepository,
    request: CreateFoodRequest,
) -> anyhow::Result<Food> {
    validate_create_food(&request)?;

    if let Some(id) = &request.id {
        if repo.get_food(id).await?.is_some_and(|f| f.is_active) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Food",
                id: id.clone(),
            }
            .into());
        }
    }

    let food = Food::new(request, Utc::now());
    repo.put_food(&food).await?;

    tracing::info!(food_id = %food.id, name = %food.name, "Food created");
    Ok(food)
}

pub async fn update_food(
    repo: &dyn FoodRepository,
    food_id: &str,
    update: UpdateFoodRequest,
) -> anyhow::Result<Food> {
    validate_update_food(&update)?;
    let mut food = get_food(repo, food_id).await?;
    food.apply_update(update, Utc::now());
    repo.put_food(&food).await?;

    tracing::info!(food_id, "Food updated");
    Ok(food)
}

/// Soft delete: the food stays in the table, inactive and discontinued.
pub async fn delete_food(repo: &dyn FoodRepository, food_id: &str) -> anyhow::Result<()> {
    let mut food = get_food(repo, food_id).await?;
    food.discontinue(Utc::now());
    repo.put_food(&food).await?;

    tracing::info!(food_id, "Food discontinued");
    Ok(())
}

/// Writes the bundled sample foods. Returns how many were written.
pub async fn seed(repo: &dyn FoodRepository) -> anyhow::Result<usize> {
    let now = Utc::now();
    let requests = seed_foods()?;
    for request in requests.iter().cloned() {
        repo.put_food(&Food::new(request, now)).await?;
    }

    tracing::info!(foods = requests.len(), "Sample foods seeded");
    Ok(requests.len())
}

/// Discontinues every active food. Returns how many were discontinued.
pub async fn cleanup(repo: &dyn FoodRepository) -> anyhow::Result<usize> {
    let now = Utc::now();
    let foods = repo.list_foods(&FoodFilters::default()).await?;
    for mut food in foods.iter().cloned() {
        food.discontinue(now);
        repo.put_food(&food).await?;
    }

    tracing::info!(foods = foods.len(), "Foods cleaned up");
    Ok(foods.len())
}
