use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use petadoptions_core::food::{
    CreateFoodRequest, FoodList, FoodQuery, FoodView, UpdateFoodRequest,
};

use crate::{catalog, handlers::AppError, state::AppState};

/// GET /api/foods - Active foods, sorted by name.
///
/// Query parameters: `pet_type`, `food_type`, `availability_status`,
/// `min_price`, `max_price`, `search`, `in_stock_only`.
#[axum::debug_handler]
pub async fn list_foods(
    State(state): State<AppState>,
    Query(query): Query<FoodQuery>,
) -> Result<Json<FoodList>, AppError> {
    let foods: Vec<FoodView> = catalog::list_foods(state.foods.as_ref(), &query)
        .await?
        .into_iter()
        .map(|food| FoodView::new(food, &state.assets_cdn_url))
        .collect();

    Ok(Json(FoodList {
        total_count: foods.len(),
        foods,
    }))
}

/// GET /api/foods/{food_id}
#[axum::debug_handler]
pub async fn get_food(
    State(state): State<AppState>,
    Path(food_id): Path<String>,
) -> Result<Json<FoodView>, AppError> {
    let food = catalog::get_food(state.foods.as_ref(), &food_id).await?;
    Ok(Json(FoodView::new(food, &state.assets_cdn_url)))
}

/// POST /api/foods
#[axum::debug_handler]
pub async fn create_food(
    State(state): State<AppState>,
    Json(request): Json<CreateFoodRequest>,
) -> Result<(StatusCode, Json<FoodView>), AppError> {
    let food = catalog::create_food(state.foods.as_ref(), request).await?;
    Ok((
        StatusCode::CREATED,
        Json(FoodView::new(food, &state.assets_cdn_url)),
    ))
}

/// PUT /api/foods/{food_id}
#[axum::debug_handler]
pub async fn update_food(
    State(state): State<AppState>,
    Path(food_id): Path<String>,
    Json(update): Json<UpdateFoodRequest>,
) -> Result<Json<FoodView>, AppError> {
    let food = catalog::update_food(state.foods.as_ref(), &food_id, update).await?;
    Ok(Json(FoodView::new(food, &state.assets_cdn_url)))
}

/// DELETE /api/foods/{food_id} - Discontinue a food.
#[axum::debug_handler]
pub async fn delete_food(
    State(state): State<AppState>,
    Path(food_id): Path<String>,
) -> Result<StatusCode, AppError> {
    catalog::delete_food(state.foods.as_ref(), &food_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
