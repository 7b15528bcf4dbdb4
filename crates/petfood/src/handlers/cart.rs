use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use petadoptions_core::food::{
    AddCartItemRequest, CartLine, CartView, CheckoutRequest, CheckoutResponse,
    UpdateCartItemRequest,
};

use crate::{carts, handlers::AppError, state::AppState};

/// GET /api/cart/{user_id}
#[axum::debug_handler]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<CartView>, AppError> {
    Ok(Json(carts::get_cart(&state, &user_id).await?))
}

/// DELETE /api/cart/{user_id}
#[axum::debug_handler]
pub async fn delete_cart(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, AppError> {
    carts::delete_cart(&state, &user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/cart/{user_id}/items
#[axum::debug_handler]
pub async fn add_item(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<AddCartItemRequest>,
) -> Result<(StatusCode, Json<CartLine>), AppError> {
    let line = carts::add_item(&state, &user_id, request).await?;
    Ok((StatusCode::CREATED, Json(line)))
}

/// PUT /api/cart/{user_id}/items/{food_id}
#[axum::debug_handler]
pub async fn update_item(
    State(state): State<AppState>,
    Path((user_id, food_id)): Path<(String, String)>,
    Json(request): Json<UpdateCartItemRequest>,
) -> Result<Json<CartLine>, AppError> {
    Ok(Json(
        carts::update_item(&state, &user_id, &food_id, request).await?,
    ))
}

/// DELETE /api/cart/{user_id}/items/{food_id}
#[axum::debug_handler]
pub async fn remove_item(
    State(state): State<AppState>,
    Path((user_id, food_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    carts::remove_item(&state, &user_id, &food_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/cart/{user_id}/clear
#[axum::debug_handler]
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, AppError> {
    carts::clear_cart(&state, &user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/cart/{user_id}/checkout
#[axum::debug_handler]
pub async fn checkout(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, AppError> {
    Ok(Json(carts::checkout(&state, &user_id, request).await?))
}
