use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{catalog, handlers::AppError, state::AppState};

#[derive(Debug, Serialize)]
pub struct SetupTablesResponse {
    pub message: String,
    pub tables_created: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: String,
    pub foods_created: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub message: String,
    pub foods_deleted: usize,
    pub timestamp: DateTime<Utc>,
}

/// POST /api/admin/setup-tables - Create the foods and carts tables if missing.
#[axum::debug_handler]
pub async fn setup_tables(
    State(state): State<AppState>,
) -> Result<Json<SetupTablesResponse>, AppError> {
    let tables_created = vec![
        state.foods.create_table().await?,
        state.carts.create_table().await?,
    ];

    Ok(Json(SetupTablesResponse {
        message: "Tables are ready".to_string(),
        tables_created,
        timestamp: Utc::now(),
    }))
}

/// POST /api/admin/seed - Write the sample foods.
#[axum::debug_handler]
pub async fn seed(State(state): State<AppState>) -> Result<Json<SeedResponse>, AppError> {
    let foods_created = catalog::seed(state.foods.as_ref()).await?;

    Ok(Json(SeedResponse {
        message: "Sample foods seeded".to_string(),
        foods_created,
        timestamp: Utc::now(),
    }))
}

/// POST /api/admin/cleanup - Discontinue every food.
#[axum::debug_handler]
pub async fn cleanup(State(state): State<AppState>) -> Result<Json<CleanupResponse>, AppError> {
    let foods_deleted = catalog::cleanup(state.foods.as_ref()).await?;

    Ok(Json(CleanupResponse {
        message: "Foods cleaned up".to_string(),
        foods_deleted,
        timestamp: Utc::now(),
    }))
}
