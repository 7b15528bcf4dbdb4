use axum::{extract::State, Json};
use serde_json::{json, Value};

use petadoptions_core::adoption::Transaction;

use crate::{handlers::AppError, state::AppState};

/// GET /petadoptionshistory/api/home/transactions - Every archived adoption.
#[axum::debug_handler]
pub async fn list_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let transactions = state.history_repo.list_history().await?;
    tracing::debug!(count = transactions.len(), "History listed");
    Ok(Json(transactions))
}

/// DELETE /petadoptionshistory/api/home/transactions
#[axum::debug_handler]
pub async fn delete_transactions(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let removed = state.history_repo.clear_history().await?;
    tracing::info!(removed, "History cleared");
    Ok(Json(json!({ "success": true })))
}

/// GET /petadoptionshistory/api/home/transactions/count
#[axum::debug_handler]
pub async fn count_transactions(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let count = state.history_repo.count_history().await?;
    Ok(Json(json!({ "count": count })))
}
