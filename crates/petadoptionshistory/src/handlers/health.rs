use axum::extract::State;

use crate::{handlers::AppError, state::AppState};

/// GET /health/status - Liveness check that also reaches the database.
pub async fn health_status(State(state): State<AppState>) -> Result<&'static str, AppError> {
    state.history_repo.count_history().await?;
    Ok("Alive")
}
