use axum::{extract::State, http::StatusCode};

use crate::{handlers::AppError, seeding::seed, state::AppState};

/// POST /api/home/cleanupadoptions - Reset pets and archive every transaction.
///
/// Re-seeding is best effort.
#[axum::debug_handler]
pub async fn cleanup_adoptions(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    if let Err(e) = seed(&state).await {
        tracing::error!(error = %e, "Re-seeding failed during cleanup");
    }

    let archived = state.transaction_repo.archive_transactions().await?;

    tracing::info!(archived, "Adoptions cleaned up");
    Ok(StatusCode::OK)
}

/// POST /api/home/triggerseeding - Load the seed pets and create the SQL tables.
#[axum::debug_handler]
pub async fn trigger_seeding(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    seed(&state).await?;
    Ok(StatusCode::OK)
}
