use axum::extract::{Query, State};

use petadoptions_aws::ParameterSource;
use petadoptions_core::adoption::{
    error_mode_triggered, validate_adoption_request, AdoptionError, AdoptionHistoryMessage,
    CompleteAdoptionQuery, StatusUpdate, Transaction,
};
use petadoptions_core::config::parameters;

use crate::{handlers::AppError, state::AppState};

/// POST /api/completeadoption - Record an adoption and mark the pet adopted.
///
/// The transaction row is written first. The history message is best effort;
/// a status updater failure is reported but the row stays.
#[axum::debug_handler]
pub async fn complete_adoption(
    State(state): State<AppState>,
    Query(query): Query<CompleteAdoptionQuery>,
) -> Result<&'static str, AppError> {
    let request = validate_adoption_request(query)?;

    let flag = error_mode_flag(state.parameters.as_ref()).await;
    if error_mode_triggered(flag.as_deref(), &request.pet_type) {
        return Err(AdoptionError::ErrorModeTriggered.into());
    }

    let transaction = Transaction::new(&request.pet_id, request.user_id.clone());
    state.transaction_repo.create_transaction(&transaction).await?;

    if let Some(queue) = &state.history_queue {
        let message = AdoptionHistoryMessage::new(&transaction, &request.pet_type);
        match queue.publish(&message).await {
            Ok(message_id) => {
                tracing::debug!(message_id = ?message_id, "Adoption history queued");
            }
            Err(e) => {
                tracing::warn!(
                    transaction_id = %transaction.transaction_id,
                    error = %e,
                    "Failed to queue adoption history"
                );
            }
        }
    }

    state
        .status_updater
        .update_status(&StatusUpdate::adopted(&request.pet_id, &request.pet_type))
        .await?;

    tracing::info!(
        pet_id = %request.pet_id,
        pet_type = %request.pet_type,
        transaction_id = %transaction.transaction_id,
        "Adoption completed"
    );
    Ok("Success")
}

/// Raw error mode flag. A failed lookup counts as off.
async fn error_mode_flag(source: &dyn ParameterSource) -> Option<String> {
    match source.get_parameter(parameters::ERROR_MODE).await {
        Ok(flag) => flag,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read error mode, assuming off");
            None
        }
    }
}
