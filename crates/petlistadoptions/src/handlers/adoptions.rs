use axum::{extract::State, Json};
use futures_util::future::join_all;

use petadoptions_core::adoption::{adoptions_for, Adoption, ADOPTION_LIST_LIMIT};

use crate::{handlers::AppError, state::AppState};

/// GET /api/adoptionlist/ - Latest adoptions with their pet details.
///
/// Pets are looked up concurrently. A failed lookup is logged and its
/// transaction left out.
#[axum::debug_handler]
pub async fn list_adoptions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Adoption>>, AppError> {
    let transactions = state
        .transaction_repo
        .latest_transactions(ADOPTION_LIST_LIMIT)
        .await?;

    let pets = state.pets.as_ref();
    let lookups = transactions.iter().map(|transaction| async move {
        match pets.pets_by_id(&transaction.pet_id).await {
            Ok(found) => adoptions_for(transaction, found),
            Err(e) => {
                tracing::error!(
                    pet_id = %transaction.pet_id,
                    transaction_id = %transaction.transaction_id,
                    error = %e,
                    "Failed to look up adopted pet"
                );
                Vec::new()
            }
        }
    });

    let adoptions: Vec<Adoption> = join_all(lookups).await.into_iter().flatten().collect();

    tracing::debug!(
        transactions = transactions.len(),
        adoptions = adoptions.len(),
        "Adoptions listed"
    );
    Ok(Json(adoptions))
}
