use axum::{
    extract::{Query, State},
    Json,
};
use futures_util::future::join_all;

use petadoptions_aws::ImageUrlResolver;
use petadoptions_core::pet::{pet_image_key, Pet, PetSearchQuery, PetSearchResult};

use crate::{handlers::AppError, state::AppState};

/// GET /api/search - Pets matching every given filter.
///
/// Query parameters: `pettype`, `petcolor`, `petid`. Empty values are ignored
/// and no filter at all returns every pet.
#[axum::debug_handler]
pub async fn search_pets(
    State(state): State<AppState>,
    Query(query): Query<PetSearchQuery>,
) -> Result<Json<Vec<PetSearchResult>>, AppError> {
    let query = query.normalized();
    let pets = state.pet_repo.search(&query).await?;

    let results = join_all(
        pets.into_iter()
            .map(|pet| with_image_url(state.images.as_ref(), pet)),
    )
    .await;

    tracing::debug!(filters = ?query.filters(), count = results.len(), "Pets found");
    Ok(Json(results))
}

/// A failed URL leaves `peturl` empty rather than failing the search.
async fn with_image_url(images: &dyn ImageUrlResolver, pet: Pet) -> PetSearchResult {
    let key = pet_image_key(&pet);

    let peturl = match images.image_url(&key).await {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(
                petid = %pet.petid,
                key = %key,
                error = %e,
                "Failed to build pet image URL"
            );
            String::new()
        }
    };

    PetSearchResult::from_pet(pet, peturl)
}
