//! Pure adoption rules.

use crate::pet::PetSearchResult;

use super::{Adoption, AdoptionError, AdoptionRequest, CompleteAdoptionQuery, Transaction};

/// Pet type that fails while the error mode flag is on.
pub const ERROR_MODE_PET_TYPE: &str = "bunny";

/// Default number of transactions listed by the adoption list.
pub const ADOPTION_LIST_LIMIT: i64 = 25;

/// Validates the complete-adoption query. Pet id and pet type are required.
pub fn validate_adoption_request(
    query: CompleteAdoptionQuery,
) -> Result<AdoptionRequest, AdoptionError> {
    match (query.pet_id, query.pet_type) {
        (Some(pet_id), Some(pet_type)) => Ok(AdoptionRequest {
            pet_id,
            pet_type,
            user_id: query.user_id,
        }),
        _ => Err(AdoptionError::MissingParameters),
    }
}

/// Whether the error mode flag should fail an adoption of `pet_type`.
///
/// The flag is the raw Parameter Store value; only `"true"` enables it.
pub fn error_mode_triggered(flag: Option<&str>, pet_type: &str) -> bool {
    flag.is_some_and(|f| f.trim().eq_ignore_ascii_case("true")) && pet_type == ERROR_MODE_PET_TYPE
}

/// One adoption per pet found for a transaction.
///
/// A lookup that found nothing yields no rows.
pub fn adoptions_for(transaction: &Transaction, pets: Vec<PetSearchResult>) -> Vec<Adoption> {
    pets.into_iter()
        .map(|pet| Adoption::from_parts(transaction, pet))
        .collect()
}
