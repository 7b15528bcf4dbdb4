mod error;
mod operations;
mod types;

pub use error::AdoptionError;
pub use operations::{
    adoptions_for, error_mode_triggered, validate_adoption_request, ADOPTION_LIST_LIMIT,
    ERROR_MODE_PET_TYPE,
};
pub use types::{
    Adoption, AdoptionHistoryMessage, AdoptionRequest, CompleteAdoptionQuery, StatusUpdate,
    Transaction,
};
