//! Pet details lookup.

use async_trait::async_trait;
use petadoptions_client::{ClientError, PetAdoptionsClient};
use petadoptions_core::pet::{PetSearchQuery, PetSearchResult};

/// Finds the pets behind adoption transactions.
#[async_trait]
pub trait PetLookup: Send + Sync {
    async fn pets_by_id(&self, petid: &str) -> Result<Vec<PetSearchResult>, ClientError>;
}

/// Looks pets up through the pet search service.
#[async_trait]
impl PetLookup for PetAdoptionsClient {
    async fn pets_by_id(&self, petid: &str) -> Result<Vec<PetSearchResult>, ClientError> {
        self.search(&PetSearchQuery::by_id(petid)).await
    }
}
