//! The HTTP services as seen from the Lambdas.

use async_trait::async_trait;
use petadoptions_client::{ClientError, PetAdoptionsClient};
use petadoptions_core::adoption::Adoption;
use petadoptions_core::pet::{PetSearchQuery, PetSearchResult};

#[async_trait]
pub trait PetAdoptionsApi: Send + Sync {
    async fn search(&self, query: &PetSearchQuery) -> Result<Vec<PetSearchResult>, ClientError>;

    async fn adoption_list(&self) -> Result<Vec<Adoption>, ClientError>;

    async fn cleanup_adoptions(&self) -> Result<(), ClientError>;
}

#[async_trait]
impl PetAdoptionsApi for PetAdoptionsClient {
    async fn search(&self, query: &PetSearchQuery) -> Result<Vec<PetSearchResult>, ClientError> {
        PetAdoptionsClient::search(self, query).await
    }

    async fn adoption_list(&self) -> Result<Vec<Adoption>, ClientError> {
        PetAdoptionsClient::adoption_list(self).await
    }

    async fn cleanup_adoptions(&self) -> Result<(), ClientError> {
        PetAdoptionsClient::cleanup_adoptions(self).await
    }
}
