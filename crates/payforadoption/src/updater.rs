//! Pet status updates after an adoption.

use std::sync::Arc;

use async_trait::async_trait;
use petadoptions_client::PetAdoptionsClient;
use petadoptions_core::adoption::{AdoptionError, StatusUpdate};
use petadoptions_core::storage::PetRepository;

/// Flips the availability of an adopted pet.
#[async_trait]
pub trait StatusUpdater: Send + Sync {
    async fn update_status(&self, update: &StatusUpdate) -> Result<(), AdoptionError>;
}

/// Calls the status updater endpoint.
#[async_trait]
impl StatusUpdater for PetAdoptionsClient {
    async fn update_status(&self, update: &StatusUpdate) -> Result<(), AdoptionError> {
        let body = PetAdoptionsClient::update_status(self, update)
            .await
            .map_err(|e| AdoptionError::StatusUpdateFailed(e.to_string()))?;
        tracing::debug!(petid = %update.petid, response = %body, "Status updater answered");
        Ok(())
    }
}

/// Writes the new availability straight to the pets table.
///
/// Local runs have no status updater endpoint.
pub struct LocalStatusUpdater {
    pets: Arc<dyn PetRepository>,
}

impl LocalStatusUpdater {
    pub fn new(pets: Arc<dyn PetRepository>) -> Self {
        Self { pets }
    }
}

#[async_trait]
impl StatusUpdater for LocalStatusUpdater {
    async fn update_status(&self, update: &StatusUpdate) -> Result<(), AdoptionError> {
        self.pets
            .update_availability(
                &update.pettype,
                &update.petid,
                update.target_availability(),
            )
            .await
            .map_err(|e| AdoptionError::StatusUpdateFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petadoptions_core::pet::{seed_pets, PetSearchQuery};
    use petadoptions_storage::InMemoryRepository;

    #[tokio::test]
    async fn test_local_updater_marks_pet_adopted() {
        let repo = Arc::new(InMemoryRepository::with_pets(seed_pets().unwrap()));
        let updater = LocalStatusUpdater::new(repo.clone());

        updater
            .update_status(&StatusUpdate::adopted("010", "puppy"))
            .await
            .unwrap();

        let pets = repo.search(&PetSearchQuery::by_id("010")).await.unwrap();
        assert_eq!(pets[0].availability, "no");
    }

    #[tokio::test]
    async fn test_local_updater_unknown_pet() {
        let updater = LocalStatusUpdater::new(Arc::new(InMemoryRepository::new()));

        let result = updater
            .update_status(&StatusUpdate::adopted("999", "puppy"))
            .await;

        assert!(matches!(result, Err(AdoptionError::StatusUpdateFailed(_))));
    }
}
