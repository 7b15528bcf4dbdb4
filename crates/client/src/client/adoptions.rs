//! Adoption operations.

use petadoptions_core::adoption::{Adoption, StatusUpdate};

use super::PetAdoptionsClient;
use crate::error::{ClientError, Result};

impl PetAdoptionsClient {
    /// Latest adoptions with their pet details.
    pub async fn adoption_list(&self) -> Result<Vec<Adoption>> {
        let response = self.client.get(&self.urls.adoption_list).send().await?;
        self.handle_json(response).await
    }

    /// Adopt a pet. Returns the response body.
    pub async fn complete_adoption(
        &self,
        pet_id: &str,
        pet_type: &str,
        user_id: Option<&str>,
    ) -> Result<String> {
        let mut url = Self::parse_url(&self.urls.complete_adoption)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("petId", pet_id);
            pairs.append_pair("pettype", pet_type);
            if let Some(user_id) = user_id {
                pairs.append_pair("userId", user_id);
            }
        }

        tracing::debug!(pet_id, pet_type, "Completing adoption");
        let response = self.client.post(url).send().await?;
        self.handle_text(response).await
    }

    /// Archive every adoption and reseed the pets.
    pub async fn cleanup_adoptions(&self) -> Result<()> {
        let response = self.client.post(&self.urls.cleanup_adoptions).send().await?;
        self.check(response).await?;
        Ok(())
    }

    /// Send a pet status update. Returns the response body.
    pub async fn update_status(&self, update: &StatusUpdate) -> Result<String> {
        let url = self.urls.status_updater.as_deref().ok_or_else(|| {
            ClientError::InvalidInput("status updater URL is not configured".to_string())
        })?;

        let response = self.client.put(url).json(update).send().await?;
        self.handle_text(response).await
    }
}
