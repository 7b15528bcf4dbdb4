//! Health check operations.

use std::fmt;

use super::PetAdoptionsClient;
use crate::error::Result;

/// Services exposing `/health/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    PetSearch,
    PetListAdoptions,
    PayForAdoption,
}

impl Service {
    pub const ALL: [Service; 3] = [
        Service::PetSearch,
        Service::PetListAdoptions,
        Service::PayForAdoption,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Service::PetSearch => "petsearch",
            Service::PetListAdoptions => "petlistadoptions",
            Service::PayForAdoption => "payforadoption",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PetAdoptionsClient {
    fn service_endpoint(&self, service: Service) -> &str {
        match service {
            Service::PetSearch => &self.urls.search,
            Service::PetListAdoptions => &self.urls.adoption_list,
            Service::PayForAdoption => &self.urls.complete_adoption,
        }
    }

    /// Check a service's health. Returns the status body, `Alive` when healthy.
    pub async fn health(&self, service: Service) -> Result<String> {
        let url = Self::parse_url(self.service_endpoint(service))?.join("/health/status")?;
        let response = self.client.get(url).send().await?;
        self.handle_text(response).await
    }
}
