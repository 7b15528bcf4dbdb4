//! Application state.

use std::sync::Arc;

use petadoptions_aws::{
    database_url_from_settings, resolve_settings, ParameterStore, SdkConfig, SecretsStore,
};
use petadoptions_client::{PetAdoptionsClient, ServiceUrls};
use petadoptions_core::config::{env_key, APP_ENV_PREFIX, DATABASE_URL_NAME};
use petadoptions_core::storage::TransactionRepository;
use petadoptions_storage::{InMemoryRepository, PostgresRepository};

use crate::config::{
    LOCAL_PET_SEARCH_URL, PET_SEARCH_TIMEOUT, PET_SEARCH_URL, RDS_SECRET_ARN, SETTINGS,
};
use crate::lookup::PetLookup;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub transaction_repo: Arc<dyn TransactionRepository>,
    pub pets: Arc<dyn PetLookup>,
}

impl AppState {
    pub fn new(transaction_repo: Arc<dyn TransactionRepository>, pets: Arc<dyn PetLookup>) -> Self {
        Self {
            transaction_repo,
            pets,
        }
    }

    /// In-memory transactions, pet details from a local pet search service.
    pub fn in_memory() -> anyhow::Result<Self> {
        let search_url = std::env::var(PET_SEARCH_URL.env_key(APP_ENV_PREFIX))
            .unwrap_or_else(|_| LOCAL_PET_SEARCH_URL.to_string());
        tracing::info!(search_url = %search_url, "Using in-memory transactions table");

        Ok(Self::new(
            Arc::new(InMemoryRepository::new()),
            Arc::new(search_client(search_url)?),
        ))
    }

    /// Postgres transactions, pet details from the pet search service.
    pub async fn from_aws(sdk_config: &SdkConfig) -> anyhow::Result<Self> {
        let parameters = ParameterStore::from_sdk_config(sdk_config);
        let settings = resolve_settings(APP_ENV_PREFIX, &SETTINGS, &parameters).await?;

        let database_url = database_url_from_settings(
            std::env::var(env_key(APP_ENV_PREFIX, DATABASE_URL_NAME)).ok(),
            &settings,
            &RDS_SECRET_ARN,
            &SecretsStore::from_sdk_config(sdk_config),
        )
        .await?;
        let transaction_repo = PostgresRepository::connect_lazy(&database_url)?;

        let search_url = settings.require(&PET_SEARCH_URL)?;
        tracing::info!(search_url = %search_url, "Using pet search service");

        Ok(Self::new(
            Arc::new(transaction_repo),
            Arc::new(search_client(search_url)?),
        ))
    }
}

fn search_client(search_url: impl Into<String>) -> anyhow::Result<PetAdoptionsClient> {
    let urls = ServiceUrls {
        search: search_url.into(),
        ..ServiceUrls::default()
    };
    Ok(PetAdoptionsClient::with_timeout(urls, PET_SEARCH_TIMEOUT)?)
}
