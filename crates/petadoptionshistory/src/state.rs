//! Application state.

use std::sync::Arc;

use petadoptions_aws::{
    database_url_from_settings, resolve_settings, ParameterStore, SdkConfig, SecretsStore,
};
use petadoptions_core::config::{env_key, APP_ENV_PREFIX, DATABASE_URL_NAME};
use petadoptions_core::storage::HistoryRepository;
use petadoptions_storage::{InMemoryRepository, PostgresRepository};

use crate::config::{RDS_SECRET_ARN, SETTINGS};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub history_repo: Arc<dyn HistoryRepository>,
}

impl AppState {
    pub fn new(history_repo: Arc<dyn HistoryRepository>) -> Self {
        Self { history_repo }
    }

    pub fn in_memory() -> Self {
        tracing::info!("Using in-memory history table");
        Self::new(Arc::new(InMemoryRepository::new()))
    }

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

        Ok(Self::new(Arc::new(PostgresRepository::connect_lazy(
            &database_url,
        )?)))
    }
}
