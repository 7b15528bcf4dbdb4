//! Application state.

use std::path::PathBuf;
use std::sync::Arc;

use petadoptions_aws::{
    database_url_from_settings, resolve_settings, HistoryPublisher, HistoryQueue,
    ParameterSource, ParameterStore, SdkConfig, SecretsStore, StaticParameters,
};
use petadoptions_client::{PetAdoptionsClient, ServiceUrls};
use petadoptions_core::config::{env_key, parameters, APP_ENV_PREFIX, DATABASE_URL_NAME};
use petadoptions_core::pet::seed_pets;
use petadoptions_core::storage::{PetRepository, TransactionRepository};
use petadoptions_storage::{DynamoDbPetRepository, InMemoryRepository, PostgresRepository};

use crate::config::{
    ERROR_MODE_NAME, RDS_SECRET_ARN, SEED_FILE_NAME, SETTINGS, SQS_QUEUE_URL,
    STATUS_UPDATE_TIMEOUT, TABLE_NAME, UPDATE_ADOPTION_URL,
};
use crate::updater::{LocalStatusUpdater, StatusUpdater};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub pet_repo: Arc<dyn PetRepository>,
    pub transaction_repo: Arc<dyn TransactionRepository>,
    pub status_updater: Arc<dyn StatusUpdater>,
    /// Read on every adoption for the error mode flag.
    pub parameters: Arc<dyn ParameterSource>,
    pub history_queue: Option<Arc<dyn HistoryPublisher>>,
    pub seed_file: Option<PathBuf>,
}

impl AppState {
    pub fn new(
        pet_repo: Arc<dyn PetRepository>,
        transaction_repo: Arc<dyn TransactionRepository>,
        status_updater: Arc<dyn StatusUpdater>,
    ) -> Self {
        Self {
            pet_repo,
            transaction_repo,
            status_updater,
            parameters: Arc::new(StaticParameters::new()),
            history_queue: None,
            seed_file: None,
        }
    }

    pub fn with_parameters(mut self, parameters: Arc<dyn ParameterSource>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_history_queue(mut self, queue: Arc<dyn HistoryPublisher>) -> Self {
        self.history_queue = Some(queue);
        self
    }

    pub fn with_seed_file(mut self, seed_file: Option<PathBuf>) -> Self {
        self.seed_file = seed_file;
        self
    }

    /// One in-memory repository for pets and transactions, loaded with the
    /// bundled seed pets. Adoptions update the pets table directly.
    pub fn in_memory() -> anyhow::Result<Self> {
        let repo = Arc::new(InMemoryRepository::with_pets(seed_pets()?));

        let mut local_parameters = StaticParameters::new();
        if let Ok(flag) = std::env::var(env_key(APP_ENV_PREFIX, ERROR_MODE_NAME)) {
            tracing::info!(error_mode = %flag, "Error mode set from environment");
            local_parameters = local_parameters.with(parameters::ERROR_MODE, flag);
        }

        tracing::info!("Using in-memory pets and transactions tables");
        Ok(Self::new(
            repo.clone(),
            repo.clone(),
            Arc::new(LocalStatusUpdater::new(repo)),
        )
        .with_parameters(Arc::new(local_parameters))
        .with_seed_file(seed_file_from_env()))
    }

    /// DynamoDB pets, Postgres transactions, status updater endpoint and an
    /// optional history queue.
    pub async fn from_aws(sdk_config: &SdkConfig) -> anyhow::Result<Self> {
        let parameters = Arc::new(ParameterStore::from_sdk_config(sdk_config));
        let settings = resolve_settings(APP_ENV_PREFIX, &SETTINGS, parameters.as_ref()).await?;

        let database_url = database_url_from_settings(
            std::env::var(env_key(APP_ENV_PREFIX, DATABASE_URL_NAME)).ok(),
            &settings,
            &RDS_SECRET_ARN,
            &SecretsStore::from_sdk_config(sdk_config),
        )
        .await?;
        let transaction_repo = PostgresRepository::connect_lazy(&database_url)?;

        let table_name = settings.require(&TABLE_NAME)?;
        let pet_repo = DynamoDbPetRepository::from_sdk_config(sdk_config, table_name);
        tracing::info!(table = table_name, "Using DynamoDB pets table");

        let update_url = settings.require(&UPDATE_ADOPTION_URL)?;
        tracing::info!(update_url, "Using status updater");
        let urls = ServiceUrls::default().with_status_updater(update_url);
        let status_updater = PetAdoptionsClient::with_timeout(urls, STATUS_UPDATE_TIMEOUT)?;

        let mut state = Self::new(
            Arc::new(pet_repo),
            Arc::new(transaction_repo),
            Arc::new(status_updater),
        )
        .with_parameters(parameters)
        .with_seed_file(seed_file_from_env());

        match settings.get(SQS_QUEUE_URL.name) {
            Some(queue_url) => {
                tracing::info!(queue_url, "Sending adoption history to SQS");
                state = state.with_history_queue(Arc::new(HistoryQueue::from_sdk_config(
                    sdk_config, queue_url,
                )));
            }
            None => tracing::info!("No history queue configured"),
        }

        Ok(state)
    }
}

fn seed_file_from_env() -> Option<PathBuf> {
    std::env::var(env_key(APP_ENV_PREFIX, SEED_FILE_NAME))
        .ok()
        .map(PathBuf::from)
}
