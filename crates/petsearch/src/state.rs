//! Application state.
//!
//! Handlers see the pets table and the image URL resolver through trait
//! objects, so tests run against the in-memory repository and a fixed CDN.

use std::sync::Arc;

use petadoptions_aws::{
    resolve_settings, CdnImageUrls, ImageUrlResolver, ParameterStore, PresignedImageUrls,
    SdkConfig,
};
use petadoptions_core::config::APP_ENV_PREFIX;
use petadoptions_core::pet::seed_pets;
use petadoptions_core::storage::PetRepository;
use petadoptions_storage::{DynamoDbPetRepository, InMemoryRepository};

use crate::config::{BUCKET_NAME, IMAGES_CDN_URL, SETTINGS, TABLE_NAME};

/// CDN prefix used by local runs.
const LOCAL_IMAGES_URL: &str = "http://localhost:8080/images";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub pet_repo: Arc<dyn PetRepository>,
    pub images: Arc<dyn ImageUrlResolver>,
}

impl AppState {
    pub fn new(pet_repo: Arc<dyn PetRepository>, images: Arc<dyn ImageUrlResolver>) -> Self {
        Self { pet_repo, images }
    }

    /// In-memory pets table loaded with the bundled seed pets.
    pub fn in_memory() -> anyhow::Result<Self> {
        let pets = seed_pets()?;
        tracing::info!(count = pets.len(), "Using in-memory pets table");

        Ok(Self::new(
            Arc::new(InMemoryRepository::with_pets(pets)),
            Arc::new(CdnImageUrls::new(LOCAL_IMAGES_URL)),
        ))
    }

    /// DynamoDB pets table, CDN or S3 pre-signed image URLs.
    pub async fn from_aws(sdk_config: &SdkConfig) -> anyhow::Result<Self> {
        let parameters = ParameterStore::from_sdk_config(sdk_config);
        let settings = resolve_settings(APP_ENV_PREFIX, &SETTINGS, &parameters).await?;

        let table_name = settings.require(&TABLE_NAME)?;
        let pet_repo = DynamoDbPetRepository::from_sdk_config(sdk_config, table_name);

        let images: Arc<dyn ImageUrlResolver> = match settings.get(IMAGES_CDN_URL.name) {
            Some(cdn) => {
                tracing::info!(cdn, "Serving pet images from CDN");
                Arc::new(CdnImageUrls::new(cdn))
            }
            None => {
                let bucket = settings.require(&BUCKET_NAME)?;
                tracing::info!(bucket, "Serving pet images with pre-signed S3 URLs");
                Arc::new(PresignedImageUrls::from_sdk_config(sdk_config, bucket))
            }
        };

        tracing::info!(table = table_name, "Using DynamoDB pets table");
        Ok(Self::new(Arc::new(pet_repo), images))
    }
}
