//! Application state.

use std::sync::Arc;

use chrono::Utc;
use petadoptions_aws::{resolve_settings, ParameterStore, SdkConfig};
use petadoptions_core::config::PETFOOD_ENV_PREFIX;
use petadoptions_core::food::{seed_foods, Food};
use petadoptions_core::storage::{CartRepository, FoodRepository};
use petadoptions_storage::{DynamoDbCartRepository, DynamoDbFoodRepository, InMemoryRepository};

use crate::config::{PetFoodSettings, ASSETS_CDN_URL, SETTINGS};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub foods: Arc<dyn FoodRepository>,
    pub carts: Arc<dyn CartRepository>,
    /// Prefix of every image URL. Empty leaves image keys untouched.
    pub assets_cdn_url: String,
}

impl AppState {
    pub fn new(foods: Arc<dyn FoodRepository>, carts: Arc<dyn CartRepository>) -> Self {
        Self {
            foods,
            carts,
            assets_cdn_url: String::new(),
        }
    }

    pub fn with_assets_cdn_url(mut self, assets_cdn_url: impl Into<String>) -> Self {
        self.assets_cdn_url = assets_cdn_url.into();
        self
    }

    /// One in-memory repository for foods and carts, loaded with the
    /// bundled sample foods.
    pub fn in_memory() -> anyhow::Result<Self> {
        let now = Utc::now();
        let foods = seed_foods()?.into_iter().map(|request| Food::new(request, now));
        let repo = Arc::new(InMemoryRepository::with_foods(foods));

        let cdn = std::env::var(ASSETS_CDN_URL.env_key(PETFOOD_ENV_PREFIX)).unwrap_or_default();

        tracing::info!("Using in-memory foods and carts tables");
        Ok(Self::new(repo.clone(), repo).with_assets_cdn_url(cdn))
    }

    /// DynamoDB foods and carts tables named by `PETFOOD_*` settings, with
    /// Parameter Store as fallback.
    pub async fn from_aws(sdk_config: &SdkConfig) -> anyhow::Result<Self> {
        let parameters = ParameterStore::from_sdk_config(sdk_config);
        let resolved = resolve_settings(PETFOOD_ENV_PREFIX, &SETTINGS, &parameters).await?;
        let settings = PetFoodSettings::from_resolved(&resolved);

        tracing::info!(
            foods_table = %settings.foods_table,
            carts_table = %settings.carts_table,
            assets_cdn_url = %settings.assets_cdn_url,
            "Using DynamoDB pet food tables"
        );

        let foods = DynamoDbFoodRepository::from_sdk_config(sdk_config, &settings.foods_table);
        let carts = DynamoDbCartRepository::from_sdk_config(sdk_config, &settings.carts_table);

        Ok(Self::new(Arc::new(foods), Arc::new(carts)).with_assets_cdn_url(settings.assets_cdn_url))
    }
}
