//! Secrets Manager access and database URL resolution.

use async_trait::async_trait;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::Client;
use petadoptions_core::config::{DbSecret, ResolvedSettings, Setting};
use petadoptions_core::retry::{retry_if, RetryPolicy};

use crate::error::{AwsError, Result};
use crate::throttling::is_throttling_sdk_error;

/// Source of secret strings.
#[async_trait]
pub trait SecretSource: Send + Sync {
    async fn get_secret_string(&self, secret_id: &str) -> Result<String>;
}

/// Secrets Manager client with retry.
#[derive(Debug, Clone)]
pub struct SecretsStore {
    client: Client,
    policy: RetryPolicy,
}

impl SecretsStore {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            policy: RetryPolicy::default(),
        }
    }

    pub fn from_sdk_config(config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

#[async_trait]
impl SecretSource for SecretsStore {
    async fn get_secret_string(&self, secret_id: &str) -> Result<String> {
        let output = retry_if(&self.policy, is_throttling_sdk_error, || {
            self.client.get_secret_value().secret_id(secret_id).send()
        })
        .await
        .map_err(|e| AwsError::SecretsManager(DisplayErrorContext(&e).to_string()))?;

        output
            .secret_string()
            .map(str::to_string)
            .ok_or_else(|| AwsError::EmptySecret(secret_id.to_string()))
    }
}

/// Postgres connection URL for the adoptions database.
///
/// An explicit URL (from `APP_DATABASE_URL`) wins; otherwise the credentials
/// secret is fetched and turned into a URL.
pub async fn resolve_database_url(
    explicit_url: Option<String>,
    secrets: &dyn SecretSource,
    secret_arn: &str,
) -> Result<String> {
    if let Some(url) = explicit_url.filter(|u| !u.is_empty()) {
        tracing::debug!("Using explicit database URL");
        return Ok(url);
    }

    let secret = DbSecret::from_json(&secrets.get_secret_string(secret_arn).await?)?;
    tracing::info!(url = %secret.redacted_url()?, "Resolved database connection");
    Ok(secret.connection_url()?)
}

/// [`resolve_database_url`] with the secret ARN taken from resolved settings.
///
/// The ARN is only required when no explicit URL is given.
pub async fn database_url_from_settings(
    explicit_url: Option<String>,
    settings: &ResolvedSettings,
    secret_arn: &Setting,
    secrets: &dyn SecretSource,
) -> Result<String> {
    let explicit_url = explicit_url.filter(|u| !u.is_empty());
    let arn = match explicit_url {
        Some(_) => "",
        None => settings.require(secret_arn)?,
    };
    resolve_database_url(explicit_url, secrets, arn).await
}
