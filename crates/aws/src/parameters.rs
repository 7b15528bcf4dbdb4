//! Parameter Store access with a per-instance time-based cache.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::Client;
use petadoptions_core::retry::{retry_if, RetryPolicy};
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::error::{AwsError, Result};
use crate::throttling::is_throttling_sdk_error;

/// Default reload window for cached parameters.
pub const DEFAULT_PARAMETER_TTL: Duration = Duration::from_secs(300);

/// SSM accepts at most this many names per `GetParameters` call.
const GET_PARAMETERS_BATCH: usize = 10;

/// Source of named configuration parameters.
#[async_trait]
pub trait ParameterSource: Send + Sync {
    /// Fetches the given parameters. Unknown names are absent from the map.
    async fn get_parameters(&self, names: &[&str]) -> Result<HashMap<String, String>>;

    /// Fetches a single parameter.
    async fn get_parameter(&self, name: &str) -> Result<Option<String>> {
        Ok(self.get_parameters(&[name]).await?.remove(name))
    }
}

/// A cached parameter value. `None` records a parameter that does not exist.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Option<String>,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(value: Option<String>, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Thread-safe parameter cache with lazy expiration.
#[derive(Debug, Clone)]
pub struct ParameterCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

impl Default for ParameterCache {
    fn default() -> Self {
        Self::new(DEFAULT_PARAMETER_TTL)
    }
}

impl ParameterCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Splits `names` into fresh cached values and names to fetch.
    ///
    /// Names cached as absent are in neither half until they expire.
    pub async fn lookup<'a>(&self, names: &[&'a str]) -> (HashMap<String, String>, Vec<&'a str>) {
        let entries = self.entries.read().await;
        let mut found = HashMap::new();
        let mut missing = Vec::new();

        for name in names {
            match entries.get(*name) {
                Some(entry) if !entry.is_expired() => {
                    if let Some(value) = &entry.value {
                        found.insert(name.to_string(), value.clone());
                    }
                }
                _ => missing.push(*name),
            }
        }

        (found, missing)
    }

    pub async fn store(&self, values: &HashMap<String, String>) {
        let mut entries = self.entries.write().await;
        for (name, value) in values {
            entries.insert(name.clone(), CacheEntry::new(Some(value.clone()), self.ttl));
        }
    }

    /// Remembers that `names` do not exist for one reload window.
    pub async fn store_absent(&self, names: &[&str]) {
        let mut entries = self.entries.write().await;
        for name in names {
            entries.insert(name.to_string(), CacheEntry::new(None, self.ttl));
        }
    }

    /// Drops every cached value.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

/// Parameter Store client with retry and caching.
#[derive(Debug, Clone)]
pub struct ParameterStore {
    client: Client,
    policy: RetryPolicy,
    cache: ParameterCache,
}

impl ParameterStore {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            policy: RetryPolicy::default(),
            cache: ParameterCache::default(),
        }
    }

    pub fn from_sdk_config(config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(config))
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.cache = ParameterCache::new(ttl);
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    async fn fetch(&self, names: &[&str]) -> Result<HashMap<String, String>> {
        let mut values = HashMap::new();

        for chunk in names.chunks(GET_PARAMETERS_BATCH) {
            let batch: Vec<String> = chunk.iter().map(|n| n.to_string()).collect();

            let output = retry_if(&self.policy, is_throttling_sdk_error, || {
                self.client
                    .get_parameters()
                    .set_names(Some(batch.clone()))
                    .with_decryption(true)
                    .send()
            })
            .await
            .map_err(|e| AwsError::ParameterStore(DisplayErrorContext(&e).to_string()))?;

            for invalid in output.invalid_parameters() {
                tracing::warn!(parameter = %invalid, "Parameter not found");
            }

            for parameter in output.parameters() {
                if let (Some(name), Some(value)) = (parameter.name(), parameter.value()) {
                    values.insert(name.to_string(), value.to_string());
                }
            }
        }

        Ok(values)
    }
}

#[async_trait]
impl ParameterSource for ParameterStore {
    async fn get_parameters(&self, names: &[&str]) -> Result<HashMap<String, String>> {
        let (mut found, missing) = self.cache.lookup(names).await;
        if missing.is_empty() {
            return Ok(found);
        }

        tracing::debug!(count = missing.len(), "Fetching parameters from Parameter Store");
        let fetched = self.fetch(&missing).await?;
        let absent: Vec<&str> = missing
            .into_iter()
            .filter(|name| !fetched.contains_key(*name))
            .collect();
        self.cache.store(&fetched).await;
        self.cache.store_absent(&absent).await;
        found.extend(fetched);

        Ok(found)
    }
}

/// Fixed parameters, for local runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticParameters {
    values: HashMap<String, String>,
}

impl StaticParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

#[async_trait]
impl ParameterSource for StaticParameters {
    async fn get_parameters(&self, names: &[&str]) -> Result<HashMap<String, String>> {
        Ok(names
            .iter()
            .filter_map(|name| {
                self.values
                    .get(*name)
                    .map(|value| (name.to_string(), value.clone()))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_returns_fresh_values() {
        let cache = ParameterCache::new(Duration::from_secs(300));
        cache.store(&values(&[("/petstore/a", "1")])).await;

        let (found, missing) = cache.lookup(&["/petstore/a", "/petstore/b"]).await;

        assert_eq!(found.get("/petstore/a").map(String::as_str), Some("1"));
        assert_eq!(missing, vec!["/petstore/b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_expires_after_ttl() {
        let cache = ParameterCache::new(Duration::from_secs(300));
        cache.store(&values(&[("/petstore/a", "1")])).await;

        tokio::time::advance(Duration::from_secs(299)).await;
        let (found, _) = cache.lookup(&["/petstore/a"]).await;
        assert_eq!(found.len(), 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        let (found, missing) = cache.lookup(&["/petstore/a"]).await;
        assert!(found.is_empty());
        assert_eq!(missing, vec!["/petstore/a"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_remembers_absent_parameters() {
        let cache = ParameterCache::new(Duration::from_secs(300));
        cache.store_absent(&["/petstore/errormode1"]).await;

        let (found, missing) = cache.lookup(&["/petstore/errormode1"]).await;
        assert!(found.is_empty());
        assert!(missing.is_empty());

        tokio::time::advance(Duration::from_secs(301)).await;
        let (_, missing) = cache.lookup(&["/petstore/errormode1"]).await;
        assert_eq!(missing, vec!["/petstore/errormode1"]);
    }

    #[tokio::test]
    async fn test_cache_clear() {
        let cache = ParameterCache::default();
        cache.store(&values(&[("/petstore/a", "1")])).await;
        cache.clear().await;

        let (found, missing) = cache.lookup(&["/petstore/a"]).await;
        assert!(found.is_empty());
        assert_eq!(missing.len(), 1);
    }

    #[tokio::test]
    async fn test_static_parameters() {
        let source = StaticParameters::new().with("/petstore/errormode1", "true");

        assert_eq!(
            source.get_parameter("/petstore/errormode1").await.unwrap(),
            Some("true".to_string())
        );
        assert_eq!(source.get_parameter("/petstore/other").await.unwrap(), None);
    }
}
