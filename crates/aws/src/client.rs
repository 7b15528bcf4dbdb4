//! AWS SDK configuration (Imperative Shell).

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// AWS client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsConfig {
    /// Custom endpoint URL (LocalStack, DynamoDB Local).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl AwsConfig {
    /// Reads `AWS_ENDPOINT_URL` and `AWS_REGION` (default: `us-east-1`).
    pub fn from_env() -> Self {
        Self {
            endpoint_url: std::env::var("AWS_ENDPOINT_URL")
                .ok()
                .filter(|v| !v.is_empty()),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        }
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("local endpoint ({url})"),
            None => format!("AWS (region: {})", self.region),
        }
    }
}

/// Loads the shared SDK configuration every service client is built from.
pub async fn load_sdk_config(config: &AwsConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    tracing::debug!(target = %config.target_display(), "Loading AWS SDK configuration");
    loader.load().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_display() {
        let local = AwsConfig {
            endpoint_url: Some("http://localhost:4566".to_string()),
            region: "us-east-1".to_string(),
        };
        assert_eq!(local.target_display(), "local endpoint (http://localhost:4566)");

        let remote = AwsConfig {
            endpoint_url: None,
            region: "eu-west-1".to_string(),
        };
        assert_eq!(remote.target_display(), "AWS (region: eu-west-1)");
    }
}
