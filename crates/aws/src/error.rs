use petadoptions_core::config::ConfigError;
use thiserror::Error;

/// Errors raised by the AWS shell.
#[derive(Debug, Error)]
pub enum AwsError {
    #[error("Parameter Store request failed: {0}")]
    ParameterStore(String),

    #[error("Secrets Manager request failed: {0}")]
    SecretsManager(String),

    #[error("Secret {0} has no string value")]
    EmptySecret(String),

    #[error("Image URL generation failed: {0}")]
    Presign(String),

    #[error("Queue send failed: {0}")]
    Queue(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for the AWS shell.
pub type Result<T> = std::result::Result<T, AwsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aws_error_display() {
        assert_eq!(
            AwsError::EmptySecret("arn:secret".to_string()).to_string(),
            "Secret arn:secret has no string value"
        );
        let missing = AwsError::from(ConfigError::Missing {
            env: "APP_PET_SEARCH_URL".to_string(),
            parameter: "/petstore/searchapiurl".to_string(),
        });
        assert_eq!(
            missing.to_string(),
            "Missing setting: set APP_PET_SEARCH_URL or parameter /petstore/searchapiurl"
        );
    }
}
