use thiserror::Error;

/// Errors raised while resolving configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing setting: set {env} or parameter {parameter}")]
    Missing { env: String, parameter: String },
    #[error("Invalid setting {name}: {reason}")]
    Invalid { name: String, reason: String },
    #[error("Invalid database secret: {0}")]
    InvalidSecret(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::Invalid {
            name: "APP_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "not a number".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid setting APP_REQUEST_TIMEOUT_SECS: not a number"
        );
        assert_eq!(
            ConfigError::InvalidSecret("missing host".to_string()).to_string(),
            "Invalid database secret: missing host"
        );
    }
}
