use std::time::Duration;

use super::{env_key, ConfigError, APP_ENV_PREFIX};

/// Request timeout applied when `APP_REQUEST_TIMEOUT_SECS` is unset.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Process-level settings shared by every HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Requests running longer than this get a 408.
    pub request_timeout: Duration,
    /// Emit JSON log lines instead of the human-readable format.
    pub log_json: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            log_json: false,
        }
    }
}

impl ServiceConfig {
    /// Load from environment variables.
    ///
    /// - `APP_REQUEST_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
    /// - `APP_LOG_JSON` - `true` or `1` for JSON logs (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(APP_ENV_PREFIX, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(prefix: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_key = env_key(prefix, "REQUEST_TIMEOUT_SECS");
        let request_timeout = match lookup(&timeout_key) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| ConfigError::Invalid {
                    name: timeout_key,
                    reason: e.to_string(),
                })?,
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let log_json = lookup(&env_key(prefix, "LOG_JSON"))
            .as_deref()
            .is_some_and(is_truthy);

        Ok(Self {
            request_timeout,
            log_json,
        })
    }
}

/// `true`, `1` and `yes` (any case) enable a flag.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = ServiceConfig::from_lookup("APP", lookup(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_values_from_env() {
        let config = ServiceConfig::from_lookup(
            "APP",
            lookup(&[("APP_REQUEST_TIMEOUT_SECS", "5"), ("APP_LOG_JSON", "true")]),
        )
        .unwrap();

        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(config.log_json);
    }

    #[test]
    fn test_invalid_timeout() {
        let err =
            ServiceConfig::from_lookup("APP", lookup(&[("APP_REQUEST_TIMEOUT_SECS", "soon")]))
                .unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { ref name, .. } if name == "APP_REQUEST_TIMEOUT_SECS"));
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy("TRUE"));
        assert!(is_truthy(" 1 "));
        assert!(!is_truthy("false"));
        assert!(!is_truthy(""));
    }
}
