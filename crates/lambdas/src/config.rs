//! Lambda settings. Same `APP_` prefix and Parameter Store fallback as the
//! HTTP services.

use std::time::Duration;

use petadoptions_core::config::{env_key, parameters, ConfigError, Setting, APP_ENV_PREFIX};

pub const TABLE_NAME: Setting =
    Setting::required("DYNAMODB_TABLE_NAME", parameters::DYNAMODB_TABLE_NAME);

/// Not needed when `APP_DATABASE_URL` is set.
pub const RDS_SECRET_ARN: Setting = Setting::optional("RDS_SECRET_ARN", parameters::RDS_SECRET_ARN);

pub const PET_SEARCH_URL: Setting =
    Setting::required("PET_SEARCH_URL", parameters::PET_SEARCH_URL);

pub const PET_LIST_ADOPTIONS_URL: Setting =
    Setting::required("PET_LIST_ADOPTIONS_URL", parameters::PET_LIST_ADOPTIONS_URL);

pub const CLEANUP_ADOPTIONS_URL: Setting =
    Setting::required("CLEANUP_ADOPTIONS_URL", parameters::CLEANUP_ADOPTIONS_URL);

/// Timeout of every call to the HTTP services.
pub const SERVICE_TIMEOUT: Duration = Duration::from_secs(30);

/// Searches per traffic generator run when `APP_TRAFFIC_SEARCHES` is unset.
pub const DEFAULT_TRAFFIC_SEARCHES: usize = 10;

/// Reads `APP_TRAFFIC_SEARCHES`.
pub fn traffic_searches<F>(lookup: F) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let key = env_key(APP_ENV_PREFIX, "TRAFFIC_SEARCHES");
    match lookup(&key) {
        Some(value) => value
            .trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::Invalid {
                name: key,
                reason: e.to_string(),
            }),
        None => Ok(DEFAULT_TRAFFIC_SEARCHES),
    }
}
