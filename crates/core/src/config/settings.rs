use std::collections::HashMap;

use super::ConfigError;

/// Environment variable prefix shared by every service.
pub const APP_ENV_PREFIX: &str = "APP";

/// Environment variable prefix of the pet food service.
pub const PETFOOD_ENV_PREFIX: &str = "PETFOOD";

/// Setting name of an explicit Postgres URL, which skips the secret lookup.
pub const DATABASE_URL_NAME: &str = "DATABASE_URL";

/// Parameter Store names used across the services.
pub mod parameters {
    pub const DYNAMODB_TABLE_NAME: &str = "/petstore/dynamodbtablename";
    pub const S3_BUCKET_NAME: &str = "/petstore/s3bucketname";
    pub const IMAGES_CDN_URL: &str = "/petstore/imagescdnurl";
    pub const RDS_SECRET_ARN: &str = "/petstore/rdssecretarn";
    pub const PET_SEARCH_URL: &str = "/petstore/searchapiurl";
    pub const PET_LIST_ADOPTIONS_URL: &str = "/petstore/petlistadoptionsurl";
    pub const CLEANUP_ADOPTIONS_URL: &str = "/petstore/cleanupadoptionsurl";
    pub const UPDATE_ADOPTION_URL: &str = "/petstore/updateadoptionstatusurl";
    pub const SQS_QUEUE_URL: &str = "/petstore/sqsqueueurl";
    pub const ERROR_MODE: &str = "/petstore/errormode1";
    pub const FOODS_TABLE_NAME: &str = "/petstore/petfoodtablename";
    pub const CARTS_TABLE_NAME: &str = "/petstore/petfoodcarttablename";
}

/// A configuration value read from the environment first, then from
/// Parameter Store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Setting {
    /// Name without prefix, e.g. `DYNAMODB_TABLE_NAME`.
    pub name: &'static str,
    /// Parameter Store fallback.
    pub parameter: &'static str,
    /// Optional settings do not fail resolution when absent.
    pub required: bool,
}

impl Setting {
    pub const fn required(name: &'static str, parameter: &'static str) -> Self {
        Self {
            name,
            parameter,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, parameter: &'static str) -> Self {
        Self {
            name,
            parameter,
            required: false,
        }
    }

    /// Environment variable holding this setting under `prefix`.
    pub fn env_key(&self, prefix: &str) -> String {
        env_key(prefix, self.name)
    }
}

/// `APP` + `DYNAMODB_TABLE_NAME` -> `APP_DYNAMODB_TABLE_NAME`.
pub fn env_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}_{name}")
    }
}

/// Values resolved for a set of settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSettings {
    prefix: String,
    values: HashMap<&'static str, String>,
    settings: Vec<Setting>,
}

impl ResolvedSettings {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    pub fn insert(&mut self, setting: Setting, value: impl Into<String>) {
        if !self.settings.contains(&setting) {
            self.settings.push(setting);
        }
        self.values.insert(setting.name, value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Value of a setting that must be present.
    pub fn require(&self, setting: &Setting) -> Result<&str, ConfigError> {
        self.get(setting.name).ok_or_else(|| ConfigError::Missing {
            env: setting.env_key(&self.prefix),
            parameter: setting.parameter.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Splits settings into those found in the environment and those to fetch.
///
/// Blank environment values count as missing.
pub fn resolve_from_env<F>(
    prefix: &str,
    settings: &[Setting],
    lookup: F,
) -> (ResolvedSettings, Vec<Setting>)
where
    F: Fn(&str) -> Option<String>,
{
    let mut resolved = ResolvedSettings::new(prefix);
    let mut missing = Vec::new();

    for setting in settings {
        match lookup(&setting.env_key(prefix)).filter(|v| !v.trim().is_empty()) {
            Some(value) => resolved.insert(*setting, value),
            None => missing.push(*setting),
        }
    }

    (resolved, missing)
}

/// Fills missing settings from fetched parameter values.
///
/// Fails on the first required setting with no value.
pub fn merge_parameters(
    mut resolved: ResolvedSettings,
    missing: &[Setting],
    parameters: &HashMap<String, String>,
) -> Result<ResolvedSettings, ConfigError> {
    for setting in missing {
        match parameters.get(setting.parameter) {
            Some(value) => resolved.insert(*setting, value.clone()),
            None if setting.required => {
                return Err(ConfigError::Missing {
                    env: setting.env_key(&resolved.prefix),
                    parameter: setting.parameter.to_string(),
                })
            }
            None => {}
        }
    }
    Ok(resolved)
}
