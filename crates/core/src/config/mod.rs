//! Configuration keys and pure resolution helpers.
//!
//! Services read `APP_`-prefixed environment variables and fall back to
//! Parameter Store for anything unset. The I/O half lives in
//! `petadoptions_aws`; this module only decides what to look up and how to
//! merge the answers.

mod error;
mod secret;
mod service;
mod settings;

pub use error::ConfigError;
pub use secret::DbSecret;
pub use service::{is_truthy, ServiceConfig, DEFAULT_REQUEST_TIMEOUT};
pub use settings::{
    env_key, merge_parameters, parameters, resolve_from_env, ResolvedSettings, Setting,
    APP_ENV_PREFIX, DATABASE_URL_NAME, PETFOOD_ENV_PREFIX,
};
