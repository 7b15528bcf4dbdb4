//! petadoptions_aws - AWS shell for the pet adoptions services.
//!
//! Wraps the SDK calls the services need at startup and on the request path:
//! Parameter Store (cached), Secrets Manager, S3 pre-signing and SQS. Every
//! call goes through the throttling-aware retry helper.

pub mod client;
pub mod error;
pub mod images;
pub mod parameters;
pub mod queue;
pub mod secrets;
pub mod settings;
pub mod throttling;

pub use client::{load_sdk_config, AwsConfig};
pub use error::{AwsError, Result};
pub use images::{CdnImageUrls, ImageUrlResolver, PresignedImageUrls};
pub use parameters::{ParameterCache, ParameterSource, ParameterStore, StaticParameters};
pub use queue::{HistoryPublisher, HistoryQueue};
pub use secrets::{database_url_from_settings, resolve_database_url, SecretSource, SecretsStore};
pub use settings::{resolve_settings, resolve_settings_with};
pub use throttling::is_throttling_sdk_error;

pub use aws_config::SdkConfig;
