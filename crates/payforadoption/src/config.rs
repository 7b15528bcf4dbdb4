use std::time::Duration;

use petadoptions_core::config::{parameters, Setting};

pub const UPDATE_ADOPTION_URL: Setting =
    Setting::required("UPDATE_ADOPTION_URL", parameters::UPDATE_ADOPTION_URL);

/// Not needed when `APP_DATABASE_URL` is set.
pub const RDS_SECRET_ARN: Setting = Setting::optional("RDS_SECRET_ARN", parameters::RDS_SECRET_ARN);

pub const TABLE_NAME: Setting =
    Setting::required("DYNAMODB_TABLE_NAME", parameters::DYNAMODB_TABLE_NAME);

/// History messages are only sent when a queue is configured.
pub const SQS_QUEUE_URL: Setting = Setting::optional("SQS_QUEUE_URL", parameters::SQS_QUEUE_URL);

pub const SETTINGS: [Setting; 4] = [UPDATE_ADOPTION_URL, RDS_SECRET_ARN, TABLE_NAME, SQS_QUEUE_URL];

/// Seed file read by the seeding endpoints instead of the bundled pets.
pub const SEED_FILE_NAME: &str = "SEED_FILE";

/// Local runs read the error mode flag from `APP_ERROR_MODE`.
pub const ERROR_MODE_NAME: &str = "ERROR_MODE";

/// Timeout of the status updater call.
pub const STATUS_UPDATE_TIMEOUT: Duration = Duration::from_secs(5);
