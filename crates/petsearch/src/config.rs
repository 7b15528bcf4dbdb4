use petadoptions_core::config::{parameters, Setting};

pub const TABLE_NAME: Setting =
    Setting::required("DYNAMODB_TABLE_NAME", parameters::DYNAMODB_TABLE_NAME);

/// Only required when no CDN is configured.
pub const BUCKET_NAME: Setting = Setting::optional("S3_BUCKET_NAME", parameters::S3_BUCKET_NAME);

pub const IMAGES_CDN_URL: Setting =
    Setting::optional("IMAGES_CDN_URL", parameters::IMAGES_CDN_URL);

/// Settings resolved at startup.
pub const SETTINGS: [Setting; 3] = [TABLE_NAME, BUCKET_NAME, IMAGES_CDN_URL];
