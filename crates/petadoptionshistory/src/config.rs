use petadoptions_core::config::{parameters, Setting};

/// Not needed when `APP_DATABASE_URL` is set.
pub const RDS_SECRET_ARN: Setting = Setting::optional("RDS_SECRET_ARN", parameters::RDS_SECRET_ARN);

pub const SETTINGS: [Setting; 1] = [RDS_SECRET_ARN];
