use std::time::Duration;

use petadoptions_core::config::{parameters, Setting};

pub const PET_SEARCH_URL: Setting =
    Setting::required("PET_SEARCH_URL", parameters::PET_SEARCH_URL);

/// Not needed when `APP_DATABASE_URL` is set.
pub const RDS_SECRET_ARN: Setting = Setting::optional("RDS_SECRET_ARN", parameters::RDS_SECRET_ARN);

pub const SETTINGS: [Setting; 2] = [PET_SEARCH_URL, RDS_SECRET_ARN];

/// Timeout of each pet search call.
pub const PET_SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Search endpoint used by local runs.
pub const LOCAL_PET_SEARCH_URL: &str = "http://localhost:8080/api/search";
