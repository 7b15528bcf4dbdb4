use petadoptions_core::config::{parameters, ResolvedSettings, Setting};

pub const FOODS_TABLE_NAME: Setting =
    Setting::optional("FOODS_TABLE_NAME", parameters::FOODS_TABLE_NAME);

pub const CARTS_TABLE_NAME: Setting =
    Setting::optional("CARTS_TABLE_NAME", parameters::CARTS_TABLE_NAME);

/// Shares the images CDN of the pet search service.
pub const ASSETS_CDN_URL: Setting = Setting::optional("ASSETS_CDN_URL", parameters::IMAGES_CDN_URL);

pub const SETTINGS: [Setting; 3] = [FOODS_TABLE_NAME, CARTS_TABLE_NAME, ASSETS_CDN_URL];

pub const DEFAULT_FOODS_TABLE: &str = "PetFoods";
pub const DEFAULT_CARTS_TABLE: &str = "PetFoodCarts";

/// Table names and CDN after defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetFoodSettings {
    pub foods_table: String,
    pub carts_table: String,
    /// Empty when no CDN is configured. Image keys are then returned as is.
    pub assets_cdn_url: String,
}

impl PetFoodSettings {
    pub fn from_resolved(settings: &ResolvedSettings) -> Self {
        let get = |setting: &Setting, default: &str| {
            settings
                .get(setting.name)
                .unwrap_or(default)
                .to_string()
        };
        Self {
            foods_table: get(&FOODS_TABLE_NAME, DEFAULT_FOODS_TABLE),
            carts_table: get(&CARTS_TABLE_NAME, DEFAULT_CARTS_TABLE),
            assets_cdn_url: get(&ASSETS_CDN_URL, ""),
        }
    }
}
