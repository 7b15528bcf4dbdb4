mod filter;
mod image;
mod seed;
mod types;

pub use filter::{scan_filter, ScanFilter};
pub use image::{cdn_image_url, image_key, pet_image_key};
pub use seed::{parse_seed, seed_pets, SEED_PETS_JSON};
pub use types::{Availability, Pet, PetSearchQuery, PetSearchResult};

/// Pet types the demo seeds and searches for.
pub const PET_TYPES: [&str; 3] = ["bunny", "kitten", "puppy"];
