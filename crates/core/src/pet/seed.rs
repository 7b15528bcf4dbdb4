//! Seed pets bundled with the services.

use super::Pet;

/// The bundled seed file.
pub const SEED_PETS_JSON: &str = include_str!("../../data/seed.json");

/// Parses a seed file: a JSON array of pets.
pub fn parse_seed(json: &str) -> Result<Vec<Pet>, serde_json::Error> {
    serde_json::from_str(json)
}

/// The bundled seed pets.
pub fn seed_pets() -> Result<Vec<Pet>, serde_json::Error> {
    parse_seed(SEED_PETS_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pet::PET_TYPES;

    #[test]
    fn test_bundled_seed_parses() {
        let pets = seed_pets().unwrap();
        assert_eq!(pets.len(), 14);
        assert!(pets.iter().all(Pet::is_available));
    }

    #[test]
    fn test_bundled_seed_covers_every_pet_type() {
        let pets = seed_pets().unwrap();
        for pettype in PET_TYPES {
            assert!(pets.iter().any(|p| p.pettype == pettype), "no {pettype}");
        }
    }

    #[test]
    fn test_seed_accepts_numeric_price() {
        let pets = parse_seed(
            r#"[{"petid":"900","pettype":"puppy","petcolor":"white","availability":"yes","cuteness_rate":3,"price":120,"image":"p9"}]"#,
        )
        .unwrap();
        assert_eq!(pets[0].price, "120");
        assert_eq!(pets[0].cuteness_rate, "3");
    }

    #[test]
    fn test_seed_rejects_non_array() {
        assert!(parse_seed(r#"{"petid":"1"}"#).is_err());
    }
}
