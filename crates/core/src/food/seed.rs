//! Sample foods loaded by `POST /api/admin/seed`.

use super::CreateFoodRequest;

pub const SEED_FOODS_JSON: &str = include_str!("../../data/foods.json");

/// The bundled sample foods. Their ids are fixed, so seeding twice
/// overwrites instead of duplicating.
pub fn seed_foods() -> Result<Vec<CreateFoodRequest>, serde_json::Error> {
    serde_json::from_str(SEED_FOODS_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::validation::validate_create_food;
    use crate::food::PetType;

    #[test]
    fn test_bundled_foods_are_valid() {
        let foods = seed_foods().unwrap();
        assert_eq!(foods.len(), 9);
        for food in &foods {
            validate_create_food(food).unwrap();
        }
    }

    #[test]
    fn test_bundled_foods_cover_every_pet_type() {
        let foods = seed_foods().unwrap();
        for pet_type in [PetType::Puppy, PetType::Kitten, PetType::Bunny] {
            assert!(foods.iter().any(|f| f.pet_type == pet_type));
        }
    }
}
