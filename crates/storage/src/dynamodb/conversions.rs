//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! pets. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use petadoptions_core::pet::Pet;
use petadoptions_core::storage::RepositoryError;

// ============================================================================
// Attribute names
// ============================================================================

pub const ATTR_PET_TYPE: &str = "pettype";
pub const ATTR_PET_ID: &str = "petid";
pub const ATTR_PET_COLOR: &str = "petcolor";
pub const ATTR_AVAILABILITY: &str = "availability";
pub const ATTR_CUTENESS_RATE: &str = "cuteness_rate";
pub const ATTR_PRICE: &str = "price";
pub const ATTR_IMAGE: &str = "image";

// ============================================================================
// Pet conversions
// ============================================================================

/// Key of a pet: partition `pettype`, sort `petid`.
pub fn pet_key(pettype: &str, petid: &str) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            ATTR_PET_TYPE.to_string(),
            AttributeValue::S(pettype.to_string()),
        ),
        (ATTR_PET_ID.to_string(), AttributeValue::S(petid.to_string())),
    ])
}

/// Convert a Pet to DynamoDB item.
pub fn pet_to_item(pet: &Pet) -> HashMap<String, AttributeValue> {
    let mut item = pet_key(&pet.pettype, &pet.petid);

    for (name, value) in [
        (ATTR_PET_COLOR, &pet.petcolor),
        (ATTR_AVAILABILITY, &pet.availability),
        (ATTR_CUTENESS_RATE, &pet.cuteness_rate),
        (ATTR_PRICE, &pet.price),
        (ATTR_IMAGE, &pet.image),
    ] {
        // Empty attributes are omitted.
        if !value.is_empty() {
            item.insert(name.to_string(), AttributeValue::S(value.clone()));
        }
    }

    item
}

/// Convert a DynamoDB item to Pet.
pub fn item_to_pet(item: &HashMap<String, AttributeValue>) -> Result<Pet, RepositoryError> {
    Ok(Pet {
        petid: get_string(item, ATTR_PET_ID)?,
        pettype: get_string(item, ATTR_PET_TYPE)?,
        petcolor: get_optional_string(item, ATTR_PET_COLOR).unwrap_or_default(),
        availability: get_optional_string(item, ATTR_AVAILABILITY).unwrap_or_default(),
        cuteness_rate: get_optional_string(item, ATTR_CUTENESS_RATE).unwrap_or_default(),
        price: get_optional_string(item, ATTR_PRICE).unwrap_or_default(),
        image: get_optional_string(item, ATTR_IMAGE).unwrap_or_default(),
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Read a string attribute. Numbers are accepted and returned verbatim.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    get_optional_string(item, key)
        .ok_or_else(|| RepositoryError::Serialization(format!("Missing or invalid field: {key}")))
}

fn get_optional_string(item: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    match item.get(key) {
        Some(AttributeValue::S(s)) | Some(AttributeValue::N(s)) => Some(s.clone()),
        _ => None,
    }
}
