//! Attribute conversions for the pet foods and carts tables.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use petadoptions_core::food::{Cart, CartItem, Food};
use petadoptions_core::storage::RepositoryError;

type Item = HashMap<String, AttributeValue>;

/// Partition key of the foods table.
pub const ATTR_FOOD_ID: &str = "id";
/// Partition key of the carts table.
pub const ATTR_USER_ID: &str = "user_id";

pub fn food_key(food_id: &str) -> Item {
    HashMap::from([(
        ATTR_FOOD_ID.to_string(),
        AttributeValue::S(food_id.to_string()),
    )])
}

pub fn cart_key(user_id: &str) -> Item {
    HashMap::from([(
        ATTR_USER_ID.to_string(),
        AttributeValue::S(user_id.to_string()),
    )])
}

fn s(value: impl Into<String>) -> AttributeValue {
    AttributeValue::S(value.into())
}

fn n(value: impl ToString) -> AttributeValue {
    AttributeValue::N(value.to_string())
}

fn timestamp(value: &DateTime<Utc>) -> AttributeValue {
    AttributeValue::S(value.to_rfc3339())
}

pub fn food_to_item(food: &Food) -> Item {
    let mut item = food_key(&food.id);
    item.insert("pet_type".to_string(), s(food.pet_type.as_str()));
    item.insert("name".to_string(), s(&food.name));
    item.insert("food_type".to_string(), s(food.food_type.as_str()));
    item.insert("description".to_string(), s(&food.description));
    item.insert("price".to_string(), n(food.price));
    item.insert(
        "ingredients".to_string(),
        AttributeValue::L(food.ingredients.iter().map(s).collect()),
    );
    item.insert(
        "availability_status".to_string(),
        s(food.availability_status.as_str()),
    );
    item.insert("stock_quantity".to_string(), n(food.stock_quantity));
    item.insert("created_at".to_string(), timestamp(&food.created_at));
    item.insert("updated_at".to_string(), timestamp(&food.updated_at));
    item.insert("is_active".to_string(), AttributeValue::Bool(food.is_active));
    if let Some(image) = &food.image {
        item.insert("image".to_string(), s(image));
    }
    if let Some(guidelines) = &food.feeding_guidelines {
        item.insert("feeding_guidelines".to_string(), s(guidelines));
    }
    item
}

pub fn item_to_food(item: &Item) -> Result<Food, RepositoryError> {
    Ok(Food {
        id: get_string(item, ATTR_FOOD_ID)?,
        pet_type: parse(item, "pet_type")?,
        name: get_string(item, "name")?,
        food_type: parse(item, "food_type")?,
        description: get_optional_string(item, "description").unwrap_or_default(),
        price: parse(item, "price")?,
        image: get_optional_string(item, "image"),
        ingredients: get_string_list(item, "ingredients"),
        feeding_guidelines: get_optional_string(item, "feeding_guidelines"),
        availability_status: parse(item, "availability_status")?,
        stock_quantity: parse(item, "stock_quantity")?,
        created_at: get_timestamp(item, "created_at")?,
        updated_at: get_timestamp(item, "updated_at")?,
        is_active: !matches!(item.get("is_active"), Some(AttributeValue::Bool(false))),
    })
}

pub fn cart_to_item(cart: &Cart) -> Item {
    let items = cart
        .items
        .iter()
        .map(|i| {
            AttributeValue::M(HashMap::from([
                ("food_id".to_string(), s(&i.food_id)),
                ("quantity".to_string(), n(i.quantity)),
                ("unit_price".to_string(), n(i.unit_price)),
                ("added_at".to_string(), timestamp(&i.added_at)),
            ]))
        })
        .collect();

    let mut item = cart_key(&cart.user_id);
    item.insert("items".to_string(), AttributeValue::L(items));
    item.insert("created_at".to_string(), timestamp(&cart.created_at));
    item.insert("updated_at".to_string(), timestamp(&cart.updated_at));
    item
}

pub fn item_to_cart(item: &Item) -> Result<Cart, RepositoryError> {
    let items = match item.get("items") {
        Some(AttributeValue::L(lines)) => lines
            .iter()
            .map(|line| match line {
                AttributeValue::M(line) => Ok(CartItem {
                    food_id: get_string(line, "food_id")?,
                    quantity: parse(line, "quantity")?,
                    unit_price: parse(line, "unit_price")?,
                    added_at: get_timestamp(line, "added_at")?,
                }),
                _ => Err(RepositoryError::Serialization(
                    "Cart item is not a map".to_string(),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?,
        _ => Vec::new(),
    };

    Ok(Cart {
        user_id: get_string(item, ATTR_USER_ID)?,
        items,
        created_at: get_timestamp(item, "created_at")?,
        updated_at: get_timestamp(item, "updated_at")?,
    })
}

fn get_optional_string(item: &Item, key: &str) -> Option<String> {
    match item.get(key) {
        Some(AttributeValue::S(s)) | Some(AttributeValue::N(s)) => Some(s.clone()),
        _ => None,
    }
}

fn get_string(item: &Item, key: &str) -> Result<String, RepositoryError> {
    get_optional_string(item, key)
        .ok_or_else(|| RepositoryError::Serialization(format!("Missing or invalid field: {key}")))
}

fn get_string_list(item: &Item, key: &str) -> Vec<String> {
    match item.get(key) {
        Some(AttributeValue::L(values)) => values
            .iter()
            .filter_map(|v| v.as_s().ok().cloned())
            .collect(),
        Some(AttributeValue::Ss(values)) => values.clone(),
        _ => Vec::new(),
    }
}

fn parse<T: std::str::FromStr>(item: &Item, key: &str) -> Result<T, RepositoryError> {
    get_string(item, key)?
        .parse()
        .map_err(|_| RepositoryError::Serialization(format!("Invalid value for field: {key}")))
}

fn get_timestamp(item: &Item, key: &str) -> Result<DateTime<Utc>, RepositoryError> {
    let value = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Serialization(format!("Invalid timestamp in {key}: {e}")))
}
