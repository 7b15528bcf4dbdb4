//! Input limits for foods and cart items.

use rust_decimal::Decimal;

use super::{CreateFoodRequest, FoodError, UpdateFoodRequest};

pub const MAX_FOOD_NAME_LENGTH: usize = 200;
pub const MIN_DESCRIPTION_LENGTH: usize = 10;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;
pub const MAX_INGREDIENTS: usize = 50;
pub const MAX_INGREDIENT_LENGTH: usize = 100;
pub const MAX_FEEDING_GUIDELINES_LENGTH: usize = 500;
pub const MAX_STOCK_QUANTITY: u32 = 999_999;
pub const MAX_CART_QUANTITY: u32 = 1000;
pub const MAX_USER_ID_LENGTH: usize = 100;

/// 0.01
pub const MIN_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
/// 9999.99
pub const MAX_PRICE: Decimal = Decimal::from_parts(999_999, 0, 0, false, 2);

fn invalid(message: impl Into<String>) -> FoodError {
    FoodError::Validation(message.into())
}

pub fn validate_name(name: &str) -> Result<(), FoodError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid("name must not be empty"));
    }
    if name.len() > MAX_FOOD_NAME_LENGTH {
        return Err(invalid(format!(
            "name must be at most {MAX_FOOD_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), FoodError> {
    let length = description.trim().len();
    if !(MIN_DESCRIPTION_LENGTH..=MAX_DESCRIPTION_LENGTH).contains(&length) {
        return Err(invalid(format!(
            "description must be {MIN_DESCRIPTION_LENGTH} to {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Between 0.01 and 9999.99 with at most two decimals.
pub fn validate_price(price: Decimal) -> Result<(), FoodError> {
    if price < MIN_PRICE || price > MAX_PRICE {
        return Err(invalid(format!(
            "price must be between {MIN_PRICE} and {MAX_PRICE}"
        )));
    }
    if price.scale() > 2 {
        return Err(invalid("price must have at most two decimal places"));
    }
    Ok(())
}

pub fn validate_ingredients(ingredients: &[String]) -> Result<(), FoodError> {
    if ingredients.len() > MAX_INGREDIENTS {
        return Err(invalid(format!(
            "at most {MAX_INGREDIENTS} ingredients are allowed"
        )));
    }
    for ingredient in ingredients {
        let ingredient = ingredient.trim();
        if ingredient.is_empty() || ingredient.len() > MAX_INGREDIENT_LENGTH {
            return Err(invalid(format!(
                "ingredients must be 1 to {MAX_INGREDIENT_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

pub fn validate_feeding_guidelines(guidelines: Option<&str>) -> Result<(), FoodError> {
    match guidelines {
        Some(g) if g.trim().len() > MAX_FEEDING_GUIDELINES_LENGTH => Err(invalid(format!(
            "feeding guidelines must be at most {MAX_FEEDING_GUIDELINES_LENGTH} characters"
        ))),
        _ => Ok(()),
    }
}

pub fn validate_stock(stock_quantity: u32) -> Result<(), FoodError> {
    if stock_quantity > MAX_STOCK_QUANTITY {
        return Err(invalid(format!(
            "stock quantity must be at most {MAX_STOCK_QUANTITY}"
        )));
    }
    Ok(())
}

/// Ids look like `F1a2b3c4d`.
pub fn validate_food_id(food_id: &str) -> Result<(), FoodError> {
    let food_id = food_id.trim();
    if food_id.len() < 2 || !food_id.starts_with('F') {
        return Err(invalid(format!("Invalid food id: {food_id}")));
    }
    Ok(())
}

/// Cart quantities run from 1 to 1000.
pub fn validate_cart_quantity(quantity: u32) -> Result<(), FoodError> {
    if !(1..=MAX_CART_QUANTITY).contains(&quantity) {
        return Err(invalid(format!(
            "quantity must be between 1 and {MAX_CART_QUANTITY}"
        )));
    }
    Ok(())
}

pub fn validate_user_id(user_id: &str) -> Result<(), FoodError> {
    let user_id = user_id.trim();
    if user_id.is_empty() || user_id.len() > MAX_USER_ID_LENGTH {
        return Err(invalid(format!(
            "user id must be 1 to {MAX_USER_ID_LENGTH} characters"
        )));
    }
    if !user_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'))
    {
        return Err(invalid(format!("Invalid user id: {user_id}")));
    }
    Ok(())
}

pub fn validate_create_food(request: &CreateFoodRequest) -> Result<(), FoodError> {
    if let Some(id) = &request.id {
        validate_food_id(id)?;
    }
    validate_name(&request.name)?;
    validate_description(&request.description)?;
    validate_price(request.price)?;
    validate_ingredients(&request.ingredients)?;
    validate_feeding_guidelines(request.feeding_guidelines.as_deref())?;
    validate_stock(request.stock_quantity)
}

pub fn validate_update_food(update: &UpdateFoodRequest) -> Result<(), FoodError> {
    if let Some(name) = &update.name {
        validate_name(name)?;
    }
    if let Some(description) = &update.description {
        validate_description(description)?;
    }
    if let Some(price) = update.price {
        validate_price(price)?;
    }
    if let Some(ingredients) = &update.ingredients {
        validate_ingredients(ingredients)?;
    }
    validate_feeding_guidelines(update.feeding_guidelines.as_deref())?;
    if let Some(stock) = update.stock_quantity {
        validate_stock(stock)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_limits() {
        assert!(validate_price(dec!(0.01)).is_ok());
        assert!(validate_price(dec!(9999.99)).is_ok());
        assert!(validate_price(dec!(0)).is_err());
        assert!(validate_price(dec!(10000)).is_err());
        assert!(validate_price(dec!(1.999)).is_err());
    }

    #[test]
    fn test_description_length() {
        assert!(validate_description("too short").is_err());
        assert!(validate_description("long enough text").is_ok());
    }

    #[test]
    fn test_food_id_shape() {
        assert!(validate_food_id("F1a2b3c4d").is_ok());
        assert!(validate_food_id("F").is_err());
        assert!(validate_food_id("P123").is_err());
    }

    #[test]
    fn test_cart_quantity_bounds() {
        assert!(validate_cart_quantity(0).is_err());
        assert!(validate_cart_quantity(1).is_ok());
        assert!(validate_cart_quantity(1000).is_ok());
        assert!(validate_cart_quantity(1001).is_err());
    }

    #[test]
    fn test_user_id_characters() {
        assert!(validate_user_id("user-01").is_ok());
        assert!(validate_user_id("jane@example.com").is_ok());
        assert!(validate_user_id("").is_err());
        assert!(validate_user_id("a b").is_err());
    }

    #[test]
    fn test_update_validates_only_set_fields() {
        assert!(validate_update_food(&UpdateFoodRequest::default()).is_ok());
        let update = UpdateFoodRequest {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(validate_update_food(&update).is_err());
    }
}
