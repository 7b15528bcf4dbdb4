use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::validation::{validate_cart_quantity, MAX_CART_QUANTITY};
use super::{Food, FoodError};

/// A user's cart, one row per user in the carts table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One food in a cart. `unit_price` is the price when the item was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub food_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    pub fn total_price(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

impl Cart {
    pub fn new(user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn item(&self, food_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.food_id == food_id)
    }

    /// Quantity of `food_id` already in the cart.
    pub fn quantity_of(&self, food_id: &str) -> u32 {
        self.item(food_id).map_or(0, |i| i.quantity)
    }

    /// Adds `quantity` of a food. An existing line is merged and takes the
    /// current price.
    pub fn add_item(
        &mut self,
        food: &Food,
        quantity: u32,
        now: DateTime<Utc>,
    ) -> Result<&CartItem, FoodError> {
        validate_cart_quantity(quantity)?;
        let merged = self.quantity_of(&food.id) + quantity;
        if merged > MAX_CART_QUANTITY {
            return Err(FoodError::Validation(format!(
                "quantity must be between 1 and {MAX_CART_QUANTITY}"
            )));
        }

        let index = match self.items.iter().position(|i| i.food_id == food.id) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = merged;
                item.unit_price = food.price;
                index
            }
            None => {
                self.items.push(CartItem {
                    food_id: food.id.clone(),
                    quantity,
                    unit_price: food.price,
                    added_at: now,
                });
                self.items.len() - 1
            }
        };
        self.updated_at = now;
        Ok(&self.items[index])
    }

    /// Replaces the quantity of an existing line.
    pub fn update_item(
        &mut self,
        food_id: &str,
        quantity: u32,
        now: DateTime<Utc>,
    ) -> Result<&CartItem, FoodError> {
        validate_cart_quantity(quantity)?;
        let user_id = &self.user_id;
        let item = self
            .items
            .iter_mut()
            .find(|i| i.food_id == food_id)
            .ok_or_else(|| FoodError::CartItemNotFound {
                user_id: user_id.clone(),
                food_id: food_id.to_string(),
            })?;
        item.quantity = quantity;
        self.updated_at = now;
        Ok(item)
    }

    pub fn remove_item(&mut self, food_id: &str, now: DateTime<Utc>) -> Result<(), FoodError> {
        let before = self.items.len();
        self.items.retain(|i| i.food_id != food_id);
        if self.items.len() == before {
            return Err(FoodError::CartItemNotFound {
                user_id: self.user_id.clone(),
                food_id: food_id.to_string(),
            });
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn clear(&mut self, now: DateTime<Utc>) {
        self.items.clear();
        self.updated_at = now;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartItem::total_price).sum()
    }
}

/// Body of `POST /api/cart/{user_id}/items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCartItemRequest {
    pub food_id: String,
    pub quantity: u32,
}

/// Body of `PUT /api/cart/{user_id}/items/{food_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: u32,
}

/// A cart line joined with its food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub food_id: String,
    pub food_name: String,
    pub food_image: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub is_available: bool,
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    pub fn new(item: &CartItem, food: &Food, cdn_url: &str) -> Self {
        Self {
            food_id: item.food_id.clone(),
            food_name: food.name.clone(),
            food_image: food.image_url(cdn_url),
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_price: item.total_price(),
            is_available: food.is_available() && food.stock_quantity >= item.quantity,
            added_at: item.added_at,
        }
    }
}

/// Body of `GET /api/cart/{user_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartView {
    pub user_id: String,
    pub items: Vec<CartLine>,
    pub total_items: u32,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CartView {
    /// Lines whose food no longer exists are left out of the view and of
    /// its totals.
    pub fn new(cart: &Cart, foods: &HashMap<String, Food>, cdn_url: &str) -> Self {
        let items: Vec<CartLine> = cart
            .items
            .iter()
            .filter_map(|item| {
                foods
                    .get(&item.food_id)
                    .map(|food| CartLine::new(item, food, cdn_url))
            })
            .collect();

        Self {
            user_id: cart.user_id.clone(),
            total_items: items.iter().map(|l| l.quantity).sum(),
            total_price: items.iter().map(|l| l.total_price).sum(),
            items,
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::{CreateFoodRequest, FoodType, PetType};
    use rust_decimal_macros::dec;

    fn food(id: &str, price: Decimal) -> Food {
        Food::new(
            CreateFoodRequest {
                id: Some(id.to_string()),
                pet_type: PetType::Kitten,
                name: format!("Food {id}"),
                food_type: FoodType::Wet,
                description: "Tasty wet food for kittens".to_string(),
                price,
                image: None,
                ingredients: vec![],
                feeding_guidelines: None,
                stock_quantity: 20,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_add_item_merges_quantities() {
        let mut cart = Cart::new("u1", Utc::now());
        let tuna = food("F1", dec!(2.50));
        cart.add_item(&tuna, 2, Utc::now()).unwrap();
        let item = cart.add_item(&tuna, 3, Utc::now()).unwrap();
        assert_eq!(item.quantity, 5);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_price(), dec!(12.50));
    }

    #[test]
    fn test_add_item_rejects_merged_overflow() {
        let mut cart = Cart::new("u1", Utc::now());
        let tuna = food("F1", dec!(1));
        cart.add_item(&tuna, 1000, Utc::now()).unwrap();
        assert!(matches!(
            cart.add_item(&tuna, 1, Utc::now()),
            Err(FoodError::Validation(_))
        ));
    }

    #[test]
    fn test_update_and_remove_missing_item() {
        let mut cart = Cart::new("u1", Utc::now());
        assert!(matches!(
            cart.update_item("F9", 1, Utc::now()),
            Err(FoodError::CartItemNotFound { .. })
        ));
        assert!(cart.remove_item("F9", Utc::now()).is_err());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new("u1", Utc::now());
        cart.add_item(&food("F1", dec!(1)), 1, Utc::now()).unwrap();
        cart.add_item(&food("F2", dec!(2)), 1, Utc::now()).unwrap();
        cart.remove_item("F1", Utc::now()).unwrap();
        assert_eq!(cart.quantity_of("F2"), 1);
        cart.clear(Utc::now());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_view_skips_missing_foods() {
        let mut cart = Cart::new("u1", Utc::now());
        let kept = food("F1", dec!(3));
        cart.add_item(&kept, 2, Utc::now()).unwrap();
        cart.add_item(&food("F2", dec!(4)), 1, Utc::now()).unwrap();

        let foods = HashMap::from([(kept.id.clone(), kept)]);
        let view = CartView::new(&cart, &foods, "");
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.total_items, 2);
        assert_eq!(view.total_price, dec!(6));
        assert!(view.items[0].is_available);
    }
}
