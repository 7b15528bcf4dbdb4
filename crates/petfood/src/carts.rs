//! Cart operations and checkout.

use std::collections::HashMap;

use chrono::Utc;
use futures_util::future::try_join_all;
use petadoptions_core::food::validation::{validate_food_id, validate_user_id};
use petadoptions_core::food::{
    price_order, AddCartItemRequest, Cart, CartLine, CartView, CheckoutRequest, CheckoutResponse,
    Food, FoodError, UpdateCartItemRequest,
};

use crate::catalog::get_food;
use crate::state::AppState;

/// Foods referenced by a cart that still exist, keyed by id.
async fn foods_in(state: &AppState, cart: &Cart) -> anyhow::Result<HashMap<String, Food>> {
    let foods = try_join_all(cart.items.iter().map(|i| state.foods.get_food(&i.food_id))).await?;
    Ok(foods
        .into_iter()
        .flatten()
        .map(|f| (f.id.clone(), f))
        .collect())
}

async fn existing_cart(state: &AppState, user_id: &str) -> anyhow::Result<Cart> {
    validate_user_id(user_id)?;
    state
        .carts
        .get_cart(user_id)
        .await?
        .ok_or_else(|| FoodError::CartNotFound(user_id.to_string()).into())
}

fn ensure_stock(food: &Food, quantity: u32) -> Result<(), FoodError> {
    if !food.is_available() {
        return Err(FoodError::ProductUnavailable(food.id.clone()));
    }
    if food.stock_quantity < quantity {
        return Err(FoodError::InsufficientStock {
            food_id: food.id.clone(),
            requested: quantity,
            available: food.stock_quantity,
        });
    }
    Ok(())
}

/// The user's cart. A user without a cart gets an empty one.
pub async fn get_cart(state: &AppState, user_id: &str) -> anyhow::Result<CartView> {
    validate_user_id(user_id)?;
    let cart = state
        .carts
        .get_cart(user_id)
        .await?
        .unwrap_or_else(|| Cart::new(user_id, Utc::now()));
    let foods = foods_in(state, &cart).await?;
    Ok(CartView::new(&cart, &foods, &state.assets_cdn_url))
}

/// Adds a food, creating the cart on first use. The merged quantity must
/// fit the stock.
pub async fn add_item(
    state: &AppState,
    user_id: &str,
    request: AddCartItemRequest,
) -> anyhow::Result<CartLine> {
    validate_user_id(user_id)?;
    let food = get_food(state.foods.as_ref(), &request.food_id).await?;

    let now = Utc::now();
    let mut cart = state
        .carts
        .get_cart(user_id)
        .await?
        .unwrap_or_else(|| Cart::new(user_id, now));
    ensure_stock(&food, cart.quantity_of(&food.id) + request.quantity)?;

    let line = CartLine::new(
        cart.add_item(&food, request.quantity, now)?,
        &food,
        &state.assets_cdn_url,
    );
    state.carts.put_cart(&cart).await?;

    tracing::info!(user_id, food_id = %food.id, quantity = line.quantity, "Item added to cart");
    Ok(line)
}

pub async fn update_item(
    state: &AppState,
    user_id: &str,
    food_id: &str,
    request: UpdateCartItemRequest,
) -> anyhow::Result<CartLine> {
    validate_food_id(food_id)?;
    let mut cart = existing_cart(state, user_id).await?;
    let food = get_food(state.foods.as_ref(), food_id).await?;
    ensure_stock(&food, request.quantity)?;

    let line = CartLine::new(
        cart.update_item(food_id, request.quantity, Utc::now())?,
        &food,
        &state.assets_cdn_url,
    );
    state.carts.put_cart(&cart).await?;

    tracing::info!(user_id, food_id, quantity = line.quantity, "Cart item updated");
    Ok(line)
}

pub async fn remove_item(state: &AppState, user_id: &str, food_id: &str) -> anyhow::Result<()> {
    let mut cart = existing_cart(state, user_id).await?;
    cart.remove_item(food_id, Utc::now())?;
    state.carts.put_cart(&cart).await?;

    tracing::info!(user_id, food_id, "Cart item removed");
    Ok(())
}

/// Empties the cart. Clearing a cart that does not exist succeeds.
pub async fn clear_cart(state: &AppState, user_id: &str) -> anyhow::Result<()> {
    validate_user_id(user_id)?;
    if let Some(mut cart) = state.carts.get_cart(user_id).await? {
        cart.clear(Utc::now());
        state.carts.put_cart(&cart).await?;
    }

    tracing::info!(user_id, "Cart cleared");
    Ok(())
}

pub async fn delete_cart(state: &AppState, user_id: &str) -> anyhow::Result<()> {
    validate_user_id(user_id)?;
    if !state.carts.delete_cart(user_id).await? {
        return Err(FoodError::CartNotFound(user_id.to_string()).into());
    }

    tracing::info!(user_id, "Cart deleted");
    Ok(())
}

/// Prices the cart, takes the ordered quantities out of stock and deletes
/// the cart.
///
/// Stock is written food by food without a transaction, so a failure part
/// way leaves the earlier foods decremented and the cart in place.
pub async fn checkout(
    state: &AppState,
    user_id: &str,
    request: CheckoutRequest,
) -> anyhow::Result<CheckoutResponse> {
    request.validate()?;
    let cart = existing_cart(state, user_id).await?;
    let mut foods = foods_in(state, &cart).await?;

    let now = Utc::now();
    let order = price_order(&cart, &foods, &request.payment_method, now)?;

    for item in &order.items {
        if let Some(food) = foods.get_mut(&item.food_id) {
            food.set_stock(food.stock_quantity.saturating_sub(item.quantity), now);
            state.foods.put_food(food).await?;
        }
    }
    state.carts.delete_cart(user_id).await?;

    tracing::info!(
        user_id,
        order_id = %order.order_id,
        total = %order.total_amount,
        items = order.items.len(),
        "Order placed"
    );
    Ok(order)
}
