use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Cart, Food, FoodError};

/// 8% sales tax.
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);
/// Orders from 50.00 ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
/// 5.99
pub const SHIPPING_FEE: Decimal = Decimal::from_parts(599, 0, 0, false, 2);
pub const DELIVERY_DAYS: i64 = 5;

/// Body of `POST /api/cart/{user_id}/checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard {
        card_number: String,
        expiry_month: u8,
        expiry_year: u16,
        cvv: String,
        cardholder_name: String,
    },
    Paypal {
        email: String,
    },
    BankTransfer {
        account_number: String,
        routing_number: String,
    },
}

impl PaymentMethod {
    pub fn validate(&self) -> Result<(), FoodError> {
        let invalid = |message: &str| Err(FoodError::Validation(message.to_string()));
        let digits = |s: &str, range: std::ops::RangeInclusive<usize>| {
            range.contains(&s.len()) && s.chars().all(|c| c.is_ascii_digit())
        };
        match self {
            PaymentMethod::CreditCard {
                card_number,
                expiry_month,
                cvv,
                cardholder_name,
                ..
            } => {
                if !digits(card_number, 13..=19) {
                    return invalid("card number must be 13 to 19 digits");
                }
                if !(1..=12).contains(expiry_month) {
                    return invalid("expiry month must be between 1 and 12");
                }
                if !digits(cvv, 3..=4) {
                    return invalid("cvv must be 3 or 4 digits");
                }
                if cardholder_name.trim().is_empty() {
                    return invalid("cardholder name must not be empty");
                }
                Ok(())
            }
            PaymentMethod::Paypal { email } => {
                if email.contains('@') {
                    Ok(())
                } else {
                    invalid("paypal email is invalid")
                }
            }
            PaymentMethod::BankTransfer {
                account_number,
                routing_number,
            } => {
                if digits(account_number, 4..=17) && digits(routing_number, 9..=9) {
                    Ok(())
                } else {
                    invalid("bank account or routing number is invalid")
                }
            }
        }
    }

    /// Label stored on the order. Card numbers are reduced to their last
    /// four digits.
    pub fn label(&self) -> String {
        match self {
            PaymentMethod::CreditCard { card_number, .. } => {
                let last_four = &card_number[card_number.len().saturating_sub(4)..];
                format!("credit_card ending in {last_four}")
            }
            PaymentMethod::Paypal { .. } => "paypal".to_string(),
            PaymentMethod::BankTransfer { .. } => "bank_transfer".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl Address {
    pub fn validate(&self) -> Result<(), FoodError> {
        let fields = [
            ("name", &self.name),
            ("street", &self.street),
            ("city", &self.city),
            ("state", &self.state),
            ("zip_code", &self.zip_code),
            ("country", &self.country),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(FoodError::Validation(format!(
                "address {field} must not be empty"
            ))),
            None => Ok(()),
        }
    }
}

impl CheckoutRequest {
    pub fn validate(&self) -> Result<(), FoodError> {
        self.payment_method.validate()?;
        for address in [&self.shipping_address, &self.billing_address]
            .into_iter()
            .flatten()
        {
            address.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub food_id: String,
    pub food_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// Body returned by a successful checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub order_id: String,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total_amount: Decimal,
    pub payment_method: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub estimated_delivery: DateTime<Utc>,
}

/// `ORD-` followed by eight upper-case hex digits.
pub fn generate_order_id() -> String {
    let id = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("ORD-{}", &id[..8])
}

fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Prices a cart against the current foods.
///
/// Every line must name an available food with enough stock. Lines are
/// charged at the current price, not the price when they were added.
pub fn price_order(
    cart: &Cart,
    foods: &HashMap<String, Food>,
    payment_method: &PaymentMethod,
    now: DateTime<Utc>,
) -> Result<CheckoutResponse, FoodError> {
    if cart.is_empty() {
        return Err(FoodError::EmptyCart);
    }

    let mut items = Vec::with_capacity(cart.items.len());
    for item in &cart.items {
        let food = foods
            .get(&item.food_id)
            .ok_or_else(|| FoodError::FoodNotFound(item.food_id.clone()))?;
        if !food.is_available() {
            return Err(FoodError::ProductUnavailable(food.id.clone()));
        }
        if food.stock_quantity < item.quantity {
            return Err(FoodError::InsufficientStock {
                food_id: food.id.clone(),
                requested: item.quantity,
                available: food.stock_quantity,
            });
        }
        items.push(OrderItem {
            food_id: food.id.clone(),
            food_name: food.name.clone(),
            quantity: item.quantity,
            unit_price: food.price,
            total_price: food.price * Decimal::from(item.quantity),
        });
    }

    let subtotal: Decimal = items.iter().map(|i| i.total_price).sum();
    let tax = round_cents(subtotal * TAX_RATE);
    let shipping = if subtotal >= FREE_SHIPPING_THRESHOLD {
        Decimal::ZERO
    } else {
        SHIPPING_FEE
    };

    Ok(CheckoutResponse {
        order_id: generate_order_id(),
        user_id: cart.user_id.clone(),
        items,
        subtotal,
        tax,
        shipping,
        total_amount: subtotal + tax + shipping,
        payment_method: payment_method.label(),
        status: OrderStatus::Confirmed,
        created_at: now,
        estimated_delivery: now + Duration::days(DELIVERY_DAYS),
    })
}
