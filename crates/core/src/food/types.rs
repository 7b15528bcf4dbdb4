use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::FoodError;
use crate::config::is_truthy;
use crate::serde::deserialize_optional_string;

/// Pet a food is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetType {
    Puppy,
    Kitten,
    Bunny,
}

impl PetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetType::Puppy => "puppy",
            PetType::Kitten => "kitten",
            PetType::Bunny => "bunny",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodType {
    Dry,
    Wet,
    Treats,
    Supplements,
}

impl FoodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodType::Dry => "dry",
            FoodType::Wet => "wet",
            FoodType::Treats => "treats",
            FoodType::Supplements => "supplements",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    InStock,
    OutOfStock,
    Discontinued,
    PreOrder,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::InStock => "in_stock",
            AvailabilityStatus::OutOfStock => "out_of_stock",
            AvailabilityStatus::Discontinued => "discontinued",
            AvailabilityStatus::PreOrder => "pre_order",
        }
    }

    /// Status implied by a stock level.
    pub fn from_stock(stock_quantity: u32) -> Self {
        if stock_quantity > 0 {
            AvailabilityStatus::InStock
        } else {
            AvailabilityStatus::OutOfStock
        }
    }
}

macro_rules! impl_str_enum {
    ($ty:ty, $label:literal, [$($variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = FoodError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lowered = s.trim().to_lowercase();
                [$($variant),+]
                    .into_iter()
                    .find(|v| v.as_str() == lowered)
                    .ok_or_else(|| FoodError::Validation(format!("Invalid {}: {s}", $label)))
            }
        }
    };
}

impl_str_enum!(PetType, "pet type", [PetType::Puppy, PetType::Kitten, PetType::Bunny]);
impl_str_enum!(
    FoodType,
    "food type",
    [FoodType::Dry, FoodType::Wet, FoodType::Treats, FoodType::Supplements]
);
impl_str_enum!(
    AvailabilityStatus,
    "availability status",
    [
        AvailabilityStatus::InStock,
        AvailabilityStatus::OutOfStock,
        AvailabilityStatus::Discontinued,
        AvailabilityStatus::PreOrder,
    ]
);

/// A food product as stored in the foods table.
///
/// `image` is a key relative to the assets CDN. Deleting a food only
/// deactivates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: String,
    pub pet_type: PetType,
    pub name: String,
    pub food_type: FoodType,
    pub description: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feeding_guidelines: Option<String>,
    pub availability_status: AvailabilityStatus,
    pub stock_quantity: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

/// `F` followed by eight hex digits.
pub fn generate_food_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("F{}", &id[..8])
}

impl Food {
    /// Builds a food from a creation request. The request id is kept when
    /// set, which makes seeding idempotent.
    pub fn new(request: CreateFoodRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: request.id.unwrap_or_else(generate_food_id),
            pet_type: request.pet_type,
            name: request.name.trim().to_string(),
            food_type: request.food_type,
            description: request.description.trim().to_string(),
            price: request.price,
            image: request.image,
            ingredients: request.ingredients,
            feeding_guidelines: request.feeding_guidelines,
            availability_status: AvailabilityStatus::from_stock(request.stock_quantity),
            stock_quantity: request.stock_quantity,
            created_at: now,
            updated_at: now,
            is_active: true,
        }
    }

    /// Whether the food can be put in a cart.
    pub fn is_available(&self) -> bool {
        self.is_active
            && self.availability_status == AvailabilityStatus::InStock
            && self.stock_quantity > 0
    }

    /// Applies the fields set in `update`. A stock change also moves the
    /// status between in stock and out of stock unless the update names a
    /// status itself.
    pub fn apply_update(&mut self, update: UpdateFoodRequest, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(food_type) = update.food_type {
            self.food_type = food_type;
        }
        if let Some(description) = update.description {
            self.description = description.trim().to_string();
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(image) = update.image {
            self.image = Some(image);
        }
        if let Some(ingredients) = update.ingredients {
            self.ingredients = ingredients;
        }
        if let Some(guidelines) = update.feeding_guidelines {
            self.feeding_guidelines = Some(guidelines);
        }
        if let Some(stock) = update.stock_quantity {
            self.set_stock(stock, now);
        }
        if let Some(status) = update.availability_status {
            self.availability_status = status;
        }
        self.updated_at = now;
    }

    /// Sets the stock. Discontinued and pre-order foods keep their status.
    pub fn set_stock(&mut self, stock_quantity: u32, now: DateTime<Utc>) {
        self.stock_quantity = stock_quantity;
        if matches!(
            self.availability_status,
            AvailabilityStatus::InStock | AvailabilityStatus::OutOfStock
        ) {
            self.availability_status = AvailabilityStatus::from_stock(stock_quantity);
        }
        self.updated_at = now;
    }

    /// Soft delete.
    pub fn discontinue(&mut self, now: DateTime<Utc>) {
        self.is_active = false;
        self.availability_status = AvailabilityStatus::Discontinued;
        self.updated_at = now;
    }

    /// Full image URL under `cdn_url`, or an empty string without an image.
    pub fn image_url(&self, cdn_url: &str) -> String {
        match &self.image {
            Some(image) if cdn_url.is_empty() => image.clone(),
            Some(image) => format!("{}/{}", cdn_url.trim_end_matches('/'), image),
            None => String::new(),
        }
    }
}

/// A food as returned by the API, with the image resolved to a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodView {
    #[serde(flatten)]
    pub food: Food,
    pub image_url: String,
}

impl FoodView {
    pub fn new(food: Food, cdn_url: &str) -> Self {
        let image_url = food.image_url(cdn_url);
        Self { food, image_url }
    }
}

/// Body of `GET /api/foods`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodList {
    pub foods: Vec<FoodView>,
    pub total_count: usize,
}

/// Body of `POST /api/foods`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFoodRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub pet_type: PetType,
    pub name: String,
    pub food_type: FoodType,
    pub description: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feeding_guidelines: Option<String>,
    #[serde(default)]
    pub stock_quantity: u32,
}

/// Body of `PUT /api/foods/{food_id}`. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateFoodRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_type: Option<FoodType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feeding_guidelines: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_status: Option<AvailabilityStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<u32>,
}

/// Typed filters over the foods table. Inactive foods never match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodFilters {
    pub pet_type: Option<PetType>,
    pub food_type: Option<FoodType>,
    pub availability_status: Option<AvailabilityStatus>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub search_term: Option<String>,
    pub in_stock_only: bool,
}

impl FoodFilters {
    pub fn matches(&self, food: &Food) -> bool {
        if !food.is_active {
            return false;
        }
        if self.pet_type.is_some_and(|p| p != food.pet_type) {
            return false;
        }
        if self.food_type.is_some_and(|t| t != food.food_type) {
            return false;
        }
        if self
            .availability_status
            .is_some_and(|s| s != food.availability_status)
        {
            return false;
        }
        if self.min_price.is_some_and(|min| food.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| food.price > max) {
            return false;
        }
        if self.in_stock_only && !food.is_available() {
            return false;
        }
        match &self.search_term {
            Some(term) => {
                let term = term.to_lowercase();
                food.name.to_lowercase().contains(&term)
                    || food.description.to_lowercase().contains(&term)
                    || food
                        .ingredients
                        .iter()
                        .any(|i| i.to_lowercase().contains(&term))
            }
            None => true,
        }
    }
}

/// Raw query string of `GET /api/foods`.
///
/// `pettype` and `foodtype` are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FoodQuery {
    #[serde(default, alias = "pettype")]
    #[serde(deserialize_with = "deserialize_optional_string")]
    pub pet_type: Option<String>,
    #[serde(default, alias = "foodtype")]
    #[serde(deserialize_with = "deserialize_optional_string")]
    pub food_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub availability_status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub min_price: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub max_price: Option<String>,
    #[serde(default, alias = "search_term")]
    #[serde(deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub in_stock_only: Option<String>,
}

impl FoodQuery {
    /// Parses the query into typed filters.
    pub fn filters(&self) -> Result<FoodFilters, FoodError> {
        fn price(name: &str, value: Option<&str>) -> Result<Option<Decimal>, FoodError> {
            value
                .map(|v| {
                    v.trim()
                        .parse::<Decimal>()
                        .map_err(|_| FoodError::Validation(format!("Invalid {name}: {v}")))
                })
                .transpose()
        }

        let filters = FoodFilters {
            pet_type: self.pet_type.as_deref().map(str::parse).transpose()?,
            food_type: self.food_type.as_deref().map(str::parse).transpose()?,
            availability_status: self
                .availability_status
                .as_deref()
                .map(str::parse)
                .transpose()?,
            min_price: price("min_price", self.min_price.as_deref())?,
            max_price: price("max_price", self.max_price.as_deref())?,
            search_term: self.search.as_ref().map(|s| s.trim().to_string()),
            in_stock_only: self
                .in_stock_only
                .as_deref()
                .is_some_and(is_truthy),
        };

        if let (Some(min), Some(max)) = (filters.min_price, filters.max_price) {
            if min > max {
                return Err(FoodError::Validation(
                    "min_price must not exceed max_price".to_string(),
                ));
            }
        }
        Ok(filters)
    }
}
