//! DynamoDB pet foods and carts repositories.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType, ReturnValue,
    ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;

use petadoptions_core::food::{Cart, Food, FoodFilters};
use petadoptions_core::retry::{retry, RetryPolicy};
use petadoptions_core::storage::{CartRepository, FoodRepository, RepositoryError, Result};

use super::error::{map_item_error, map_scan_error};
use super::food_conversions::{
    cart_key, cart_to_item, food_key, food_to_item, item_to_cart, item_to_food, ATTR_FOOD_ID,
    ATTR_USER_ID,
};

/// Creates a pay-per-request table with a string hash key. An existing
/// table is left alone.
async fn ensure_table(
    client: &Client,
    policy: &RetryPolicy,
    table_name: &str,
    hash_key: &str,
) -> Result<String> {
    let key_schema = KeySchemaElement::builder()
        .attribute_name(hash_key)
        .key_type(KeyType::Hash)
        .build()
        .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;
    let attribute = AttributeDefinition::builder()
        .attribute_name(hash_key)
        .attribute_type(ScalarAttributeType::S)
        .build()
        .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

    let created = retry(policy, || {
        let request = client
            .create_table()
            .table_name(table_name)
            .key_schema(key_schema.clone())
            .attribute_definitions(attribute.clone())
            .billing_mode(BillingMode::PayPerRequest);

        async move {
            match request.send().await {
                Ok(_) => Ok(true),
                Err(err)
                    if err
                        .as_service_error()
                        .is_some_and(|e| e.is_resource_in_use_exception()) =>
                {
                    Ok(false)
                }
                Err(err) => Err(map_item_error(err, "CreateTable")),
            }
        }
    })
    .await?;

    if created {
        tracing::info!(table = table_name, "Table created");
    } else {
        tracing::info!(table = table_name, "Table already exists");
    }
    Ok(table_name.to_string())
}

/// Pet foods table on DynamoDB, keyed by `id`.
#[derive(Debug, Clone)]
pub struct DynamoDbFoodRepository {
    client: Client,
    table_name: String,
    policy: RetryPolicy,
}

impl DynamoDbFoodRepository {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            policy: RetryPolicy::default(),
        }
    }

    pub fn from_sdk_config(config: &aws_config::SdkConfig, table_name: impl Into<String>) -> Self {
        Self::new(Client::new(config), table_name)
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[async_trait]
impl FoodRepository for DynamoDbFoodRepository {
    async fn create_table(&self) -> Result<String> {
        ensure_table(&self.client, &self.policy, &self.table_name, ATTR_FOOD_ID).await
    }

    /// Scans the whole table and filters in process. The table holds a
    /// catalog, not orders.
    async fn list_foods(&self, filters: &FoodFilters) -> Result<Vec<Food>> {
        let mut foods = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let output = retry(&self.policy, || {
                let request = self
                    .client
                    .scan()
                    .table_name(&self.table_name)
                    .set_exclusive_start_key(start_key.clone());
                async move { request.send().await.map_err(map_scan_error) }
            })
            .await?;

            let next_key = output.last_evaluated_key;
            for item in output.items.unwrap_or_default() {
                let food = item_to_food(&item)?;
                if filters.matches(&food) {
                    foods.push(food);
                }
            }

            match next_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        tracing::debug!(table = %self.table_name, count = foods.len(), "Scanned foods");
        Ok(foods)
    }

    async fn get_food(&self, food_id: &str) -> Result<Option<Food>> {
        let output = retry(&self.policy, || {
            let request = self
                .client
                .get_item()
                .table_name(&self.table_name)
                .set_key(Some(food_key(food_id)));
            async move {
                request
                    .send()
                    .await
                    .map_err(|e| map_item_error(e, "GetItem"))
            }
        })
        .await?;

        output.item.as_ref().map(item_to_food).transpose()
    }

    async fn put_food(&self, food: &Food) -> Result<()> {
        retry(&self.policy, || {
            let request = self
                .client
                .put_item()
                .table_name(&self.table_name)
                .set_item(Some(food_to_item(food)));
            async move {
                request
                    .send()
                    .await
                    .map_err(|e| map_item_error(e, "PutItem"))
            }
        })
        .await?;

        tracing::debug!(table = %self.table_name, food_id = %food.id, "Food written");
        Ok(())
    }
}

/// Carts table on DynamoDB, keyed by `user_id`. Cart lines are a list
/// attribute of the cart item.
#[derive(Debug, Clone)]
pub struct DynamoDbCartRepository {
    client: Client,
    table_name: String,
    policy: RetryPolicy,
}

impl DynamoDbCartRepository {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            policy: RetryPolicy::default(),
        }
    }

    pub fn from_sdk_config(config: &aws_config::SdkConfig, table_name: impl Into<String>) -> Self {
        Self::new(Client::new(config), table_name)
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[async_trait]
impl CartRepository for DynamoDbCartRepository {
    async fn create_table(&self) -> Result<String> {
        ensure_table(&self.client, &self.policy, &self.table_name, ATTR_USER_ID).await
    }

    async fn get_cart(&self, user_id: &str) -> Result<Option<Cart>> {
        let output = retry(&self.policy, || {
            let request = self
                .client
                .get_item()
                .table_name(&self.table_name)
                .set_key(Some(cart_key(user_id)));
            async move {
                request
                    .send()
                    .await
                    .map_err(|e| map_item_error(e, "GetItem"))
            }
        })
        .await?;

        output.item.as_ref().map(item_to_cart).transpose()
    }

    async fn put_cart(&self, cart: &Cart) -> Result<()> {
        retry(&self.policy, || {
            let request = self
                .client
                .put_item()
                .table_name(&self.table_name)
                .set_item(Some(cart_to_item(cart)));
            async move {
                request
                    .send()
                    .await
                    .map_err(|e| map_item_error(e, "PutItem"))
            }
        })
        .await?;

        tracing::debug!(table = %self.table_name, user_id = %cart.user_id, "Cart written");
        Ok(())
    }

    async fn delete_cart(&self, user_id: &str) -> Result<bool> {
        let output = retry(&self.policy, || {
            let request = self
                .client
                .delete_item()
                .table_name(&self.table_name)
                .set_key(Some(cart_key(user_id)))
                .return_values(ReturnValue::AllOld);
            async move {
                request
                    .send()
                    .await
                    .map_err(|e| map_item_error(e, "DeleteItem"))
            }
        })
        .await?;

        Ok(output.attributes.is_some_and(|a| !a.is_empty()))
    }
}
