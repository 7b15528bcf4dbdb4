//! DynamoDB pets repository.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use tokio::sync::Mutex;

use petadoptions_core::pet::{scan_filter, Availability, Pet, PetSearchQuery};
use petadoptions_core::retry::{retry, RetryPolicy};
use petadoptions_core::storage::{PetRepository, RepositoryError, Result};

use super::conversions::{item_to_pet, pet_key, pet_to_item, ATTR_AVAILABILITY};
use super::error::{map_batch_write_error, map_scan_error, map_update_item_error};

/// BatchWriteItem accepts at most 25 requests.
const BATCH_WRITE_LIMIT: usize = 25;

/// Pets table on DynamoDB, keyed by `pettype` (partition) and `petid` (sort).
#[derive(Debug, Clone)]
pub struct DynamoDbPetRepository {
    client: Client,
    table_name: String,
    policy: RetryPolicy,
}

impl DynamoDbPetRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            policy: RetryPolicy::default(),
        }
    }

    /// Creates a repository from a loaded SDK configuration.
    pub fn from_sdk_config(config: &aws_config::SdkConfig, table_name: impl Into<String>) -> Self {
        Self::new(Client::new(config), table_name)
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    async fn write_batch(&self, requests: Vec<WriteRequest>) -> Result<()> {
        let pending = Mutex::new(requests);
        let pending = &pending;
        let table_name = self.table_name.as_str();
        let client = &self.client;

        retry(&self.policy, || async move {
            let mut pending = pending.lock().await;

            let output = client
                .batch_write_item()
                .request_items(table_name, pending.clone())
                .send()
                .await
                .map_err(map_batch_write_error)?;

            *pending = output
                .unprocessed_items
                .and_then(|mut items| items.remove(table_name))
                .unwrap_or_default();

            if pending.is_empty() {
                Ok(())
            } else {
                Err(RepositoryError::Throttled(format!(
                    "{} unprocessed items",
                    pending.len()
                )))
            }
        })
        .await
    }
}

#[async_trait]
impl PetRepository for DynamoDbPetRepository {
    async fn search(&self, query: &PetSearchQuery) -> Result<Vec<Pet>> {
        let filter = scan_filter(query);
        let mut pets = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let output = retry(&self.policy, || {
                let mut request = self
                    .client
                    .scan()
                    .table_name(&self.table_name)
                    .set_exclusive_start_key(start_key.clone());

                if let Some(filter) = &filter {
                    request = request.filter_expression(&filter.expression);
                    for (placeholder, name) in &filter.names {
                        request = request.expression_attribute_names(placeholder, name);
                    }
                    for (placeholder, value) in &filter.values {
                        request = request.expression_attribute_values(
                            placeholder,
                            AttributeValue::S(value.clone()),
                        );
                    }
                }

                async move { request.send().await.map_err(map_scan_error) }
            })
            .await?;

            let next_key = output.last_evaluated_key;
            for item in output.items.unwrap_or_default() {
                pets.push(item_to_pet(&item)?);
            }

            match next_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        tracing::debug!(table = %self.table_name, count = pets.len(), "Scanned pets");
        Ok(pets)
    }

    async fn update_availability(
        &self,
        pettype: &str,
        petid: &str,
        availability: Availability,
    ) -> Result<()> {
        retry(&self.policy, || {
            let request = self
                .client
                .update_item()
                .table_name(&self.table_name)
                .set_key(Some(pet_key(pettype, petid)))
                .update_expression("SET #availability = :availability")
                .condition_expression("attribute_exists(petid)")
                .expression_attribute_names("#availability", ATTR_AVAILABILITY)
                .expression_attribute_values(
                    ":availability",
                    AttributeValue::S(availability.to_string()),
                );

            async move {
                request
                    .send()
                    .await
                    .map_err(|e| map_update_item_error(e, "Pet", format!("{pettype}/{petid}")))
            }
        })
        .await?;

        tracing::info!(pettype, petid, availability = %availability, "Pet availability updated");
        Ok(())
    }

    async fn put_pets(&self, pets: &[Pet]) -> Result<()> {
        for chunk in pets.chunks(BATCH_WRITE_LIMIT) {
            let requests = chunk
                .iter()
                .map(|pet| {
                    let put = PutRequest::builder()
                        .set_item(Some(pet_to_item(pet)))
                        .build()
                        .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;
                    Ok(WriteRequest::builder().put_request(put).build())
                })
                .collect::<Result<Vec<_>>>()?;

            self.write_batch(requests).await?;
        }

        tracing::info!(table = %self.table_name, count = pets.len(), "Pets written");
        Ok(())
    }
}
