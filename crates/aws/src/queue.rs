//! SQS publishing of adoption history messages.

use async_trait::async_trait;
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::Client;
use petadoptions_core::adoption::AdoptionHistoryMessage;
use petadoptions_core::retry::{retry_if, RetryPolicy};

use crate::error::{AwsError, Result};
use crate::throttling::is_throttling_sdk_error;

/// Publishes adoption history messages.
#[async_trait]
pub trait HistoryPublisher: Send + Sync {
    /// Publishes one message, returning its id when the transport assigns one.
    async fn publish(&self, message: &AdoptionHistoryMessage) -> Result<Option<String>>;
}

/// Sends adoption history messages to a queue.
#[derive(Debug, Clone)]
pub struct HistoryQueue {
    client: Client,
    queue_url: String,
    policy: RetryPolicy,
}

impl HistoryQueue {
    pub fn new(client: Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
            policy: RetryPolicy::default(),
        }
    }

    pub fn from_sdk_config(config: &aws_config::SdkConfig, queue_url: impl Into<String>) -> Self {
        Self::new(Client::new(config), queue_url)
    }

    /// Sends one message, returning the SQS message id.
    pub async fn send(&self, message: &AdoptionHistoryMessage) -> Result<Option<String>> {
        let body = serde_json::to_string(message)?;

        let output = retry_if(&self.policy, is_throttling_sdk_error, || {
            self.client
                .send_message()
                .queue_url(&self.queue_url)
                .message_body(body.clone())
                .send()
        })
        .await
        .map_err(|e| AwsError::Queue(DisplayErrorContext(&e).to_string()))?;

        tracing::debug!(
            transaction_id = %message.transaction_id,
            message_id = ?output.message_id(),
            "Adoption history message sent"
        );
        Ok(output.message_id().map(str::to_string))
    }
}

#[async_trait]
impl HistoryPublisher for HistoryQueue {
    async fn publish(&self, message: &AdoptionHistoryMessage) -> Result<Option<String>> {
        self.send(message).await
    }
}
