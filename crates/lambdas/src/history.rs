//! Adoption history messages from SQS into the history table.

use aws_lambda_events::sqs::SqsMessage;
use petadoptions_core::adoption::{AdoptionHistoryMessage, Transaction};
use petadoptions_core::storage::{HistoryRepository, RepositoryError};
use thiserror::Error;

use crate::response::{BatchItemFailure, SqsBatchResponse};

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Message has no body")]
    MissingBody,
    #[error("Invalid history message: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid transaction id: {0}")]
    InvalidTransactionId(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Decodes one message body into a history row.
pub fn decode_record(body: Option<&str>) -> Result<Transaction, RecordError> {
    let body = body.ok_or(RecordError::MissingBody)?;
    let message: AdoptionHistoryMessage = serde_json::from_str(body)?;
    message
        .to_transaction()
        .map_err(|e| RecordError::InvalidTransactionId(e.to_string()))
}

/// Stores every message of the batch, reporting the ones that failed.
///
/// Failed messages go back to the queue; the rest of the batch is kept.
pub async fn process_batch(
    history: &dyn HistoryRepository,
    records: &[SqsMessage],
) -> SqsBatchResponse {
    let mut batch_item_failures = Vec::new();

    for record in records {
        let message_id = record.message_id.as_deref().unwrap_or("unknown");

        let result = match decode_record(record.body.as_deref()) {
            Ok(transaction) => history
                .record_history(&transaction)
                .await
                .map(|()| transaction)
                .map_err(RecordError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(transaction) => {
                tracing::info!(
                    message_id = %message_id,
                    transaction_id = %transaction.transaction_id,
                    "History recorded"
                );
            }
            Err(e) => {
                tracing::warn!(message_id = %message_id, error = %e, "Message processing failed");
                batch_item_failures.push(BatchItemFailure {
                    item_identifier: message_id.to_string(),
                });
            }
        }
    }

    tracing::info!(
        processed = records.len() - batch_item_failures.len(),
        failed = batch_item_failures.len(),
        "Batch processed"
    );
    SqsBatchResponse {
        batch_item_failures,
    }
}
