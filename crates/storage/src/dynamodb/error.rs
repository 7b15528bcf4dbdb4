//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `petadoptions_core::storage`.
//! Only the throttling codes known to `is_throttling_error` become
//! `RepositoryError::Throttled` and get retried. Provisioned throughput
//! errors fail fast as `QueryFailed`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::batch_write_item::BatchWriteItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use petadoptions_core::retry::is_throttling_error;
use petadoptions_core::storage::RepositoryError;

fn throttled<E: ProvideErrorMetadata>(err: &E) -> Option<RepositoryError> {
    is_throttling_error(err.code(), err.message()).then(|| {
        RepositoryError::Throttled(err.message().unwrap_or("request throttled").to_string())
    })
}

fn connection_failed<E, R>(err: &SdkError<E, R>) -> Option<RepositoryError>
where
    E: std::error::Error + 'static,
    R: Debug,
{
    match err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => Some(
            RepositoryError::ConnectionFailed(DisplayErrorContext(err).to_string()),
        ),
        _ => None,
    }
}

/// Map a Scan SDK error to RepositoryError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
) -> RepositoryError {
    if let Some(mapped) = throttled(&err).or_else(|| connection_failed(&err)) {
        return mapped;
    }
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        ScanError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::QueryFailed("Provisioned throughput exceeded".to_string())
        }
        ScanError::RequestLimitExceeded(_) => {
            RepositoryError::Throttled("Request limit exceeded".to_string())
        }
        ScanError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("Scan failed: {err:?}")),
    }
}

/// Map an UpdateItem SDK error to RepositoryError.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    if let Some(mapped) = throttled(&err).or_else(|| connection_failed(&err)) {
        return mapped;
    }
    match err.into_service_error() {
        UpdateItemError::ConditionalCheckFailedException(_) => RepositoryError::NotFound {
            entity_type,
            id: id.into(),
        },
        UpdateItemError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        UpdateItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::QueryFailed("Provisioned throughput exceeded".to_string())
        }
        UpdateItemError::RequestLimitExceeded(_) => {
            RepositoryError::Throttled("Request limit exceeded".to_string())
        }
        UpdateItemError::TransactionConflictException(_) => {
            RepositoryError::QueryFailed("Transaction conflict, please retry".to_string())
        }
        UpdateItemError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("UpdateItem failed: {err:?}")),
    }
}

/// Map a BatchWriteItem SDK error to RepositoryError.
pub fn map_batch_write_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<BatchWriteItemError, R>,
) -> RepositoryError {
    if let Some(mapped) = throttled(&err).or_else(|| connection_failed(&err)) {
        return mapped;
    }
    match err.into_service_error() {
        BatchWriteItemError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        BatchWriteItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::QueryFailed("Provisioned throughput exceeded".to_string())
        }
        BatchWriteItemError::RequestLimitExceeded(_) => {
            RepositoryError::Throttled("Request limit exceeded".to_string())
        }
        BatchWriteItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        BatchWriteItemError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("BatchWriteItem failed: {err:?}")),
    }
}

/// Map a GetItem, PutItem, DeleteItem or CreateTable SDK error to
/// RepositoryError.
pub fn map_item_error<E, R>(err: SdkError<E, R>, operation: &str) -> RepositoryError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    if let Some(mapped) = throttled(&err).or_else(|| connection_failed(&err)) {
        return mapped;
    }
    match err.code() {
        Some("ResourceNotFoundException") => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        Some("ProvisionedThroughputExceededException") => {
            RepositoryError::QueryFailed("Provisioned throughput exceeded".to_string())
        }
        _ => RepositoryError::QueryFailed(format!(
            "{operation} failed: {}",
            DisplayErrorContext(&err)
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use aws_sdk_dynamodb::error::ErrorMetadata;
    use aws_sdk_dynamodb::types::error::ProvisionedThroughputExceededException;
    use petadoptions_core::retry::{retry, RetryPolicy};

    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy::default().with_initial_delay(Duration::from_millis(1))
    }

    fn throughput_exceeded() -> SdkError<ScanError, ()> {
        let inner = ProvisionedThroughputExceededException::builder()
            .message("Throughput exceeded")
            .build();
        SdkError::service_error(
            ScanError::ProvisionedThroughputExceededException(inner),
            (),
        )
    }

    fn throttling_exception() -> SdkError<ScanError, ()> {
        let meta = ErrorMetadata::builder()
            .code("ThrottlingException")
            .message("Rate exceeded")
            .build();
        SdkError::service_error(ScanError::generic(meta), ())
    }

    #[test]
    fn test_provisioned_throughput_is_not_throttled() {
        let mapped = map_scan_error(throughput_exceeded());
        assert!(matches!(mapped, RepositoryError::QueryFailed(_)));
    }

    #[test]
    fn test_throttling_code_is_throttled() {
        let mapped = map_scan_error(throttling_exception());
        assert!(matches!(mapped, RepositoryError::Throttled(_)));
    }

    #[test]
    fn test_item_error_by_code() {
        let meta = ErrorMetadata::builder()
            .code("ResourceNotFoundException")
            .message("Requested resource not found")
            .build();
        let err: SdkError<ScanError, ()> = SdkError::service_error(ScanError::generic(meta), ());
        assert_eq!(
            map_item_error(err, "GetItem"),
            RepositoryError::QueryFailed("Table not found".to_string())
        );
        assert!(matches!(
            map_item_error(throttling_exception(), "PutItem"),
            RepositoryError::Throttled(_)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unlisted_code_is_invoked_once() {
        let calls = AtomicU32::new(0);

        let result: Result<(), RepositoryError> = retry(&policy(), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(map_scan_error(throughput_exceeded()))
        })
        .await;

        assert!(matches!(result, Err(RepositoryError::QueryFailed(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_listed_code_is_retried() {
        let calls = AtomicU32::new(0);

        let result: Result<(), RepositoryError> = retry(&policy(), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(map_scan_error(throttling_exception()))
        })
        .await;

        assert!(matches!(result, Err(RepositoryError::Throttled(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }
}
