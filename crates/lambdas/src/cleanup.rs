//! Scheduled reset of the demo adoptions.

use petadoptions_client::ClientError;

use crate::api::PetAdoptionsApi;
use crate::schedule::{log_trigger, ScheduledEvent};

/// Handles one scheduled cleanup run.
pub async fn on_schedule(
    api: &dyn PetAdoptionsApi,
    event: &ScheduledEvent,
    request_id: &str,
) -> Result<(), ClientError> {
    log_trigger(event, request_id);
    cleanup_adoptions(api).await
}

/// Calls the cleanup endpoint of the pay-for-adoption service.
pub async fn cleanup_adoptions(api: &dyn PetAdoptionsApi) -> Result<(), ClientError> {
    api.cleanup_adoptions().await?;
    tracing::info!("Adoptions cleaned up");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use async_trait::async_trait;
    use petadoptions_core::adoption::Adoption;
    use petadoptions_core::pet::{PetSearchQuery, PetSearchResult};

    use crate::schedule::fixtures::scheduled_event;

    struct CleanupApi {
        calls: AtomicUsize,
        status: Option<u16>,
    }

    #[async_trait]
    impl PetAdoptionsApi for CleanupApi {
        async fn search(
            &self,
            _query: &PetSearchQuery,
        ) -> Result<Vec<PetSearchResult>, ClientError> {
            Ok(Vec::new())
        }

        async fn adoption_list(&self) -> Result<Vec<Adoption>, ClientError> {
            Ok(Vec::new())
        }

        async fn cleanup_adoptions(&self) -> Result<(), ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.status {
                Some(status) => Err(ClientError::ServerError {
                    status,
                    message: "database unavailable".to_string(),
                }),
                None => Ok(()),
            }
        }
    }

    #[tokio::test]
    async fn test_cleanup_calls_endpoint_once() {
        let api = CleanupApi {
            calls: AtomicUsize::new(0),
            status: None,
        };

        cleanup_adoptions(&api).await.unwrap();

        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_scheduled_cleanup() {
        let api = CleanupApi {
            calls: AtomicUsize::new(0),
            status: None,
        };

        on_schedule(&api, &scheduled_event(), "req-1").await.unwrap();

        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cleanup_failure_is_returned() {
        let api = CleanupApi {
            calls: AtomicUsize::new(0),
            status: Some(500),
        };

        let err = cleanup_adoptions(&api).await.unwrap_err();

        assert_eq!(err.status(), Some(500));
    }
}
