//! Synthetic traffic against the pet search and adoption list services.

use futures_util::future::join_all;
use petadoptions_core::pet::{PetSearchQuery, PET_TYPES};
use serde::Serialize;

use crate::api::PetAdoptionsApi;
use crate::schedule::{log_trigger, ScheduledEvent};

/// Outcome of one traffic generator run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrafficSummary {
    pub requests: usize,
    pub failures: usize,
}

/// Handles one scheduled traffic run.
pub async fn on_schedule(
    api: &dyn PetAdoptionsApi,
    searches: usize,
    event: &ScheduledEvent,
    request_id: &str,
) -> TrafficSummary {
    log_trigger(event, request_id);
    generate_traffic(api, searches).await
}

/// Issues `searches` pet searches, cycling over the pet types, and one
/// adoption list call. All requests run concurrently.
pub async fn generate_traffic(api: &dyn PetAdoptionsApi, searches: usize) -> TrafficSummary {
    let search_calls = PET_TYPES.iter().cycle().take(searches).map(|pettype| async move {
        match api.search(&PetSearchQuery::by_type(*pettype)).await {
            Ok(pets) => {
                tracing::debug!(pettype, count = pets.len(), "Search succeeded");
                true
            }
            Err(e) => {
                tracing::warn!(pettype, error = %e, "Search failed");
                false
            }
        }
    });

    let list_call = async {
        match api.adoption_list().await {
            Ok(adoptions) => {
                tracing::debug!(count = adoptions.len(), "Adoption list succeeded");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Adoption list failed");
                false
            }
        }
    };

    let (search_results, list_ok) = tokio::join!(join_all(search_calls), list_call);

    let summary = TrafficSummary {
        requests: search_results.len() + 1,
        failures: search_results.iter().filter(|ok| !**ok).count() + usize::from(!list_ok),
    };
    tracing::info!(
        requests = summary.requests,
        failures = summary.failures,
        "Traffic generated"
    );
    summary
}
