//! Scheduled handler that sends synthetic traffic to the services.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use petadoptions_aws::{load_sdk_config, resolve_settings, AwsConfig, ParameterStore};
use petadoptions_client::{PetAdoptionsClient, ServiceUrls};
use petadoptions_core::config::APP_ENV_PREFIX;
use petadoptions_lambdas::{
    config::{traffic_searches, PET_LIST_ADOPTIONS_URL, PET_SEARCH_URL, SERVICE_TIMEOUT},
    init_tracing,
    traffic::{on_schedule, TrafficSummary},
    PetAdoptionsApi, ScheduledEvent,
};

async fn handler(
    api: &dyn PetAdoptionsApi,
    searches: usize,
    event: LambdaEvent<ScheduledEvent>,
) -> Result<TrafficSummary, Error> {
    let (payload, context) = event.into_parts();

    Ok(on_schedule(api, searches, &payload, &context.request_id).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let searches = traffic_searches(|key| std::env::var(key).ok())?;

    let sdk_config = load_sdk_config(&AwsConfig::from_env()).await;
    let parameters = ParameterStore::from_sdk_config(&sdk_config);
    let settings = resolve_settings(
        APP_ENV_PREFIX,
        &[PET_SEARCH_URL, PET_LIST_ADOPTIONS_URL],
        &parameters,
    )
    .await?;

    let urls = ServiceUrls {
        search: settings.require(&PET_SEARCH_URL)?.to_string(),
        adoption_list: settings.require(&PET_LIST_ADOPTIONS_URL)?.to_string(),
        ..ServiceUrls::default()
    };
    let client = PetAdoptionsClient::with_timeout(urls, SERVICE_TIMEOUT)?;
    let client = &client;

    run(service_fn(move |event| async move {
        handler(client, searches, event).await
    }))
    .await
}
