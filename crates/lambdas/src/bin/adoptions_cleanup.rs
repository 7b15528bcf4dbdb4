//! Scheduled handler that resets the demo adoptions.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use petadoptions_aws::{load_sdk_config, resolve_settings, AwsConfig, ParameterStore};
use petadoptions_client::{PetAdoptionsClient, ServiceUrls};
use petadoptions_core::config::APP_ENV_PREFIX;
use petadoptions_lambdas::{
    cleanup::on_schedule,
    config::{CLEANUP_ADOPTIONS_URL, SERVICE_TIMEOUT},
    init_tracing, PetAdoptionsApi, ScheduledEvent,
};

async fn handler(
    api: &dyn PetAdoptionsApi,
    event: LambdaEvent<ScheduledEvent>,
) -> Result<(), Error> {
    let (payload, context) = event.into_parts();

    Ok(on_schedule(api, &payload, &context.request_id).await?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let sdk_config = load_sdk_config(&AwsConfig::from_env()).await;
    let parameters = ParameterStore::from_sdk_config(&sdk_config);
    let settings = resolve_settings(APP_ENV_PREFIX, &[CLEANUP_ADOPTIONS_URL], &parameters).await?;

    let urls = ServiceUrls {
        cleanup_adoptions: settings.require(&CLEANUP_ADOPTIONS_URL)?.to_string(),
        ..ServiceUrls::default()
    };
    let client = PetAdoptionsClient::with_timeout(urls, SERVICE_TIMEOUT)?;
    let client = &client;

    run(service_fn(move |event| async move { handler(client, event).await })).await
}
