//! API Gateway handler that flips the availability of a pet.

use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use petadoptions_aws::{load_sdk_config, resolve_settings, AwsConfig, ParameterStore};
use petadoptions_core::config::APP_ENV_PREFIX;
use petadoptions_core::storage::PetRepository;
use petadoptions_lambdas::{config::TABLE_NAME, init_tracing, status::update_status, HttpResponse};
use petadoptions_storage::DynamoDbPetRepository;

async fn handler(
    pets: &dyn PetRepository,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<HttpResponse, Error> {
    let (request, context) = event.into_parts();
    tracing::info!(request_id = %context.request_id, "Processing status update");

    Ok(update_status(pets, request.body.as_deref()).await?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let sdk_config = load_sdk_config(&AwsConfig::from_env()).await;
    let parameters = ParameterStore::from_sdk_config(&sdk_config);
    let settings = resolve_settings(APP_ENV_PREFIX, &[TABLE_NAME], &parameters).await?;

    let table_name = settings.require(&TABLE_NAME)?;
    let pets = DynamoDbPetRepository::from_sdk_config(&sdk_config, table_name);
    let pets = &pets;

    run(service_fn(move |event| async move { handler(pets, event).await })).await
}
