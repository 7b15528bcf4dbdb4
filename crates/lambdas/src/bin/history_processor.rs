//! SQS handler that writes adoption history messages to Postgres.

use aws_lambda_events::sqs::SqsEvent;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use petadoptions_aws::{
    database_url_from_settings, load_sdk_config, resolve_settings, AwsConfig, ParameterStore,
    SecretsStore,
};
use petadoptions_core::config::{env_key, APP_ENV_PREFIX, DATABASE_URL_NAME};
use petadoptions_core::storage::HistoryRepository;
use petadoptions_lambdas::{
    config::RDS_SECRET_ARN, history::process_batch, init_tracing, SqsBatchResponse,
};
use petadoptions_storage::PostgresRepository;

async fn handler(
    history: &dyn HistoryRepository,
    event: LambdaEvent<SqsEvent>,
) -> Result<SqsBatchResponse, Error> {
    let (sqs_event, context) = event.into_parts();
    tracing::info!(
        request_id = %context.request_id,
        message_count = sqs_event.records.len(),
        "Processing SQS batch"
    );

    Ok(process_batch(history, &sqs_event.records).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let sdk_config = load_sdk_config(&AwsConfig::from_env()).await;
    let parameters = ParameterStore::from_sdk_config(&sdk_config);
    let settings = resolve_settings(APP_ENV_PREFIX, &[RDS_SECRET_ARN], &parameters).await?;

    let database_url = database_url_from_settings(
        std::env::var(env_key(APP_ENV_PREFIX, DATABASE_URL_NAME)).ok(),
        &settings,
        &RDS_SECRET_ARN,
        &SecretsStore::from_sdk_config(&sdk_config),
    )
    .await?;
    let history = PostgresRepository::connect_lazy(&database_url)?;
    let history = &history;

    run(service_fn(move |event| async move { handler(history, event).await })).await
}
