//! petadoptions_lambdas - Lambda functions of the pet adoptions services.
//!
//! Handler logic lives here and receives its collaborators as trait objects;
//! the binaries under `src/bin` only wire AWS clients into it and start the
//! runtime.

pub mod api;
pub mod cleanup;
pub mod config;
pub mod history;
pub mod response;
pub mod schedule;
pub mod status;
pub mod traffic;

pub use api::PetAdoptionsApi;
pub use response::{BatchItemFailure, HttpResponse, SqsBatchResponse};
pub use schedule::ScheduledEvent;

/// Plain text logs without timestamps; CloudWatch adds its own.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();
}
