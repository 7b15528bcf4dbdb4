use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use petadoptions_metrics::{track_requests, HttpMetrics};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        adoption::complete_adoption,
        health::health_status,
        seeding::{cleanup_adoptions, trigger_seeding},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(
    state: AppState,
    metrics: &HttpMetrics,
    request_timeout: Duration,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/completeadoption", post(complete_adoption))
        .route("/home/completeadoption", post(complete_adoption))
        .route("/home/cleanupadoptions", post(cleanup_adoptions))
        .route("/home/triggerseeding", post(trigger_seeding))
        .layer(cors);

    let routes = Router::new()
        .route("/health/status", get(health_status))
        .nest("/api", api_routes);

    track_requests(routes, metrics)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}
