use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use petadoptions_metrics::{track_requests, HttpMetrics};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{health::health_status, search::search_pets},
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
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/search", get(search_pets))
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
