use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post, put},
    Router,
};
use petadoptions_metrics::{track_requests, HttpMetrics};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{admin, cart, foods, health::health_status},
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
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/foods", get(foods::list_foods).post(foods::create_food))
        .route(
            "/foods/{food_id}",
            get(foods::get_food)
                .put(foods::update_food)
                .delete(foods::delete_food),
        )
        .route("/cart/{user_id}", get(cart::get_cart).delete(cart::delete_cart))
        .route("/cart/{user_id}/items", post(cart::add_item))
        .route(
            "/cart/{user_id}/items/{food_id}",
            put(cart::update_item).delete(cart::remove_item),
        )
        .route("/cart/{user_id}/clear", post(cart::clear_cart))
        .route("/cart/{user_id}/checkout", post(cart::checkout))
        .route("/admin/setup-tables", post(admin::setup_tables))
        .route("/admin/seed", post(admin::seed))
        .route("/admin/cleanup", post(admin::cleanup))
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
