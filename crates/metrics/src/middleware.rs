use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::http::HttpMetrics;

/// Path the registry is served on.
pub const METRICS_PATH: &str = "/metrics";

/// Records request metrics for every route already on `router`, then adds
/// `GET /metrics`. Scrapes of `/metrics` are not recorded.
pub fn track_requests<S>(router: Router<S>, metrics: &HttpMetrics) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let scrape = Router::new()
        .route(METRICS_PATH, get(render_metrics))
        .with_state(metrics.clone());

    router
        .route_layer(middleware::from_fn_with_state(metrics.clone(), record))
        .merge(scrape)
}

async fn record(State(metrics): State<HttpMetrics>, request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let in_flight = metrics
        .requests_in_flight
        .with_label_values(&[method.as_str(), route.as_str()]);
    in_flight.inc();

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64();

    in_flight.dec();
    metrics.observe(&method, &route, response.status().as_u16(), elapsed);

    response
}

/// Serves the registry in the Prometheus text format.
pub async fn render_metrics(State(metrics): State<HttpMetrics>) -> Response {
    match metrics.encode() {
        Ok(body) => ([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
