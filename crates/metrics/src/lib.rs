//! petadoptions_metrics - Prometheus request metrics for the axum services.
//!
//! [`HttpMetrics`] owns a registry with request count, latency and in-flight
//! series labelled by method and matched route. [`track_requests`] installs
//! the recording middleware on a router and serves the registry at
//! `/metrics`.

mod error;
mod http;
mod middleware;

pub use error::MetricsError;
pub use http::HttpMetrics;
pub use middleware::{render_metrics, track_requests, METRICS_PATH};
