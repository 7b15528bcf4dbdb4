/// GET /health/status - Liveness check.
pub async fn health_status() -> &'static str {
    "Alive"
}
