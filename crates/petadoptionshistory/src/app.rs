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
    handlers::{
        health::health_status,
        transactions::{count_transactions, delete_transactions, list_transactions},
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
        .allow_methods([Method::GET, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route(
            "/home/transactions",
            get(list_transactions).delete(delete_transactions),
        )
        .route("/home/transactions/count", get(count_transactions))
        .layer(cors);

    let routes = Router::new()
        .route("/health/status", get(health_status))
        .nest("/petadoptionshistory/api", api_routes);

    track_requests(routes, metrics)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use async_trait::async_trait;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use petadoptions_core::adoption::Transaction;
    use petadoptions_core::storage::{HistoryRepository, RepositoryError, Result};
    use petadoptions_storage::InMemoryRepository;
    use tower::ServiceExt;

    fn metrics() -> HttpMetrics {
        HttpMetrics::new("test").unwrap()
    }

    const TRANSACTIONS: &str = "/petadoptionshistory/api/home/transactions";

    struct UnreachableHistory;

    #[async_trait]
    impl HistoryRepository for UnreachableHistory {
        async fn list_history(&self) -> Result<Vec<Transaction>> {
            Err(RepositoryError::ConnectionFailed("pool timed out".to_string()))
        }

        async fn clear_history(&self) -> Result<u64> {
            Err(RepositoryError::ConnectionFailed("pool timed out".to_string()))
        }

        async fn count_history(&self) -> Result<i64> {
            Err(RepositoryError::ConnectionFailed("pool timed out".to_string()))
        }

        async fn record_history(&self, _transaction: &Transaction) -> Result<()> {
            Err(RepositoryError::ConnectionFailed("pool timed out".to_string()))
        }
    }

    async fn history_with(pet_ids: &[&str]) -> Arc<InMemoryRepository> {
        let repo = Arc::new(InMemoryRepository::new());
        for pet_id in pet_ids {
            repo.record_history(&Transaction::new(*pet_id, None))
                .await
                .unwrap();
        }
        repo
    }

    async fn send(
        repo: Arc<dyn HistoryRepository>,
        method: &str,
        uri: &str,
    ) -> (StatusCode, Vec<u8>) {
        let app = create_app(AppState::new(repo), &metrics(), Duration::from_secs(30));

        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_health_status() {
        let (status, body) = send(history_with(&[]).await, "GET", "/health/status").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"Alive");
    }

    #[tokio::test]
    async fn test_health_status_without_database() {
        let (status, body) = send(Arc::new(UnreachableHistory), "GET", "/health/status").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].as_str().unwrap().contains("pool timed out"));
    }

    #[tokio::test]
    async fn test_list_transactions() {
        let (status, body) = send(history_with(&["001", "010"]).await, "GET", TRANSACTIONS).await;

        assert_eq!(status, StatusCode::OK);
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.len(), 2);
        assert_eq!(json[0]["pet_id"], "001");
        assert_eq!(json[1]["pet_id"], "010");
        assert!(json[0]["transaction_id"].is_string());
    }

    #[tokio::test]
    async fn test_delete_transactions() {
        let repo = history_with(&["001", "010"]).await;

        let (status, body) = send(repo.clone(), "DELETE", TRANSACTIONS).await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"success": true}));
        assert_eq!(repo.count_history().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_count_transactions() {
        let uri = format!("{TRANSACTIONS}/count");

        let (status, body) = send(history_with(&["001", "002", "003"]).await, "GET", &uri).await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"count": 3}));
    }

    #[tokio::test]
    async fn test_list_without_database() {
        let (status, _) = send(Arc::new(UnreachableHistory), "GET", TRANSACTIONS).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_requests_are_recorded() {
        let metrics = HttpMetrics::new("petadoptionshistory").unwrap();
        let app = create_app(
            AppState::new(Arc::new(UnreachableHistory)),
            &metrics,
            Duration::from_secs(30),
        );

        let response = app
            .clone()
            .oneshot(Request::builder().uri(TRANSACTIONS).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(metrics.request_count("GET", TRANSACTIONS, 503), 1);
    }
}
