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
    handlers::{adoptions::list_adoptions, health::health_status},
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
        .route("/adoptionlist/", get(list_adoptions))
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

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use super::*;
    use async_trait::async_trait;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use petadoptions_client::ClientError;
    use petadoptions_core::adoption::Transaction;
    use petadoptions_core::pet::PetSearchResult;
    use petadoptions_core::storage::TransactionRepository;
    use petadoptions_storage::InMemoryRepository;
    use tower::ServiceExt;

    fn metrics() -> HttpMetrics {
        HttpMetrics::new("test").unwrap()
    }

    use crate::lookup::PetLookup;

    /// Pet search stand-in. Unknown ids fail like an unreachable service.
    struct StubPets(HashMap<String, PetSearchResult>);

    #[async_trait]
    impl PetLookup for StubPets {
        async fn pets_by_id(&self, petid: &str) -> Result<Vec<PetSearchResult>, ClientError> {
            match self.0.get(petid) {
                Some(pet) => Ok(vec![pet.clone()]),
                None if petid == "missing" => Ok(Vec::new()),
                None => Err(ClientError::ServerError {
                    status: 503,
                    message: "unavailable".to_string(),
                }),
            }
        }
    }

    fn pet(petid: &str, pettype: &str) -> PetSearchResult {
        PetSearchResult {
            petid: petid.to_string(),
            availability: "no".to_string(),
            cuteness_rate: "5".to_string(),
            petcolor: "brown".to_string(),
            pettype: pettype.to_string(),
            price: "249".to_string(),
            peturl: format!("https://cdn.test/{pettype}/{petid}.jpg"),
        }
    }

    fn stub_pets() -> Arc<StubPets> {
        Arc::new(StubPets(HashMap::from([
            ("001".to_string(), pet("001", "bunny")),
            ("010".to_string(), pet("010", "puppy")),
        ])))
    }

    async fn list(repo: Arc<InMemoryRepository>) -> (StatusCode, Vec<serde_json::Value>) {
        let app = create_app(
            AppState::new(repo, stub_pets()),
            &metrics(),
            Duration::from_secs(30),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/adoptionlist/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_status() {
        let app = create_app(
            AppState::new(Arc::new(InMemoryRepository::new()), stub_pets()),
            &metrics(), Duration::from_secs(30),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Alive");
    }

    #[tokio::test]
    async fn test_empty_list() {
        let (status, adoptions) = list(Arc::new(InMemoryRepository::new())).await;

        assert_eq!(status, StatusCode::OK);
        assert!(adoptions.is_empty());
    }

    #[tokio::test]
    async fn test_adoptions_newest_first_with_pet_details() {
        let repo = Arc::new(InMemoryRepository::new());
        let first = Transaction::new("001", None);
        let second = Transaction::new("010", Some("user-1".to_string()));
        repo.create_transaction(&first).await.unwrap();
        repo.create_transaction(&second).await.unwrap();

        let (status, adoptions) = list(repo).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(adoptions.len(), 2);
        assert_eq!(adoptions[0]["petid"], "010");
        assert_eq!(adoptions[0]["pettype"], "puppy");
        assert_eq!(
            adoptions[0]["transactionid"],
            second.transaction_id.to_string()
        );
        assert_eq!(adoptions[1]["petid"], "001");
        assert_eq!(adoptions[1]["peturl"], "https://cdn.test/bunny/001.jpg");
    }

    #[tokio::test]
    async fn test_failed_and_empty_lookups_are_skipped() {
        let repo = Arc::new(InMemoryRepository::new());
        for pet_id in ["001", "unreachable", "missing"] {
            repo.create_transaction(&Transaction::new(pet_id, None))
                .await
                .unwrap();
        }

        let (status, adoptions) = list(repo).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(adoptions.len(), 1);
        assert_eq!(adoptions[0]["petid"], "001");
    }

    #[tokio::test]
    async fn test_only_latest_transactions_are_listed() {
        let repo = Arc::new(InMemoryRepository::new());
        for _ in 0..30 {
            repo.create_transaction(&Transaction::new("010", None))
                .await
                .unwrap();
        }

        let (_, adoptions) = list(repo).await;

        assert_eq!(adoptions.len(), 25);
    }

    #[tokio::test]
    async fn test_requests_are_recorded() {
        let metrics = HttpMetrics::new("petlistadoptions").unwrap();
        let app = create_app(
            AppState::new(Arc::new(InMemoryRepository::new()), stub_pets()),
            &metrics,
            Duration::from_secs(30),
        );

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri("/api/adoptionlist/")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(metrics.request_count("GET", "/api/adoptionlist/", 200), 2);
    }
}
