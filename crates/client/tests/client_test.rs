//! Client tests against a stub server.

use std::time::Duration;

use axum::{
    extract::Query,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use petadoptions_client::{ClientError, PetAdoptionsClient, Service, ServiceUrls};
use petadoptions_core::adoption::StatusUpdate;
use petadoptions_core::pet::PetSearchQuery;
use serde_json::{json, Value};
use tokio::net::TcpListener;

async fn search(Query(query): Query<PetSearchQuery>) -> Json<Value> {
    let petid = query.petid.unwrap_or_else(|| "001".to_string());
    Json(json!([{
        "petid": petid,
        "availability": "yes",
        "cuteness_rate": "5",
        "petcolor": "black",
        "pettype": query.pettype.unwrap_or_else(|| "bunny".to_string()),
        "price": "249",
        "peturl": "https://cdn.test/bunnies/b1.jpg"
    }]))
}

async fn complete_adoption(
    Query(params): Query<std::collections::HashMap<String, String>>,
) -> (StatusCode, String) {
    match (params.get("petId"), params.get("pettype")) {
        (Some(_), Some(_)) => (StatusCode::OK, "Success".to_string()),
        _ => (
            StatusCode::BAD_REQUEST,
            json!({"error": "Bad request parameters"}).to_string(),
        ),
    }
}

async fn update_status(Json(update): Json<StatusUpdate>) -> String {
    format!("updated {}", update.petid)
}

/// Serves the stub routes on an ephemeral port and returns its base URL.
async fn start_stub() -> String {
    let app = Router::new()
        .route("/health/status", get(|| async { "Alive" }))
        .route("/api/search", get(search))
        .route(
            "/api/adoptionlist/",
            get(|| async { Json(json!([{"petid": "001", "transactionid": "t-1"}])) }),
        )
        .route("/api/completeadoption", post(complete_adoption))
        .route(
            "/api/home/cleanupadoptions",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route("/status", put(update_status));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

async fn client() -> PetAdoptionsClient {
    let base = start_stub().await;
    let urls = ServiceUrls::from_roots(&base, &base, &base)
        .with_status_updater(format!("{base}/status"));
    PetAdoptionsClient::with_timeout(urls, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_search_sends_filters() {
    let client = client().await;

    let pets = client
        .search(&PetSearchQuery::by_type("puppy").with_color("black"))
        .await
        .unwrap();

    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].pettype, "puppy");
}

#[tokio::test]
async fn test_adoption_list_decodes_partial_rows() {
    let client = client().await;

    let adoptions = client.adoption_list().await.unwrap();

    assert_eq!(adoptions.len(), 1);
    assert_eq!(adoptions[0].transactionid.as_deref(), Some("t-1"));
    assert_eq!(adoptions[0].price, None);
}

#[tokio::test]
async fn test_complete_adoption() {
    let client = client().await;

    let body = client
        .complete_adoption("001", "bunny", Some("user-1"))
        .await
        .unwrap();

    assert_eq!(body, "Success");
}

#[tokio::test]
async fn test_server_error_carries_status() {
    let client = client().await;

    let err = client.cleanup_adoptions().await.unwrap_err();

    assert!(matches!(err, ClientError::ServerError { status: 500, .. }));
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_update_status() {
    let client = client().await;

    let body = client
        .update_status(&StatusUpdate::adopted("001", "bunny"))
        .await
        .unwrap();

    assert_eq!(body, "updated 001");
}

#[tokio::test]
async fn test_update_status_requires_url() {
    let client = PetAdoptionsClient::new(ServiceUrls::default());

    let err = client
        .update_status(&StatusUpdate::adopted("001", "bunny"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidInput(_)));
}

#[tokio::test]
async fn test_health() {
    let client = client().await;

    for service in Service::ALL {
        assert_eq!(client.health(service).await.unwrap(), "Alive");
    }
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let base = start_stub().await;
    let urls = ServiceUrls::from_roots(&base, &format!("{base}/missing"), &base);
    let client = PetAdoptionsClient::new(urls);

    let err = client.adoption_list().await.unwrap_err();

    assert!(matches!(err, ClientError::NotFound { .. }));
}
