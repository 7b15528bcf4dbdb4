//! Pet availability updates behind API Gateway.

use petadoptions_core::adoption::StatusUpdate;
use petadoptions_core::storage::{PetRepository, RepositoryError};
use thiserror::Error;

use crate::response::HttpResponse;

pub const STATUS_UPDATED: &str = "Pet availability updated";

/// Why a request body was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidUpdate {
    #[error("Missing request body")]
    MissingBody,
    #[error("Invalid request body: {0}")]
    Malformed(String),
    #[error("petid and pettype are required")]
    MissingFields,
}

/// Parses and checks a status update body.
pub fn parse_update(body: Option<&str>) -> Result<StatusUpdate, InvalidUpdate> {
    let body = body
        .filter(|b| !b.trim().is_empty())
        .ok_or(InvalidUpdate::MissingBody)?;
    let update: StatusUpdate =
        serde_json::from_str(body).map_err(|e| InvalidUpdate::Malformed(e.to_string()))?;

    if update.petid.trim().is_empty() || update.pettype.trim().is_empty() {
        return Err(InvalidUpdate::MissingFields);
    }
    Ok(update)
}

/// Applies the availability change carried by `body`.
///
/// A bad body is answered with 400. Repository errors are returned so the
/// trigger retries the invocation.
pub async fn update_status(
    pets: &dyn PetRepository,
    body: Option<&str>,
) -> Result<HttpResponse, RepositoryError> {
    let update = match parse_update(body) {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected status update");
            return Ok(HttpResponse::bad_request(e));
        }
    };

    let availability = update.target_availability();
    pets.update_availability(&update.pettype, &update.petid, availability)
        .await?;

    tracing::info!(
        petid = %update.petid,
        pettype = %update.pettype,
        availability = %availability,
        "Pet availability updated"
    );
    Ok(HttpResponse::ok(STATUS_UPDATED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use petadoptions_core::pet::{seed_pets, PetSearchQuery};
    use petadoptions_storage::InMemoryRepository;

    async fn availability(repo: &InMemoryRepository, petid: &str) -> String {
        repo.search(&PetSearchQuery::by_id(petid)).await.unwrap()[0]
            .availability
            .clone()
    }

    #[test]
    fn test_parse_update_rejects_bad_bodies() {
        assert_eq!(parse_update(None), Err(InvalidUpdate::MissingBody));
        assert_eq!(parse_update(Some("  ")), Err(InvalidUpdate::MissingBody));
        assert!(matches!(
            parse_update(Some("{not json")),
            Err(InvalidUpdate::Malformed(_))
        ));
        assert_eq!(
            parse_update(Some(r#"{"petid":"","pettype":"puppy"}"#)),
            Err(InvalidUpdate::MissingFields)
        );
    }

    #[tokio::test]
    async fn test_marks_pet_adopted() {
        let repo = InMemoryRepository::with_pets(seed_pets().unwrap());

        let response = update_status(&repo, Some(r#"{"petid":"010","pettype":"puppy"}"#))
            .await
            .unwrap();

        assert_eq!(response, HttpResponse::ok(STATUS_UPDATED));
        assert_eq!(availability(&repo, "010").await, "no");
    }

    #[tokio::test]
    async fn test_makes_pet_available_again() {
        let repo = InMemoryRepository::with_pets(seed_pets().unwrap());
        update_status(&repo, Some(r#"{"petid":"010","pettype":"puppy"}"#))
            .await
            .unwrap();

        update_status(
            &repo,
            Some(r#"{"petid":"010","pettype":"puppy","petavailability":"yes"}"#),
        )
        .await
        .unwrap();

        assert_eq!(availability(&repo, "010").await, "yes");
    }

    #[tokio::test]
    async fn test_missing_body_is_bad_request() {
        let repo = InMemoryRepository::new();

        let response = update_status(&repo, None).await.unwrap();

        assert_eq!(response.status_code, 400);
        assert!(response.body.contains("Missing request body"));
    }

    #[tokio::test]
    async fn test_unknown_pet_is_an_error() {
        let repo = InMemoryRepository::new();

        let result = update_status(&repo, Some(r#"{"petid":"999","pettype":"puppy"}"#)).await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }
}
