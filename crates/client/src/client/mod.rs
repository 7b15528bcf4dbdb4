//! HTTP client for the pet adoptions services.

pub mod adoptions;
pub mod health;
pub mod search;

use std::time::Duration;

use url::Url;

use crate::error::{ClientError, Result};

pub use health::Service;
pub use search::search_url;

/// Endpoint URLs of the services, as published in Parameter Store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUrls {
    /// `GET` pet search, e.g. `http://petsearch/api/search`.
    pub search: String,
    /// `GET` adoption list.
    pub adoption_list: String,
    /// `POST` complete adoption.
    pub complete_adoption: String,
    /// `POST` cleanup adoptions.
    pub cleanup_adoptions: String,
    /// `PUT` pet status updater. Not served by any of the HTTP services.
    pub status_updater: Option<String>,
}

impl ServiceUrls {
    /// Endpoint URLs for services listening at the given roots.
    pub fn from_roots(petsearch: &str, petlistadoptions: &str, payforadoption: &str) -> Self {
        let petsearch = petsearch.trim_end_matches('/');
        let petlistadoptions = petlistadoptions.trim_end_matches('/');
        let payforadoption = payforadoption.trim_end_matches('/');

        Self {
            search: format!("{petsearch}/api/search"),
            adoption_list: format!("{petlistadoptions}/api/adoptionlist/"),
            complete_adoption: format!("{payforadoption}/api/completeadoption"),
            cleanup_adoptions: format!("{payforadoption}/api/home/cleanupadoptions"),
            status_updater: None,
        }
    }

    pub fn with_status_updater(mut self, url: impl Into<String>) -> Self {
        self.status_updater = Some(url.into());
        self
    }
}

impl Default for ServiceUrls {
    /// The ports the services listen on locally.
    fn default() -> Self {
        Self::from_roots(
            "http://localhost:8080",
            "http://localhost:8081",
            "http://localhost:8082",
        )
    }
}

/// HTTP client for the pet adoptions services.
#[derive(Debug, Clone)]
pub struct PetAdoptionsClient {
    client: reqwest::Client,
    urls: ServiceUrls,
}

impl PetAdoptionsClient {
    /// Create a new client with no request timeout.
    pub fn new(urls: ServiceUrls) -> Self {
        Self::with_client(reqwest::Client::new(), urls)
    }

    /// Create a client whose requests fail after `timeout`.
    pub fn with_timeout(urls: ServiceUrls, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, urls))
    }

    pub fn with_client(client: reqwest::Client, urls: ServiceUrls) -> Self {
        Self { client, urls }
    }

    /// Get the endpoint URLs.
    pub fn urls(&self) -> &ServiceUrls {
        &self.urls
    }

    fn parse_url(endpoint: &str) -> Result<Url> {
        Ok(Url::parse(endpoint)?)
    }

    /// Turn non-success responses into errors.
    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let resource = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 404 {
            Err(ClientError::NotFound { resource })
        } else {
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message: error_message(&body),
            })
        }
    }

    /// Decode a JSON response body.
    async fn handle_json<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let body = self.check(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Read a text response body.
    async fn handle_text(&self, response: reqwest::Response) -> Result<String> {
        Ok(self.check(response).await?.text().await?)
    }
}

/// Message of a `{"error": "..."}` body, or the raw body.
pub fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string));

    match from_json {
        Some(message) => message,
        None if body.trim().is_empty() => "Unknown error".to_string(),
        None => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_from_roots() {
        let urls = ServiceUrls::from_roots("http://search/", "http://list", "http://pay");

        assert_eq!(urls.search, "http://search/api/search");
        assert_eq!(urls.adoption_list, "http://list/api/adoptionlist/");
        assert_eq!(urls.complete_adoption, "http://pay/api/completeadoption");
        assert_eq!(urls.cleanup_adoptions, "http://pay/api/home/cleanupadoptions");
        assert_eq!(urls.status_updater, None);
    }

    #[test]
    fn test_error_message_from_json_body() {
        assert_eq!(
            error_message(r#"{"error":"Bad request parameters"}"#),
            "Bad request parameters"
        );
    }

    #[test]
    fn test_error_message_from_text_body() {
        assert_eq!(error_message("upstream timed out\n"), "upstream timed out");
        assert_eq!(error_message(""), "Unknown error");
        assert_eq!(error_message(r#"{"message":"x"}"#), r#"{"message":"x"}"#);
    }
}
