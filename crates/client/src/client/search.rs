//! Pet search operations.

use petadoptions_core::pet::{PetSearchQuery, PetSearchResult};
use url::Url;

use super::PetAdoptionsClient;
use crate::error::Result;

/// Search URL for `query` against a search endpoint.
///
/// The endpoint may already end in `?`, as the published search URL does.
///
/// ```
/// use petadoptions_client::search_url;
/// use petadoptions_core::pet::PetSearchQuery;
///
/// let url = search_url("http://petsearch/api/search?", &PetSearchQuery::by_id("012")).unwrap();
/// assert_eq!(url.as_str(), "http://petsearch/api/search?petid=012");
/// ```
pub fn search_url(endpoint: &str, query: &PetSearchQuery) -> Result<Url> {
    let mut url = PetAdoptionsClient::parse_url(endpoint)?;

    let filters = query.filters();
    if !filters.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in filters {
            pairs.append_pair(name, value);
        }
    }

    Ok(url)
}

impl PetAdoptionsClient {
    /// Search pets.
    pub async fn search(&self, query: &PetSearchQuery) -> Result<Vec<PetSearchResult>> {
        let url = search_url(&self.urls.search, query)?;
        tracing::debug!(%url, "Searching pets");

        let response = self.client.get(url).send().await?;
        self.handle_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_without_filters() {
        let url = search_url("http://petsearch/api/search", &PetSearchQuery::default()).unwrap();
        assert_eq!(url.as_str(), "http://petsearch/api/search");
    }

    #[test]
    fn test_search_url_with_filters() {
        let query = PetSearchQuery::by_type("puppy").with_color("light brown");
        let url = search_url("http://petsearch/api/search", &query).unwrap();

        assert_eq!(
            url.as_str(),
            "http://petsearch/api/search?pettype=puppy&petcolor=light+brown"
        );
    }

    #[test]
    fn test_search_url_invalid_endpoint() {
        assert!(search_url("not a url", &PetSearchQuery::default()).is_err());
    }
}
