//! Upstream repository API client.
//!
//! The metadata fetch is on the critical path and its failure is fatal to the
//! caller. The README fetch is best-effort enrichment: failures are logged and
//! reported as an absent document.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::errors::AppError;
use crate::models::{RepositoryMetadata, RepositoryResponse};

/// Client for the repository/readme API.
#[derive(Debug, Clone)]
pub struct RepositoryApi {
    client: Client,
    base_url: Url,
}

impl RepositoryApi {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            AppError::Configuration(format!("Invalid upstream API URL {:?}: {}", base_url, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(AppError::Configuration(format!(
                "Upstream API URL {} cannot be used as a base",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// `{base}/repository/{id}`, with `id` encoded as a single path segment.
    fn repository_url(&self, id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("repository").push(id);
        }
        url
    }

    /// `{base}/getReadme?repoId={id}`.
    fn readme_url(&self, id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("getReadme");
        }
        url.query_pairs_mut().append_pair("repoId", id);
        url
    }

    /// Fetch repository metadata.
    pub async fn fetch_repository(&self, id: &str) -> Result<RepositoryMetadata, AppError> {
        let response = self
            .client
            .get(self.repository_url(id))
            .send()
            .await?
            .error_for_status()?;

        let body: RepositoryResponse = response.json().await?;
        Ok(body.repository.into())
    }

    /// Fetch the rendered README, or `None` if it could not be retrieved.
    pub async fn fetch_readme(&self, id: &str) -> Option<String> {
        let result = async {
            self.client
                .get(self.readme_url(id))
                .send()
                .await?
                .error_for_status()?
                .text()
                .await
        }
        .await;

        match result {
            Ok(html) => Some(html),
            Err(e) => {
                tracing::warn!(id = %id, "Could not fetch README: {}", e);
                None
            }
        }
    }

    /// Fetch metadata and README concurrently. Only a metadata failure is an error.
    pub async fn collect(&self, id: &str) -> Result<(RepositoryMetadata, Option<String>), AppError> {
        let (metadata, readme) = tokio::join!(self.fetch_repository(id), self.fetch_readme(id));
        Ok((metadata?, readme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> RepositoryApi {
        RepositoryApi::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_repository_url() {
        let api = api("http://api-server:8080");
        assert_eq!(
            api.repository_url("42").as_str(),
            "http://api-server:8080/repository/42"
        );
    }

    #[test]
    fn test_repository_url_keeps_base_path_and_encodes_id() {
        let api = api("http://localhost:9000/api/");
        assert_eq!(
            api.repository_url("a/b c").as_str(),
            "http://localhost:9000/api/repository/a%2Fb%20c"
        );
    }

    #[test]
    fn test_readme_url() {
        let api = api("http://api-server:8080");
        assert_eq!(
            api.readme_url("42").as_str(),
            "http://api-server:8080/getReadme?repoId=42"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = RepositoryApi::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));

        let err = RepositoryApi::new("mailto:ops@example.com", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_unreachable_upstream() {
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let api = api("http://127.0.0.1:9");
        assert!(matches!(
            api.fetch_repository("1").await,
            Err(AppError::Upstream(_))
        ));
        assert_eq!(api.fetch_readme("1").await, None);
    }
}
