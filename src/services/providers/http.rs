/// HTTP implementation of the backend contracts
///
/// Endpoints:
/// 1. Health: `GET /health` → `{ movies_loaded, ratings_loaded, ... }`
/// 2. Catalog: `GET /api/movies` → `[{ id, title, genres?, avgRating? }]`
/// 3. Recommend: `POST /api/recommend` with `{ selected_movies }` → ranked list
///
/// Every response is validated here so malformed data never reaches the
/// selection or view layers.
use std::time::Duration;

use reqwest::Client as HttpClient;
use tracing::Instrument;

use crate::{
    config::Config,
    error::{BackendError, BackendResult, RecommendationError, RecommendationResult},
    middleware::request_id::{make_span, tag_request},
    models::{Catalog, HealthStatus, Item, ItemId, RankedResult, SubmissionPayload},
    services::providers::{CatalogStore, HealthProbe, RecommendationClient},
};

const HEALTH_PATH: &str = "/health";
const CATALOG_PATH: &str = "/api/movies";
const RECOMMEND_PATH: &str = "/api/recommend";

#[derive(Clone)]
pub struct HttpBackend {
    http_client: HttpClient,
    base_url: String,
}

impl HttpBackend {
    /// Creates a backend client for a fixed base URL
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(config.base_url(), config.request_timeout())
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Body text of a non-success response, or the read failure itself
async fn error_body(response: reqwest::Response) -> String {
    match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read error response body");
            format!("<unreadable body: {}>", e)
        }
    }
}

#[async_trait::async_trait]
impl HealthProbe for HttpBackend {
    async fn check(&self) -> BackendResult<()> {
        let (request, request_id) = tag_request(self.http_client.get(self.url(HEALTH_PATH)));

        async move {
            let response = request.send().await.map_err(BackendError::unavailable)?;

            if !response.status().is_success() {
                return Err(BackendError::BackendUnavailable(format!(
                    "health check returned status {}",
                    response.status()
                )));
            }

            let status: HealthStatus = response.json().await.map_err(|e| {
                BackendError::BackendUnavailable(format!("malformed health response: {}", e))
            })?;

            tracing::info!(
                movies_loaded = status.movies_loaded,
                ratings_loaded = status.ratings_loaded,
                movies_count = ?status.movies_count,
                ratings_count = ?status.ratings_count,
                "Backend health checked"
            );

            if !status.is_ready() {
                return Err(BackendError::DataNotLoaded {
                    movies_loaded: status.movies_loaded,
                    ratings_loaded: status.ratings_loaded,
                });
            }

            Ok(())
        }
        .instrument(make_span("GET", HEALTH_PATH, &request_id))
        .await
    }
}

#[async_trait::async_trait]
impl CatalogStore for HttpBackend {
    async fn load(&self) -> BackendResult<Catalog> {
        let (request, request_id) = tag_request(self.http_client.get(self.url(CATALOG_PATH)));

        async move {
            let response = request.send().await.map_err(BackendError::unavailable)?;
            let status = response.status();

            if !status.is_success() {
                let body = error_body(response).await;
                return Err(BackendError::CatalogFetchError {
                    status,
                    detail: body,
                });
            }

            let response_text = response.text().await.map_err(BackendError::unavailable)?;
            let items: Vec<Item> = serde_json::from_str(&response_text).map_err(|e| {
                tracing::error!(error = %e, "Failed to deserialize catalog response");
                BackendError::CatalogFetchError {
                    status,
                    detail: format!("malformed catalog response: {}", e),
                }
            })?;

            let catalog = Catalog::new(items).map_err(|duplicate| {
                BackendError::CatalogFetchError {
                    status,
                    detail: format!("duplicate item id {} in catalog", duplicate),
                }
            })?;

            tracing::info!(items = catalog.len(), "Catalog loaded");

            Ok(catalog)
        }
        .instrument(make_span("GET", CATALOG_PATH, &request_id))
        .await
    }
}

#[async_trait::async_trait]
impl RecommendationClient for HttpBackend {
    async fn submit(&self, ids: &[ItemId]) -> RecommendationResult<RankedResult> {
        let payload = SubmissionPayload {
            selected_movies: ids.to_vec(),
        };
        let (request, request_id) =
            tag_request(self.http_client.post(self.url(RECOMMEND_PATH)).json(&payload));

        async move {
            tracing::debug!(selected_movies = ?payload.selected_movies, "Submitting selection");

            let response = request.send().await?;
            let status = response.status();

            if !status.is_success() {
                let body = error_body(response).await;
                tracing::warn!(status = %status, body = %body, "Recommendation request rejected");
                return Err(RecommendationError::RecommendationRequestError { status, body });
            }

            let response_text = response.text().await?;
            let result = RankedResult::from_body(&response_text).map_err(|e| {
                tracing::error!(
                    error = %e,
                    response = %response_text,
                    "Failed to deserialize recommendation response"
                );
                RecommendationError::Malformed(e.to_string())
            })?;

            tracing::info!(results = result.len(), "Recommendations received");

            Ok(result)
        }
        .instrument(make_span("POST", RECOMMEND_PATH, &request_id))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:5000/", None).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:5000");
        assert_eq!(backend.url(HEALTH_PATH), "http://localhost:5000/health");
    }

    #[test]
    fn test_from_config_uses_configured_url() {
        let config = Config {
            api_base_url: "http://recs.local:9000".to_string(),
            request_timeout_secs: 2,
        };
        let backend = HttpBackend::from_config(&config).unwrap();
        assert_eq!(backend.url(CATALOG_PATH), "http://recs.local:9000/api/movies");
    }
}
