/// Recommendation backend abstraction
///
/// The session talks to the backend through three narrow contracts so the
/// state machine can be driven by the HTTP implementation in production and
/// by mocks in tests. Each call is a single attempt; retrying is left to the
/// user.
use crate::{
    error::{BackendResult, RecommendationResult},
    models::{Catalog, ItemId, RankedResult},
};

pub mod http;

pub use http::HttpBackend;

/// Verifies the backend has its data loaded before the session uses it
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait HealthProbe: Send + Sync {
    /// Succeeds only when both the catalog and the rating data are loaded.
    async fn check(&self) -> BackendResult<()>;
}

/// Source of the session catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetches the catalog, preserving server order.
    async fn load(&self) -> BackendResult<Catalog>;
}

/// Submits a selection and returns ranked recommendations
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationClient: Send + Sync {
    /// Sends `ids` (0-3 entries, slot order) as one request.
    ///
    /// An empty result is a valid outcome, not an error.
    async fn submit(&self, ids: &[ItemId]) -> RecommendationResult<RankedResult>;
}
