//! Core trait definition for the loader seam

use crate::error::RepositoryResult;
use async_trait::async_trait;
use verdict_core::model::DecisionDocument;

/// Resolves decision keys to JDM documents.
///
/// The engine compiles and caches plans per key; a repository whose
/// documents can change underneath it should opt out of that cache by
/// overriding [`cache_enabled`](DecisionRepository::cache_enabled).
///
/// All implementations must be `Send + Sync`; the engine shares one
/// repository across concurrent evaluations.
#[async_trait]
pub trait DecisionRepository: Send + Sync {
    /// Load the document registered under `key`
    async fn load(&self, key: &str) -> RepositoryResult<DecisionDocument>;

    /// Whether compiled plans for this repository's documents may be cached
    fn cache_enabled(&self) -> bool {
        true
    }
}
