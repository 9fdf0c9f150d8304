//! Builder pattern for DecisionEngine

use crate::config::EngineConfig;
use crate::engine::DecisionEngine;
use crate::error::{EngineError, Result};
use std::sync::Arc;
use verdict_core::model::DecisionDocument;
use verdict_repository::{DecisionRepository, InMemoryRepository};

/// Builder for [`DecisionEngine`]
#[derive(Default)]
pub struct DecisionEngineBuilder {
    repository: Option<Arc<dyn DecisionRepository>>,
    documents: Vec<(String, DecisionDocument)>,
    config: EngineConfig,
}

impl DecisionEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a repository as the document source
    pub fn with_repository(mut self, repository: Arc<dyn DecisionRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Register a document inline; inline documents are served from an
    /// in-memory repository built at `build` time
    pub fn add_document(mut self, key: impl Into<String>, document: DecisionDocument) -> Self {
        self.documents.push((key.into(), document));
        self
    }

    /// Register a document from its JSON source
    pub fn add_document_json(self, key: impl Into<String>, source: &str) -> Result<Self> {
        let document = DecisionDocument::from_json(source)
            .map_err(verdict_repository::RepositoryError::from)?;
        Ok(self.add_document(key, document))
    }

    /// Toggle plan caching
    pub fn cache_plans(mut self, enable: bool) -> Self {
        self.config.cache_plans = enable;
        self
    }

    /// Build the engine
    pub fn build(self) -> Result<DecisionEngine> {
        let repository = match (self.repository, self.documents) {
            (Some(repository), documents) if documents.is_empty() => repository,
            (Some(_), _) => {
                return Err(EngineError::Config(
                    "inline documents cannot be combined with an explicit repository".to_string(),
                ))
            }
            (None, documents) => Arc::new(InMemoryRepository::with_documents(documents)),
        };
        Ok(DecisionEngine::with_config(repository, self.config))
    }
}
