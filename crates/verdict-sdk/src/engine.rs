//! Core DecisionEngine implementation

use crate::builder::DecisionEngineBuilder;
use crate::config::EngineConfig;
use crate::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use verdict_compiler::PlanCompiler;
use verdict_core::model::DecisionDocument;
use verdict_core::plan::DecisionPlan;
use verdict_core::Value;
use verdict_repository::DecisionRepository;
use verdict_runtime::{EvaluationOptions, EvaluationResult, GraphExecutor};

/// Evaluates JSON Decision Models loaded through a repository.
///
/// The engine is cheap to share: parsed plans are immutable and cached per
/// key, and each evaluation owns its own context and trace buffer, so one
/// instance serves concurrent callers.
pub struct DecisionEngine {
    repository: Arc<dyn DecisionRepository>,

    /// Compiled plans keyed by decision key
    plans: RwLock<HashMap<String, Arc<DecisionPlan>>>,

    config: EngineConfig,
}

impl DecisionEngine {
    /// Create an engine over a repository with the default configuration
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self::with_config(repository, EngineConfig::default())
    }

    /// Create an engine with an explicit configuration
    pub fn with_config(repository: Arc<dyn DecisionRepository>, config: EngineConfig) -> Self {
        DecisionEngine {
            repository,
            plans: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Start building an engine
    pub fn builder() -> DecisionEngineBuilder {
        DecisionEngineBuilder::new()
    }

    /// Evaluate the decision registered under `key` with default options
    pub async fn evaluate(&self, key: &str, context: &Value) -> Result<EvaluationResult> {
        self.evaluate_with_options(key, context, &EvaluationOptions::default())
            .await
    }

    /// Evaluate the decision registered under `key`
    pub async fn evaluate_with_options(
        &self,
        key: &str,
        context: &Value,
        options: &EvaluationOptions,
    ) -> Result<EvaluationResult> {
        let plan = self.plan(key).await?;
        tracing::debug!(key, document = %plan.id, "evaluating decision");
        Ok(GraphExecutor::new(&plan).execute(context, options)?)
    }

    /// Evaluate a pre-loaded document with default options
    pub async fn evaluate_document(
        &self,
        document: &DecisionDocument,
        context: &Value,
    ) -> Result<EvaluationResult> {
        self.evaluate_document_with_options(document, context, &EvaluationOptions::default())
            .await
    }

    /// Evaluate a pre-loaded document, bypassing the repository
    pub async fn evaluate_document_with_options(
        &self,
        document: &DecisionDocument,
        context: &Value,
        options: &EvaluationOptions,
    ) -> Result<EvaluationResult> {
        let plan = self.compile(document)?;
        Ok(GraphExecutor::new(&plan).execute(context, options)?)
    }

    /// Compile a document into a reusable plan
    pub fn compile(&self, document: &DecisionDocument) -> Result<Arc<DecisionPlan>> {
        Ok(Arc::new(PlanCompiler::compile(document)?))
    }

    /// Drop every cached plan; subsequent evaluations reload and recompile
    pub async fn clear_cache(&self) {
        self.plans.write().await.clear();
    }

    /// Resolve a key to a compiled plan, consulting the cache when both the
    /// engine and the repository allow it
    async fn plan(&self, key: &str) -> Result<Arc<DecisionPlan>> {
        let cacheable = self.config.cache_plans && self.repository.cache_enabled();

        if cacheable {
            if let Some(plan) = self.plans.read().await.get(key) {
                return Ok(plan.clone());
            }
        }

        let document = self.repository.load(key).await?;
        let plan = Arc::new(PlanCompiler::compile(&document)?);

        if cacheable {
            // a concurrent call may have filled the slot; keep the first
            let mut plans = self.plans.write().await;
            return Ok(plans.entry(key.to_string()).or_insert(plan).clone());
        }
        Ok(plan)
    }
}
