//! Shared helpers for engine integration tests

use verdict_core::Value;
use verdict_runtime::{EvaluationOptions, EvaluationResult};
use verdict_sdk::DecisionEngine;

/// Engine wrapper serving a single inline document under the key `main`
pub struct TestEngine {
    engine: DecisionEngine,
}

impl TestEngine {
    pub fn with_document(source: &str) -> Self {
        let engine = DecisionEngine::builder()
            .add_document_json("main", source)
            .expect("test document parses")
            .build()
            .expect("test engine builds");
        TestEngine { engine }
    }

    pub async fn evaluate(&self, context: serde_json::Value) -> EvaluationResult {
        self.engine
            .evaluate("main", &Value::from(context))
            .await
            .expect("evaluation succeeds")
    }

    #[allow(dead_code)]
    pub async fn evaluate_with_options(
        &self,
        context: serde_json::Value,
        options: &EvaluationOptions,
    ) -> EvaluationResult {
        self.engine
            .evaluate_with_options("main", &Value::from(context), options)
            .await
            .expect("evaluation succeeds")
    }

    #[allow(dead_code)]
    pub fn inner(&self) -> &DecisionEngine {
        &self.engine
    }
}
