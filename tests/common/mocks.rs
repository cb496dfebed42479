//! Mock implementations for testing.
//!
//! Shared across the integration test files so agents can run without a model
//! server.

use async_trait::async_trait;
use claimflow::llm::{LLMClient, json};
use claimflow::types::{AppError, RawModelOutput, Result};
use std::sync::{Arc, Mutex};

/// A recorded `(system, prompt)` pair.
pub type Call = (String, String);

/// Mock LLM client with a canned reply.
///
/// JSON-mode calls run the reply through the same object extraction the real
/// client uses, so tests can feed fenced or `<think>`-prefixed text.
///
/// # Examples
///
/// ```ignore
/// let client = MockLLMClient::new(r#"{"research_confidence": "HIGH"}"#);
/// let calls = client.calls();
/// let agent = ResearchAgent::new(Box::new(client));
/// ```
#[derive(Clone)]
pub struct MockLLMClient {
    response: String,
    should_fail: bool,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockLLMClient {
    /// Create a new mock client that returns the given response.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
            calls: Arc::default(),
        }
    }

    /// Create a mock client that always returns an error.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new("")
        }
    }

    /// Handle to the calls made through this client and its clones.
    pub fn calls(&self) -> Arc<Mutex<Vec<Call>>> {
        Arc::clone(&self.calls)
    }

    fn record(&self, system: &str, prompt: &str) -> Result<()> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push((system.to_string(), prompt.to_string()));

        if self.should_fail {
            return Err(AppError::LLM("Mock LLM failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.record(system, prompt)?;
        Ok(self.response.clone())
    }

    async fn generate_json(&self, system: &str, prompt: &str) -> Result<RawModelOutput> {
        self.record(system, prompt)?;
        json::parse_object(&self.response)
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
