use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;

use crate::errors::{RelayError, RelayResult};
use crate::providers::base::Provider;

/// A mock provider that returns pre-configured responses for testing
///
/// Every prompt it receives is recorded so tests can assert on what the
/// pipeline asked for.
#[derive(Clone)]
pub struct MockProvider {
    responses: Arc<Mutex<Vec<RelayResult<String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of responses
    pub fn new(responses: Vec<RelayResult<String>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, prompt: &str) -> RelayResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Err(RelayError::upstream("mock provider has no more responses"))
        } else {
            responses.remove(0)
        }
    }
}
