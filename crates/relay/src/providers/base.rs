use async_trait::async_trait;

use crate::errors::RelayResult;

/// Token counts reported alongside a completion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// A language model service that turns a single user prompt into text
#[async_trait]
pub trait Provider: Send + Sync {
    /// Send one user message and return the text of the first choice
    async fn complete(&self, prompt: &str) -> RelayResult<String>;
}
