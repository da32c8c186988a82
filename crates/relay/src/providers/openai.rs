use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::base::{Provider, Usage};
use super::configs::OpenAiProviderConfig;
use crate::errors::{RelayError, RelayResult};

pub struct OpenAiProvider {
    client: Client,
    config: OpenAiProviderConfig,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<i32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiProviderConfig) -> RelayResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn get_usage(data: &Value) -> Option<Usage> {
        let usage = data.get("usage")?;

        let input_tokens = usage
            .get("prompt_tokens")
            .and_then(|v| v.as_i64())
            .map(|v| v as i32);

        let output_tokens = usage
            .get("completion_tokens")
            .and_then(|v| v.as_i64())
            .map(|v| v as i32);

        let total_tokens = usage
            .get("total_tokens")
            .and_then(|v| v.as_i64())
            .map(|v| v as i32)
            .or_else(|| match (input_tokens, output_tokens) {
                (Some(input), Some(output)) => Some(input + output),
                _ => None,
            });

        Some(Usage::new(input_tokens, output_tokens, total_tokens))
    }

    fn build_payload<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    async fn post(&self, payload: &ChatRequest<'_>) -> RelayResult<Value> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.host.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::upstream(format!(
                "completion request failed: {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| RelayError::upstream(format!("completion response is not JSON: {}", e)))
    }
}

/// Pull the first choice's text out of a chat completion body
fn response_to_text(response: Value) -> RelayResult<String> {
    if let Some(error) = response.get("error") {
        return Err(RelayError::upstream(format!("OpenAI API error: {}", error)));
    }

    let completion: ChatCompletion = serde_json::from_value(response)
        .map_err(|e| RelayError::upstream(format!("malformed completion response: {}", e)))?;

    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| RelayError::upstream("completion response contained no choices"))?;

    choice
        .message
        .content
        .ok_or_else(|| RelayError::upstream("completion choice has no text content"))
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> RelayResult<String> {
        let payload = self.build_payload(prompt);
        let response = self.post(&payload).await?;

        if let Some(usage) = Self::get_usage(&response) {
            tracing::debug!(
                model = %self.config.model,
                input_tokens = ?usage.input_tokens,
                output_tokens = ?usage.output_tokens,
                total_tokens = ?usage.total_tokens,
                "completion usage"
            );
        }

        response_to_text(response)
    }
}
