use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::jsonrpc::{ToolCallRequest, ToolCallResponse};
use crate::errors::{RelayError, RelayResult};

pub const DEFAULT_TOOLS_ENDPOINT: &str = "http://127.0.0.1:3000/rest";

/// A remote endpoint that runs named tools
#[async_trait]
pub trait ToolClient: Send + Sync {
    /// Invoke `name` with `arguments`, returning the structured payload of the
    /// result or `None` when the response carries none
    async fn call_tool(&self, name: &str, arguments: Value) -> RelayResult<Option<Value>>;
}

#[derive(Debug, Clone)]
pub struct ToolClientConfig {
    pub endpoint: String,
}

impl Default for ToolClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TOOLS_ENDPOINT.to_string(),
        }
    }
}

/// Talks JSON-RPC over HTTP POST
pub struct HttpToolClient {
    client: Client,
    config: ToolClientConfig,
}

impl HttpToolClient {
    pub fn new(config: ToolClientConfig) -> RelayResult<Self> {
        let client = Client::builder().build()?;

        Ok(Self { client, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl ToolClient for HttpToolClient {
    async fn call_tool(&self, name: &str, arguments: Value) -> RelayResult<Option<Value>> {
        let request = ToolCallRequest::new(name, arguments);
        tracing::debug!(tool = name, id = %request.id, endpoint = %self.config.endpoint, "calling tool");

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::transport(format!(
                "tool endpoint returned {} for {}",
                status, name
            )));
        }

        let body: ToolCallResponse = response.json().await.map_err(|e| {
            RelayError::transport(format!("tool endpoint returned a non-JSON body: {}", e))
        })?;

        body.into_payload()
    }
}
