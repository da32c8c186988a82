use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::{RelayError, RelayResult};

pub const JSONRPC_VERSION: &str = "2.0";
pub const TOOLS_CALL_METHOD: &str = "tools/call";

/// Standard JSON-RPC error codes used by tool endpoints
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    pub jsonrpc: String,
    pub id: String,
    pub method: String,
    pub params: ToolCallParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCallRequest {
    /// Build a `tools/call` request with a fresh correlation id
    pub fn new(name: &str, arguments: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Uuid::new_v4().to_string(),
            method: TOOLS_CALL_METHOD.to_string(),
            params: ToolCallParams {
                name: name.to_string(),
                arguments,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCallResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ToolCallResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCallResult {
    #[serde(default)]
    pub content: Vec<ToolContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolContent {
    #[serde(rename = "type", default = "default_content_type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

fn default_content_type() -> String {
    "text".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl ToolCallResponse {
    /// A successful response whose single text item is `payload` serialized as JSON
    pub fn success(id: impl Into<Value>, payload: &Value) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            id: id.into(),
            result: Some(ToolCallResult {
                content: vec![ToolContent {
                    kind: default_content_type(),
                    text: Some(payload.to_string()),
                }],
            }),
            error: None,
        }
    }

    pub fn failure(id: impl Into<Value>, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            id: id.into(),
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }

    /// Extract the structured payload carried in `result.content[0].text`.
    ///
    /// A response without that field, including one that carries an `error`
    /// object, yields `Ok(None)`. Text that is not JSON is an upstream failure.
    pub fn into_payload(self) -> RelayResult<Option<Value>> {
        if let Some(error) = &self.error {
            tracing::warn!(code = error.code, message = %error.message, "tool call returned an error");
        }

        let text = self
            .result
            .and_then(|result| result.content.into_iter().next())
            .and_then(|content| content.text);

        match text {
            Some(text) => serde_json::from_str(&text).map(Some).map_err(|e| {
                RelayError::upstream(format!("tool result text is not JSON: {}", e))
            }),
            None => Ok(None),
        }
    }
}
