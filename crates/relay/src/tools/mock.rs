use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

use super::client::ToolClient;
use crate::errors::{RelayError, RelayResult};

/// A recorded tool invocation
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub name: String,
    pub arguments: Value,
}

/// A mock tool client that replays pre-configured results in order
#[derive(Clone)]
pub struct MockToolClient {
    responses: Arc<Mutex<Vec<RelayResult<Option<Value>>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockToolClient {
    pub fn new(responses: Vec<RelayResult<Option<Value>>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolClient for MockToolClient {
    async fn call_tool(&self, name: &str, arguments: Value) -> RelayResult<Option<Value>> {
        self.calls.lock().unwrap().push(RecordedCall {
            name: name.to_string(),
            arguments,
        });
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Err(RelayError::transport("mock tool client has no more responses"))
        } else {
            responses.remove(0)
        }
    }
}
