use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::{RelayError, RelayResult};

pub const UPLOAD_TOOL: &str = "upload";
pub const RETRIEVE_TOOL: &str = "retrieve";

/// Arguments for the `upload` tool
pub fn upload_arguments(encoded: &str, name: &str) -> Value {
    json!({ "file": encoded, "name": name })
}

/// Arguments for the `retrieve` tool
pub fn retrieve_arguments(cid: &str, name: &str) -> Value {
    json!({ "filepath": file_path(cid, name) })
}

/// Path of a stored file: `<cid>/<name>`
pub fn file_path(cid: &str, name: &str) -> String {
    format!("{}/{}", cid, name)
}

/// Link object as returned by the upload tool: `{"/": "<cid>"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentLink {
    #[serde(rename = "/")]
    pub cid: String,
}

/// Response of the `upload` tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub root: ContentLink,
}

impl UploadReceipt {
    pub fn new(cid: impl Into<String>) -> Self {
        Self {
            root: ContentLink { cid: cid.into() },
        }
    }

    pub fn cid(&self) -> &str {
        &self.root.cid
    }

    /// Parse a tool payload, treating a missing identifier as a failed upload
    pub fn from_payload(payload: Option<Value>) -> RelayResult<Self> {
        payload
            .and_then(|value| serde_json::from_value::<UploadReceipt>(value).ok())
            .filter(|receipt| !receipt.root.cid.is_empty())
            .ok_or_else(|| RelayError::pipeline("upload failed"))
    }
}

/// Response of the `retrieve` tool; `data` holds the encoded file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedFile {
    pub data: String,
}

impl RetrievedFile {
    pub fn from_payload(payload: Option<Value>) -> RelayResult<Self> {
        payload
            .and_then(|value| serde_json::from_value::<RetrievedFile>(value).ok())
            .ok_or_else(|| RelayError::pipeline("retrieve failed"))
    }
}
