use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::CodecError;

/// Failures surfaced by the transport clients and the pipeline.
///
/// Every variant carries a human readable message; the sequencer records
/// `to_string()` of the error as the content of its terminal log entry.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum RelayError {
    /// The request never produced a usable HTTP response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote service answered, but not with something we can use.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// A call succeeded but the payload lacked a field the pipeline needs.
    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

impl RelayError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    pub fn pipeline(message: impl Into<String>) -> Self {
        Self::Pipeline(message.into())
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Transport(err.to_string())
    }
}

impl From<CodecError> for RelayError {
    fn from(err: CodecError) -> Self {
        RelayError::Pipeline(err.to_string())
    }
}

pub type RelayResult<T> = Result<T, RelayError>;
