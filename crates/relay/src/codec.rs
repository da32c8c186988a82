//! Text codec for the storage tool.
//!
//! The upload and retrieve tools move bytes, but they travel inside JSON
//! string fields. Text is carried as standard (padded) base64 of its UTF-8
//! encoding.
//!
//! Rust strings are valid UTF-8 by construction, so text holding unpaired
//! UTF-16 surrogates cannot reach [`encode`]. On the way back, bytes that are
//! not valid UTF-8 are rejected by [`decode`] with [`CodecError::InvalidUtf8`]
//! rather than being replaced with U+FFFD.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("payload is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("payload is not valid UTF-8 text: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Encode text into its transport-safe form.
pub fn encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Exact inverse of [`encode`].
pub fn decode(encoded: &str) -> Result<String, CodecError> {
    let bytes = STANDARD.decode(encoded.trim())?;
    Ok(String::from_utf8(bytes)?)
}
