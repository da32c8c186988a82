//! Client side of the JSON-RPC tool endpoint.
//!
//! The endpoint exposes named tools behind a single `tools/call` method. The
//! pipeline uses two of them, `upload` and `retrieve`, which together behave
//! like a small content-addressed file store.

pub mod client;
pub mod jsonrpc;
pub mod storage;

#[cfg(test)]
pub mod mock;

pub use client::{HttpToolClient, ToolClient, ToolClientConfig};
