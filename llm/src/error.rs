//! LLM Error Types
//!
//! This module defines the [`LlmError`] enum covering every way a completion
//! request can fail: transport problems, replies the endpoint rejected, and
//! replies that arrived but carried no usable content.

use std::fmt;

/// Represents all error types that can occur while talking to the completion endpoint.
#[derive(Debug)]
pub enum LlmError {
    /// The request could not be sent or the endpoint rejected it (network, auth, status).
    Request(String),
    /// The endpoint answered but produced no choices or no message content.
    EmptyReply(String),
    /// The reply body could not be decoded against the expected schema.
    MalformedReply(String),
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::Request(msg) => write!(f, "LLM request failed: {}", msg),
            LlmError::EmptyReply(model) => write!(f, "LLM returned an empty reply (model: {})", model),
            LlmError::MalformedReply(msg) => write!(f, "LLM reply could not be decoded: {}", msg),
        }
    }
}

impl std::error::Error for LlmError {}
