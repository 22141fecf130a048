//! # LLM Capability Library
//!
//! This crate provides the single capability the grading workspace needs from a
//! Large Language Model: one completion request that returns raw text, with the
//! model instructed to reply in strict JSON.
//!
//! ## Key Concepts
//! - **ChatClient**: the capability trait. Callers depend on this seam so tests
//!   can substitute canned, failing, or malformed replies without any network.
//! - **OpenAiClient**: a `reqwest`-based implementation targeting any
//!   OpenAI-compatible `chat/completions` endpoint. Credentials and the base
//!   URL come from [`util::config::AppConfig`].
//!
//! Transport and decoding failures are returned as [`LlmError`] values; it is
//! the caller's policy whether such a failure is fatal (grading) or a
//! degradation trigger (identity extraction fallback).

pub mod client;
pub mod error;

pub use client::{ChatClient, OpenAiClient};
pub use error::LlmError;
