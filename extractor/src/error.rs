//! Extractor Error Types
//!
//! Identity that cannot be found is data, not an error: extraction degrades to
//! the `"unknown"` / `None` defaults. The only hard failure this crate
//! propagates is a source document that cannot be read at all.

use std::fmt;

/// Represents all error types that can occur while building document text.
#[derive(Debug)]
pub enum ExtractorError {
    /// The source document could not be read or parsed at all.
    DocumentUnreadable(String),
}

impl fmt::Display for ExtractorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractorError::DocumentUnreadable(msg) => {
                write!(f, "document is unreadable: {}", msg)
            }
        }
    }
}

impl std::error::Error for ExtractorError {}
