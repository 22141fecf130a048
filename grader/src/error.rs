//! Grader Error Types
//!
//! Unlike identity extraction, a failed grading call IS surfaced: there is no
//! cheaper result to degrade to, and the caller must know the document was not
//! graded. Score/deduction inconsistencies are not errors; the normalizer
//! repairs them.

use llm::LlmError;
use std::fmt;

/// Represents all error types that can occur while grading a submission.
#[derive(Debug)]
pub enum GraderError {
    /// The completion call failed (transport, endpoint, or empty reply).
    Llm(LlmError),
    /// The grading reply was not the expected JSON shape.
    InvalidJson(String),
}

impl fmt::Display for GraderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraderError::Llm(e) => write!(f, "grading call failed: {}", e),
            GraderError::InvalidJson(msg) => write!(f, "invalid grading reply: {}", msg),
        }
    }
}

impl std::error::Error for GraderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GraderError::Llm(e) => Some(e),
            GraderError::InvalidJson(_) => None,
        }
    }
}

impl From<LlmError> for GraderError {
    fn from(err: LlmError) -> Self {
        GraderError::Llm(err)
    }
}
