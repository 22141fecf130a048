//! # Types Module
//!
//! Core data structures for identity extraction results.

use serde::Serialize;

/// Sentinel value for a student identifier that could not be recovered.
///
/// `ExtractionResult::student_id` is never the empty string; absence is always
/// represented by this literal.
pub const UNKNOWN_STUDENT_ID: &str = "unknown";

/// Which extraction stage produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// Pattern match over the document's primary text.
    Regex,
    /// Pattern match over a structured region (table row, cell grouping).
    Table,
    /// Model-based fallback extraction.
    Llm,
}

/// A partial identity produced by one extraction stage.
///
/// Candidates are merged in stage order; a field filled by an earlier stage is
/// never overwritten by a later one.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityCandidate {
    pub id: Option<String>,
    pub name: Option<String>,
    pub source: CandidateSource,
}

impl IdentityCandidate {
    /// A candidate carrying no fields, tagged with the stage that produced it.
    pub fn empty(source: CandidateSource) -> Self {
        Self {
            id: None,
            name: None,
            source,
        }
    }
}

/// The final outcome of identity extraction for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    /// Recovered student identifier, or [`UNKNOWN_STUDENT_ID`].
    pub student_id: String,
    /// Recovered display name; trimmed and non-empty when present.
    pub student_name: Option<String>,
}

impl Default for ExtractionResult {
    fn default() -> Self {
        Self {
            student_id: UNKNOWN_STUDENT_ID.to_string(),
            student_name: None,
        }
    }
}

impl ExtractionResult {
    /// True when both the identifier and the name were recovered.
    pub fn is_complete(&self) -> bool {
        self.student_id != UNKNOWN_STUDENT_ID && self.student_name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_result_is_unknown() {
        let result = ExtractionResult::default();
        assert_eq!(result.student_id, "unknown");
        assert!(result.student_name.is_none());
        assert!(!result.is_complete());
    }

    #[test]
    fn test_is_complete() {
        let result = ExtractionResult {
            student_id: "abc12345".to_string(),
            student_name: Some("Jane Doe".to_string()),
        };
        assert!(result.is_complete());

        let missing_name = ExtractionResult {
            student_id: "abc12345".to_string(),
            student_name: None,
        };
        assert!(!missing_name.is_complete());
    }
}
