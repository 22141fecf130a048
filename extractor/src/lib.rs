//! # Extractor Library
//!
//! This crate recovers a student's identity (identifier and display name) from
//! an assignment submission's text, using a prioritized, multi-stage strategy
//! that keeps the paid model call strictly as a fallback.
//!
//! ## Key Concepts
//! - **ExtractionJob**: the main struct representing identity extraction for a
//!   single document.
//! - **Stages**: pattern cascades over the primary text, then over structured
//!   regions, then one model-based fallback call for fields still missing.
//! - **Degradation**: identity that cannot be found is data (`"unknown"` /
//!   `None`), never an error; only an unreadable source document fails.

pub mod answers;
pub mod document;
pub mod error;
pub mod llm_fallback;
pub mod patterns;
pub mod types;

use crate::document::DocumentText;
use crate::types::{CandidateSource, ExtractionResult, IdentityCandidate, UNKNOWN_STUDENT_ID};
use llm::ChatClient;
use tracing::{debug, info};

pub use error::ExtractorError;

/// Represents identity extraction for a single document.
///
/// Stages run in fixed priority order and a field filled by an earlier stage
/// is never overwritten by a later one:
///
/// 1. Ordered pattern cascades over the document's primary text.
/// 2. The same cascades over each structured region, for fields still missing.
/// 3. One model-based fallback call, for fields still missing, if a client was
///    attached. Failures there degrade to whatever the earlier stages found.
pub struct ExtractionJob<'a> {
    document: &'a DocumentText,
    llm: Option<&'a dyn ChatClient>,
}

impl<'a> ExtractionJob<'a> {
    /// Create an extraction job for one document, with no model fallback.
    pub fn new(document: &'a DocumentText) -> Self {
        Self {
            document,
            llm: None,
        }
    }

    /// Attach the model capability used by the fallback stage.
    pub fn with_llm(mut self, client: &'a dyn ChatClient) -> Self {
        self.llm = Some(client);
        self
    }

    /// Run the staged extraction.
    ///
    /// Never fails: absence of identity information degrades to the
    /// [`UNKNOWN_STUDENT_ID`] / `None` defaults.
    pub async fn extract(self) -> ExtractionResult {
        // Stage 1: pattern cascades over the primary text.
        let primary = self.document.primary_text();
        let mut candidate = IdentityCandidate {
            id: patterns::first_id_match(&primary),
            name: patterns::first_name_match(&primary),
            source: CandidateSource::Regex,
        };
        debug!(id = ?candidate.id, name = ?candidate.name, "primary text stage");

        // Stage 2: structured regions, for fields still missing.
        if candidate.id.is_none() || candidate.name.is_none() {
            for region in self.document.regions() {
                let flat = region.flattened();
                if candidate.id.is_none() {
                    if let Some(id) = patterns::first_id_match(&flat) {
                        candidate.id = Some(id);
                        candidate.source = CandidateSource::Table;
                    }
                }
                if candidate.name.is_none() {
                    if let Some(name) = patterns::first_name_match(&flat) {
                        candidate.name = Some(name);
                        candidate.source = CandidateSource::Table;
                    }
                }
                if candidate.id.is_some() && candidate.name.is_some() {
                    break;
                }
            }
            debug!(id = ?candidate.id, name = ?candidate.name, "structured region stage");
        }

        // Stage 3: model fallback, only for fields still missing. A model
        // answer never overrides a positive match from the cheaper stages.
        if candidate.id.is_none() || candidate.name.is_none() {
            if let Some(client) = self.llm {
                let fallback =
                    llm_fallback::extract_identity(client, &self.document.full_text()).await;
                if candidate.id.is_none() {
                    candidate.id = fallback.id;
                }
                if candidate.name.is_none() {
                    candidate.name = fallback.name;
                }
            }
        }

        let result = ExtractionResult {
            student_id: candidate
                .id
                .unwrap_or_else(|| UNKNOWN_STUDENT_ID.to_string()),
            student_name: candidate.name,
        };
        info!(
            student_id = %result.student_id,
            student_name = ?result.student_name,
            "identity extraction finished"
        );
        result
    }
}
