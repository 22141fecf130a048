//! # Model-Based Identity Fallback
//!
//! Stage 3 of identity extraction: when the pattern cascades leave the
//! identifier or the name unresolved, one completion request asks the model to
//! infer the missing fields from a sample of the document text.
//!
//! This stage is strictly best-effort. Transport failures and malformed
//! replies are logged as diagnostics and produce an empty candidate; they
//! never abort extraction, and a model answer never overrides a field a
//! cheaper stage already filled (the caller merges only missing fields).

use crate::types::{CandidateSource, IdentityCandidate};
use llm::ChatClient;
use serde::Deserialize;
use tracing::{info, warn};

/// Identity information sits at the top of a document, so only this many
/// leading characters are sent to the model.
pub const IDENTITY_SAMPLE_CHARS: usize = 2000;

/// Minimum trimmed-name length accepted from the model. Looser than the regex
/// stages' floor of 3: the model is presumed more reliable than a bare match.
const MIN_LLM_NAME_LEN: usize = 2;

const SYSTEM_MESSAGE: &str = "You are a helpful assistant that extracts student information from documents. Always respond with valid JSON only.";

/// The strict JSON shape the model is asked to produce.
#[derive(Debug, Deserialize)]
struct IdentityReply {
    #[serde(default)]
    student_id: Option<String>,
    #[serde(default)]
    student_name: Option<String>,
}

/// Ask the model for the student identity from the document's full text.
///
/// Always returns a candidate (possibly empty); failures are diagnostics, not
/// errors.
pub async fn extract_identity(client: &dyn ChatClient, full_text: &str) -> IdentityCandidate {
    let sample = truncate_chars(full_text, IDENTITY_SAMPLE_CHARS);

    let prompt = format!(
        r#"Extract the student's name and NetID/Student ID from the following document text.

Document text:
{}

Look for:
- Student name (could be labeled as "Name", "Author", "Student Name", "Submitted by", or just appear as a name)
- NetID or Student ID (could be labeled as "NetID", "Net ID", "Student ID", "ID", or appear as a pattern like "abc12345")

Respond in JSON format only:
{{
    "student_id": "abc12345" or "unknown" if not found,
    "student_name": "John Doe" or null if not found
}}

Be flexible with formats. The name might just appear without a label. The ID might be in various formats."#,
        sample
    );

    let raw = match client.complete(SYSTEM_MESSAGE, &prompt).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("identity fallback call failed, keeping regex results: {}", e);
            return IdentityCandidate::empty(CandidateSource::Llm);
        }
    };

    let reply: IdentityReply = match serde_json::from_str(&raw) {
        Ok(reply) => reply,
        Err(e) => {
            warn!("identity fallback reply is not valid JSON ({}): {}", e, raw);
            return IdentityCandidate::empty(CandidateSource::Llm);
        }
    };

    let id = reply
        .student_id
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("unknown"));
    let name = reply
        .student_name
        .map(|s| s.trim().to_string())
        .filter(|s| s.chars().count() >= MIN_LLM_NAME_LEN);

    info!(student_id = ?id, student_name = ?name, "model-based identity extraction");

    IdentityCandidate {
        id,
        name,
        source: CandidateSource::Llm,
    }
}

/// Slice `text` to at most `limit` characters, respecting char boundaries.
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
