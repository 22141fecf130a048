//! # Grader Library
//!
//! This crate produces a grade and itemized feedback for one student
//! submission by delegating judgment to an LLM completion call, comparing the
//! submission against a reference solution.
//!
//! ## Key Concepts
//! - **GradingJob**: the main struct representing the grading of a single
//!   submission.
//! - **ScoreNormalizer**: repairs the model's arithmetic so that itemized
//!   deductions sum to exactly `100 - score` (see [`normalizer`]).
//! - **Reports**: structured, timestamped output wrapping score, feedback and
//!   deductions (see [`report`]).
//!
//! A failed grading call is surfaced as an error; per-document independence
//! (one failure not aborting a batch) is the caller's concern.

pub mod error;
pub mod normalizer;
pub mod report;
pub mod types;

use crate::error::GraderError;
use crate::normalizer::normalize_deductions;
use crate::report::{GradeReport, GradeReportResponse};
use crate::types::RawGrade;
use chrono::Utc;
use extractor::types::{ExtractionResult, UNKNOWN_STUDENT_ID};
use llm::ChatClient;
use tracing::{debug, info};

const SYSTEM_MESSAGE: &str =
    "You are a helpful grading assistant. Always respond with valid JSON.";

/// Represents the grading of a single student submission.
///
/// Encapsulates the reference (base) solution content, the student's
/// submission content, the submitted file name and the student's extracted
/// identity.
pub struct GradingJob<'a> {
    reference_content: String,
    student_content: String,
    filename: String,
    identity: Option<&'a ExtractionResult>,
}

impl<'a> GradingJob<'a> {
    /// Create a grading job from reference and student content.
    pub fn new(
        reference_content: impl Into<String>,
        student_content: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            reference_content: reference_content.into(),
            student_content: student_content.into(),
            filename: filename.into(),
            identity: None,
        }
    }

    /// Attach the student identity recovered by the extractor.
    pub fn with_identity(mut self, identity: &'a ExtractionResult) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Run the grading call and build a normalized report.
    ///
    /// # Errors
    ///
    /// Returns [`GraderError`] when the completion call fails or its reply is
    /// not the expected JSON shape. Inconsistent deduction arithmetic is not
    /// an error; the normalizer repairs it.
    pub async fn grade(
        self,
        client: &dyn ChatClient,
    ) -> Result<GradeReportResponse, GraderError> {
        let prompt = self.build_prompt();
        debug!(filename = %self.filename, prompt_length = prompt.len(), "issuing grading call");

        let raw = client.complete(SYSTEM_MESSAGE, &prompt).await?;

        let parsed: RawGrade = serde_json::from_str(&raw).map_err(|e| {
            GraderError::InvalidJson(format!(
                "error decoding grading reply: {}. Full reply: {}",
                e, raw
            ))
        })?;

        let deductions = normalize_deductions(parsed.score, parsed.deductions);

        let (student_id, student_name) = match self.identity {
            Some(identity) => (identity.student_id.clone(), identity.student_name.clone()),
            None => (UNKNOWN_STUDENT_ID.to_string(), None),
        };

        info!(
            filename = %self.filename,
            student_id = %student_id,
            score = parsed.score,
            "grading finished"
        );

        let report = GradeReport {
            filename: self.filename,
            student_id,
            student_name,
            score: parsed.score,
            feedback: parsed.feedback,
            deductions,
            created_at: Utc::now().to_rfc3339(),
        };
        Ok(report.into())
    }

    fn build_prompt(&self) -> String {
        format!(
            r#"You are a grading assistant. Compare the student submission against the base solution and provide a detailed grade.

BASE SOLUTION:
{}

STUDENT SUBMISSION:
{}

Please provide:
1. A score out of 100
2. A brief feedback (2-3 sentences)
3. Detailed breakdown of deductions: For each mistake or missing element, specify:
   - The specific issue or mistake
   - The number of points deducted for that issue
   - Which section/question it relates to (if applicable)

CRITICAL REQUIREMENT: The sum of ALL points_deducted values MUST EXACTLY equal (100 - score).
For example, if score is 80, then the total of all points_deducted must be exactly 20.
Double-check your math before responding. If you find 6 issues worth 5 points each but only 20 points should be deducted total,
you must adjust the point values proportionally (e.g., 3.33 points each) or combine some deductions.

Respond in JSON format:
{{
    "score": 85,
    "feedback": "Overall good work, but missed some edge cases.",
    "deductions": [
        {{
            "issue": "Missing error handling in Question 1",
            "points_deducted": 5,
            "section": "Question 1"
        }},
        {{
            "issue": "Incorrect calculation in part 2",
            "points_deducted": 7,
            "section": "Question 2"
        }},
        {{
            "issue": "Missing explanation",
            "points_deducted": 3,
            "section": "Question 3"
        }}
    ]
}}
"#,
            self.reference_content, self.student_content
        )
    }
}
