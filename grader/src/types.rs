//! # Types Module
//!
//! Wire shapes for grading replies. Models have produced deductions in two
//! historical shapes: structured records and a legacy flat list of issue
//! strings; [`RawDeductions`] accepts both.

use serde::{Deserialize, Serialize};

/// One itemized point loss tied to a specific issue in a graded submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deduction {
    /// The specific issue or mistake.
    #[serde(default)]
    pub issue: String,
    /// Points deducted for this issue.
    #[serde(default)]
    pub points_deducted: f64,
    /// Section or question the issue relates to, when the model names one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

/// Deductions exactly as the model reported them, before normalization.
///
/// An empty list deserializes as the structured shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDeductions {
    /// Current shape: records with issue, points and section.
    Structured(Vec<Deduction>),
    /// Legacy shape: a flat list of issue strings with no point values.
    Legacy(Vec<String>),
}

impl Default for RawDeductions {
    fn default() -> Self {
        RawDeductions::Structured(Vec::new())
    }
}

/// The grading reply shape produced by the model.
#[derive(Debug, Deserialize)]
pub struct RawGrade {
    /// Score out of 100. Not clamped here; a misbehaving model may exceed the
    /// range and the caller decides how to display that.
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub deductions: RawDeductions,
}
