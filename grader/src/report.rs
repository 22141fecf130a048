//! # Grade Report Module
//!
//! Serializable output shapes for one graded submission: the report itself and
//! the response envelope handed to API callers.

use crate::types::Deduction;
use serde::Serialize;

/// The final report generated after grading one submission.
#[derive(Debug, Serialize)]
pub struct GradeReport {
    /// The student's submitted file name.
    pub filename: String,
    /// Recovered student identifier, or `"unknown"`.
    pub student_id: String,
    /// Recovered student name, if any.
    pub student_name: Option<String>,
    /// Score out of 100 as the model reported it.
    pub score: f64,
    /// Brief overall feedback.
    pub feedback: String,
    /// Normalized itemized deductions; their sum matches `100 - score` within
    /// the normalizer's tolerance.
    pub deductions: Vec<Deduction>,
    /// RFC 3339 timestamp of report creation.
    pub created_at: String,
}

/// The API response envelope for grading results.
///
/// Wraps a [`GradeReport`] with top-level `success` and `message` fields for
/// consistency with other API responses.
#[derive(Debug, Serialize)]
pub struct GradeReportResponse {
    /// Indicates the grading was successful.
    success: bool,
    /// A human-readable message for the client.
    message: String,
    /// The detailed grading report.
    data: GradeReport,
}

impl From<GradeReport> for GradeReportResponse {
    fn from(report: GradeReport) -> Self {
        GradeReportResponse {
            success: true,
            message: "Grading complete.".to_string(),
            data: report,
        }
    }
}

impl GradeReportResponse {
    /// The wrapped report.
    pub fn report(&self) -> &GradeReport {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_response_serialization() {
        let report = GradeReport {
            filename: "hw1.ipynb".to_string(),
            student_id: "abc12345".to_string(),
            student_name: Some("Jane Doe".to_string()),
            score: 85.0,
            feedback: "Good work overall.".to_string(),
            deductions: vec![Deduction {
                issue: "Missing edge case".to_string(),
                points_deducted: 15.0,
                section: Some("Question 2".to_string()),
            }],
            created_at: "2025-01-01T00:00:00+00:00".to_string(),
        };

        let response: GradeReportResponse = report.into();
        let value: Value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "Grading complete.");
        assert_eq!(value["data"]["filename"], "hw1.ipynb");
        assert_eq!(value["data"]["student_id"], "abc12345");
        assert_eq!(value["data"]["student_name"], "Jane Doe");
        assert_eq!(value["data"]["score"], 85.0);
        assert_eq!(value["data"]["deductions"][0]["issue"], "Missing edge case");
        assert_eq!(value["data"]["deductions"][0]["points_deducted"], 15.0);
        assert_eq!(value["data"]["deductions"][0]["section"], "Question 2");
    }

    #[test]
    fn test_missing_name_serializes_as_null() {
        let report = GradeReport {
            filename: "hw1.docx".to_string(),
            student_id: "unknown".to_string(),
            student_name: None,
            score: 0.0,
            feedback: String::new(),
            deductions: vec![],
            created_at: "2025-01-01T00:00:00+00:00".to_string(),
        };
        let response: GradeReportResponse = report.into();
        let value: Value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["data"]["student_name"], Value::Null);
        assert!(value["data"]["deductions"].as_array().unwrap().is_empty());
    }
}
