//! # Score Normalizer
//!
//! Models are not reliable arithmetic checkers: the deductions they itemize
//! often do not add up to `100 - score`. This module repairs that as a pure
//! transform over the reported deductions; the score itself is never touched.
//!
//! The repair is a single pass. Per-item rounding after proportional scaling
//! may leave the sum off by a few tenths; no correction pass is applied, so a
//! list that is already consistent within tolerance passes through unchanged
//! and repeated normalization is a fixed point.

use crate::types::{Deduction, RawDeductions};
use tracing::warn;

/// A deduction total within this distance of `100 - score` is accepted as-is.
pub const SUM_TOLERANCE: f64 = 0.1;

const FULL_MARKS: f64 = 100.0;

/// Section tag applied when legacy string deductions carry no section of their own.
const GENERAL_SECTION: &str = "General";

/// Round a float to one decimal place.
///
/// Uses the common multiply / round / divide trick. Kept local to this module
/// so it's cheap to inline and obvious where rounding is happening.
#[inline]
fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Repair `deductions` so they sum to `100 - score` within [`SUM_TOLERANCE`].
///
/// - Legacy string lists get `100 - score` distributed evenly, tagged with the
///   `"General"` section.
/// - Structured lists already within tolerance are returned unchanged.
/// - A nonzero total is scaled proportionally; a zero total with a nonzero
///   expected value is distributed evenly across the existing entries.
/// - A nonzero expected value with no entries at all is irreconcilable: it is
///   logged as a data-quality diagnostic and the empty list returned as-is.
///
/// The score is never clamped, even when it lies outside 0-100.
pub fn normalize_deductions(score: f64, raw: RawDeductions) -> Vec<Deduction> {
    let expected = FULL_MARKS - score;

    match raw {
        RawDeductions::Legacy(issues) => {
            if issues.is_empty() {
                return Vec::new();
            }
            let per_item = round1(expected / issues.len() as f64);
            issues
                .into_iter()
                .map(|issue| Deduction {
                    issue,
                    points_deducted: per_item,
                    section: Some(GENERAL_SECTION.to_string()),
                })
                .collect()
        }
        RawDeductions::Structured(mut deductions) => {
            let actual: f64 = deductions.iter().map(|d| d.points_deducted).sum();
            if (actual - expected).abs() <= SUM_TOLERANCE {
                return deductions;
            }

            if deductions.is_empty() {
                if expected > 0.0 {
                    warn!(
                        score,
                        expected,
                        "score implies deducted points but no deduction entries were reported"
                    );
                }
                return deductions;
            }

            warn!(
                score,
                expected, actual, "deduction total does not match score, repairing"
            );

            if actual > 0.0 {
                let scale = expected / actual;
                for d in &mut deductions {
                    d.points_deducted = round1(d.points_deducted * scale);
                }
            } else if expected > 0.0 {
                // entries exist but carry no point values; spread the expected
                // total evenly even though the split is not attributable to any
                // specific issue
                let per_item = round1(expected / deductions.len() as f64);
                for d in &mut deductions {
                    d.points_deducted = per_item;
                }
            }
            deductions
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structured(points: &[f64]) -> RawDeductions {
        RawDeductions::Structured(
            points
                .iter()
                .enumerate()
                .map(|(i, p)| Deduction {
                    issue: format!("issue {}", i),
                    points_deducted: *p,
                    section: None,
                })
                .collect(),
        )
    }

    fn total(deductions: &[Deduction]) -> f64 {
        deductions.iter().map(|d| d.points_deducted).sum()
    }

    #[test]
    fn test_proportional_scaling() {
        // sum is 15 but expected is 20: each entry scales to 6.7
        let result = normalize_deductions(80.0, structured(&[5.0, 5.0, 5.0]));
        assert_eq!(
            result.iter().map(|d| d.points_deducted).collect::<Vec<_>>(),
            vec![6.7, 6.7, 6.7]
        );
        // per-item rounding leaves the sum at 20.1, inside the tolerance story
        assert!((total(&result) - 20.0).abs() <= 3.0 * SUM_TOLERANCE);
    }

    #[test]
    fn test_consistent_list_unchanged() {
        let raw = structured(&[12.5, 7.5]);
        let result = normalize_deductions(80.0, raw.clone());
        assert_eq!(RawDeductions::Structured(result), raw);
    }

    #[test]
    fn test_within_tolerance_unchanged() {
        // off by exactly 0.1: accepted as-is, no rounding drift introduced
        let raw = structured(&[10.05, 10.05]);
        let result = normalize_deductions(80.0, raw.clone());
        assert_eq!(RawDeductions::Structured(result), raw);
    }

    #[test]
    fn test_idempotence() {
        let once = normalize_deductions(80.0, structured(&[5.0, 5.0, 5.0]));
        let twice = normalize_deductions(80.0, RawDeductions::Structured(once.clone()));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_perfect_score_empty_list_noop() {
        let result = normalize_deductions(100.0, RawDeductions::Structured(Vec::new()));
        assert!(result.is_empty());
    }

    #[test]
    fn test_irreconcilable_empty_list_returned_unchanged() {
        // expected is 25 but there is nothing to repair
        let result = normalize_deductions(75.0, RawDeductions::Structured(Vec::new()));
        assert!(result.is_empty());
    }

    #[test]
    fn test_zero_valued_entries_distributed_evenly() {
        let result = normalize_deductions(90.0, structured(&[0.0, 0.0, 0.0, 0.0]));
        assert_eq!(
            result.iter().map(|d| d.points_deducted).collect::<Vec<_>>(),
            vec![2.5, 2.5, 2.5, 2.5]
        );
    }

    #[test]
    fn test_legacy_strings_distributed() {
        let raw = RawDeductions::Legacy(vec![
            "missing import".to_string(),
            "wrong formula".to_string(),
        ]);
        let result = normalize_deductions(90.0, raw);
        assert_eq!(result.len(), 2);
        for deduction in &result {
            assert_eq!(deduction.points_deducted, 5.0);
            assert_eq!(deduction.section.as_deref(), Some("General"));
        }
        assert_eq!(result[0].issue, "missing import");
        assert_eq!(result[1].issue, "wrong formula");
    }

    #[test]
    fn test_legacy_empty_list() {
        let result = normalize_deductions(100.0, RawDeductions::Legacy(Vec::new()));
        assert!(result.is_empty());
    }

    #[test]
    fn test_score_above_full_marks_not_clamped() {
        // expected is negative; a positive total is scaled into negative values
        // rather than the score being altered
        let result = normalize_deductions(110.0, structured(&[5.0]));
        assert_eq!(result[0].points_deducted, -10.0);
    }

    #[test]
    fn test_zero_total_with_negative_expected_left_alone() {
        let result = normalize_deductions(110.0, structured(&[0.0]));
        assert_eq!(result[0].points_deducted, 0.0);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(6.666), 6.7);
        assert_eq!(round1(3.333), 3.3);
        assert_eq!(round1(2.0), 2.0);
    }
}
