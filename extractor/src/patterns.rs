//! # Identity Pattern Cascades
//!
//! Ordered, first-match-wins regex cascades for student identifiers and names.
//! Order matters: specific labels come before generic ones so that `ID:` does
//! not shadow `NetID:`, and the bare identifier heuristic is tried only when
//! no labeled pattern matched anywhere in the text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum cleaned-name length accepted by the regex and table stages.
pub const MIN_NAME_LEN: usize = 3;

/// Ordered identifier patterns; each captures the identifier token.
///
/// The final bare pattern (2-3 letters followed by 5+ digits) is an
/// institution-specific NetID shape and deliberately last in the cascade.
static ID_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)NetID\s*[:=]\s*(\S+)",
        r"(?i)Net\s*ID\s*[:=]\s*(\S+)",
        r"(?i)Student\s*ID\s*[:=]\s*(\S+)",
        r"(?i)ID\s*[:=]\s*(\S+)",
        r"(?i)\b([a-z]{2,3}[0-9]{5,})\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("identifier pattern compiles"))
    .collect()
});

/// Ordered name patterns; each captures the rest of the matched line.
static NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?im)Author\s*[:=]\s*(.+)$",
        r"(?im)Name\s*[:=]\s*(.+)$",
        r"(?im)Student\s*Name\s*[:=]\s*(.+)$",
        r"(?im)Submitted\s+by\s*[:=]\s*(.+)$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("name pattern compiles"))
    .collect()
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));

/// Parenthesized or bracketed annotations such as "(late)" or "[group 2]".
static ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[\(\[].*?[\)\]]\s*").expect("annotation pattern compiles"));

/// Find the first student identifier in `text`, trying each pattern in order.
pub fn first_id_match(text: &str) -> Option<String> {
    for pattern in ID_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            if let Some(token) = captures.get(1) {
                return Some(token.as_str().trim().to_string());
            }
        }
    }
    None
}

/// Find the first student name in `text`, trying each pattern in order.
///
/// A match that cleans up to fewer than [`MIN_NAME_LEN`] characters is treated
/// as no match, and the cascade moves on to the next pattern.
pub fn first_name_match(text: &str) -> Option<String> {
    for pattern in NAME_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            if let Some(matched) = captures.get(1) {
                if let Some(name) = clean_name(matched.as_str()) {
                    return Some(name);
                }
            }
        }
    }
    None
}

/// Normalize a raw name match: strip annotations, collapse whitespace runs,
/// trim. Returns `None` when the result is shorter than [`MIN_NAME_LEN`].
fn clean_name(raw: &str) -> Option<String> {
    let stripped = ANNOTATION.replace_all(raw, " ");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    let name = collapsed.trim().to_string();
    if name.chars().count() >= MIN_NAME_LEN {
        Some(name)
    } else {
        None
    }
}
