//! # Answer Segmentation
//!
//! Splits a document's full text into per-question answers, keyed by question
//! id. Question markers are lines starting with `Q<id>`, or the words
//! `Question <n>` / `Problem <n>` anywhere in the text. Everything between one
//! marker and the next belongs to the earlier question; text before the first
//! marker is not an answer. A document with no markers at all produces a
//! single `"all"` entry holding the whole text.

use once_cell::sync::Lazy;
use regex::Regex;

static QUESTION_MARKER: Lazy<Regex> = Lazy::new(|| {
    // the `Q` prefix requires a leading digit so it cannot swallow the words
    // "Question" / "Problem" themselves
    Regex::new(r"(?im)^Q(?P<qid>\d[0-9a-z._-]*)|(?:Question|Problem)\s*(?P<qid2>\d+(?:\.\w+)?)")
        .expect("question marker pattern compiles")
});

/// One segmented answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Question id as written in the marker (e.g. "1", "2.b").
    pub question_id: String,
    /// Trimmed answer text between this marker and the next.
    pub text: String,
}

/// A question marker occurrence: id plus the match span in the source text.
struct Marker {
    question_id: String,
    match_start: usize,
    match_end: usize,
}

/// Segment `full_text` into per-question answers, in document order.
///
/// Markers whose following text is empty are dropped.
pub fn segment_answers(full_text: &str) -> Vec<Answer> {
    let markers: Vec<Marker> = QUESTION_MARKER
        .captures_iter(full_text)
        .filter_map(|captures| {
            let question_id = captures
                .name("qid")
                .or_else(|| captures.name("qid2"))
                .map(|m| m.as_str().to_string())?;
            let whole = captures.get(0)?;
            Some(Marker {
                question_id,
                match_start: whole.start(),
                match_end: whole.end(),
            })
        })
        .collect();

    if markers.is_empty() {
        return vec![Answer {
            question_id: "all".to_string(),
            text: full_text.to_string(),
        }];
    }

    let mut answers = Vec::new();
    for (i, marker) in markers.iter().enumerate() {
        let end = markers
            .get(i + 1)
            .map(|next| next.match_start)
            .unwrap_or(full_text.len());
        let text = full_text[marker.match_end..end].trim();
        if !text.is_empty() {
            answers.push(Answer {
                question_id: marker.question_id.clone(),
                text: text.to_string(),
            });
        }
    }
    answers
}

/// Join segmented answers into one grading document, question headers included.
pub fn combined_answers(answers: &[Answer]) -> String {
    answers
        .iter()
        .map(|a| format!("Question {}:\n{}", a.question_id, a.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_word_markers() {
        let text = "Question 1\nThe answer is 42.\nQuestion 2\nBecause it is.";
        let answers = segment_answers(text);
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0].question_id, "1");
        assert_eq!(answers[0].text, "The answer is 42.");
        assert_eq!(answers[1].question_id, "2");
        assert_eq!(answers[1].text, "Because it is.");
    }

    #[test]
    fn test_q_prefix_markers() {
        let text = "Q1.a\nfirst part\nQ1.b\nsecond part";
        let answers = segment_answers(text);
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0].question_id, "1.a");
        assert_eq!(answers[1].question_id, "1.b");
    }

    #[test]
    fn test_problem_markers_and_subparts() {
        let text = "Problem 3.1\nsolution text";
        let answers = segment_answers(text);
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].question_id, "3.1");
        assert_eq!(answers[0].text, "solution text");
    }

    #[test]
    fn test_no_markers_yields_all() {
        let text = "Just an essay with no structure.";
        let answers = segment_answers(text);
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].question_id, "all");
        assert_eq!(answers[0].text, text);
    }

    #[test]
    fn test_marker_with_empty_body_dropped() {
        let text = "Question 1\n\nQuestion 2\nactual answer";
        let answers = segment_answers(text);
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].question_id, "2");
    }

    #[test]
    fn test_combined_answers_format() {
        let answers = vec![
            Answer {
                question_id: "1".to_string(),
                text: "first".to_string(),
            },
            Answer {
                question_id: "2".to_string(),
                text: "second".to_string(),
            },
        ];
        assert_eq!(
            combined_answers(&answers),
            "Question 1:\nfirst\n\nQuestion 2:\nsecond"
        );
    }
}
