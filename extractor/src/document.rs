//! # Document Text Model
//!
//! This module defines [`DocumentText`], the format-neutral representation that
//! feeds identity extraction. Per-format parsing (docx, pdf, pptx, xlsx) is an
//! external collaborator's responsibility; whatever it produces is expressed
//! here as ordered text blocks with provenance, plus ordered structured
//! regions (table rows and other cell groupings).
//!
//! A `DocumentText` is immutable once built: the constructors and the
//! consuming `with_region` builder produce the final value, and extraction
//! only reads from it.

use crate::error::ExtractorError;
use serde::Serialize;
use std::path::Path;

/// Identity markers are expected near the top of a document, so the primary
/// search window covers only this many leading paragraphs.
pub const PRIMARY_PARAGRAPH_LIMIT: usize = 30;

/// The kind of a notebook cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CellKind {
    Markdown,
    Code,
}

/// Where a text block came from in the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Provenance {
    /// Flowing-text paragraph at the given document position.
    Paragraph { index: usize },
    /// Cell of a table, by row and column.
    TableCell { row: usize, column: usize },
    /// Notebook cell at the given position.
    NotebookCell { index: usize, kind: CellKind },
}

/// One block of text with its provenance.
#[derive(Debug, Clone, Serialize)]
pub struct TextBlock {
    pub text: String,
    pub provenance: Provenance,
}

/// A structured region: the flattened cells of one table row or cell grouping.
#[derive(Debug, Clone, Serialize)]
pub struct Region {
    cells: Vec<String>,
}

impl Region {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// The region's cells joined into one searchable string.
    pub fn flattened(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.trim())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// An ordered sequence of text blocks and structured regions derived from one
/// source document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentText {
    blocks: Vec<TextBlock>,
    regions: Vec<Region>,
}

impl DocumentText {
    /// Build from pre-split paragraph text, in document order.
    pub fn from_paragraphs<I, S>(paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let blocks = paragraphs
            .into_iter()
            .enumerate()
            .map(|(index, text)| TextBlock {
                text: text.into(),
                provenance: Provenance::Paragraph { index },
            })
            .collect();
        Self {
            blocks,
            regions: Vec::new(),
        }
    }

    /// Build from notebook cells, in notebook order.
    pub fn from_notebook_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = (CellKind, S)>,
        S: Into<String>,
    {
        let blocks = cells
            .into_iter()
            .enumerate()
            .map(|(index, (kind, text))| TextBlock {
                text: text.into(),
                provenance: Provenance::NotebookCell { index, kind },
            })
            .collect();
        Self {
            blocks,
            regions: Vec::new(),
        }
    }

    /// Read a plain-text file, treating each line as one paragraph.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::DocumentUnreadable`] if the file cannot be read.
    pub fn from_plain_file(path: &Path) -> Result<Self, ExtractorError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ExtractorError::DocumentUnreadable(format!("failed to read {:?}: {}", path, e))
        })?;
        Ok(Self::from_paragraphs(contents.lines()))
    }

    /// Append one structured region (consuming builder).
    pub fn with_region(mut self, cells: Vec<String>) -> Self {
        self.regions.push(Region::new(cells));
        self
    }

    /// The structured regions, in document order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// The primary search text for Stage 1 of identity extraction.
    ///
    /// Covers the first [`PRIMARY_PARAGRAPH_LIMIT`] paragraphs of a document,
    /// or every markdown cell of a notebook; empty blocks and code cells are
    /// skipped. Blocks are joined with newlines.
    pub fn primary_text(&self) -> String {
        let mut parts = Vec::new();
        for block in &self.blocks {
            let in_window = match &block.provenance {
                Provenance::Paragraph { index } => *index < PRIMARY_PARAGRAPH_LIMIT,
                Provenance::NotebookCell { kind, .. } => *kind == CellKind::Markdown,
                Provenance::TableCell { .. } => false,
            };
            let text = block.text.trim();
            if in_window && !text.is_empty() {
                parts.push(text);
            }
        }
        parts.join("\n")
    }

    /// The whole document as one string: every block in order, followed by
    /// every flattened region. Used for the model-based fallback sample.
    pub fn full_text(&self) -> String {
        let mut parts: Vec<String> = self.blocks.iter().map(|b| b.text.clone()).collect();
        parts.extend(self.regions.iter().map(|r| r.flattened()));
        parts.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_text_limits_paragraphs() {
        let mut paragraphs: Vec<String> = (0..40).map(|i| format!("paragraph {}", i)).collect();
        paragraphs[35] = "NetID: zzz99999".to_string();
        let document = DocumentText::from_paragraphs(paragraphs);

        let primary = document.primary_text();
        assert!(primary.contains("paragraph 29"));
        assert!(!primary.contains("paragraph 30"));
        assert!(!primary.contains("zzz99999"));
        // the full text still carries everything
        assert!(document.full_text().contains("zzz99999"));
    }

    #[test]
    fn test_primary_text_skips_empty_paragraphs() {
        let document =
            DocumentText::from_paragraphs(vec!["first", "", "   ", "second"]);
        assert_eq!(document.primary_text(), "first\nsecond");
    }

    #[test]
    fn test_primary_text_uses_all_markdown_cells() {
        let document = DocumentText::from_notebook_cells(vec![
            (CellKind::Markdown, "# Assignment 1"),
            (CellKind::Code, "print('NetID: fake1234 in code')"),
            (CellKind::Markdown, "NetID: abc12345"),
        ]);
        let primary = document.primary_text();
        assert!(primary.contains("abc12345"));
        assert!(!primary.contains("fake1234"));
    }

    #[test]
    fn test_region_flattening() {
        let region = Region::new(vec![
            "Student ID".to_string(),
            " xyz99999 ".to_string(),
        ]);
        assert_eq!(region.flattened(), "Student ID | xyz99999");
    }

    #[test]
    fn test_full_text_includes_regions() {
        let document = DocumentText::from_paragraphs(vec!["intro"])
            .with_region(vec!["Name".to_string(), "Jane Doe".to_string()]);
        let full = document.full_text();
        assert!(full.contains("intro"));
        assert!(full.contains("Name | Jane Doe"));
    }

    #[test]
    fn test_from_plain_file_missing() {
        let result = DocumentText::from_plain_file(Path::new("/nonexistent/submission.txt"));
        assert!(matches!(
            result,
            Err(ExtractorError::DocumentUnreadable(_))
        ));
    }
}
