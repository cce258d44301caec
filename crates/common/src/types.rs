// Core domain types shared across all noteloom crates.

use serde::{Deserialize, Serialize};

use crate::frontmatter::Metadata;

/// How a line changed between two versions of a body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    Unchanged,
    Added,
    Removed,
    Modified,
}

/// One entry of a line diff.
///
/// `line_number` is the 1-based position in the new body and is `0` for
/// `Removed`. `old_line_number` is the 1-based position in the old body and is
/// `None` only for `Added`. `old_content` is set only for `Modified`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    #[serde(rename = "type")]
    pub kind: DiffKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_content: Option<String>,
    pub line_number: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_line_number: Option<usize>,
}

impl DiffLine {
    pub fn unchanged(content: impl Into<String>, line_number: usize, old_line_number: usize) -> Self {
        Self {
            kind: DiffKind::Unchanged,
            content: content.into(),
            old_content: None,
            line_number,
            old_line_number: Some(old_line_number),
        }
    }

    pub fn added(content: impl Into<String>, line_number: usize) -> Self {
        Self {
            kind: DiffKind::Added,
            content: content.into(),
            old_content: None,
            line_number,
            old_line_number: None,
        }
    }

    pub fn removed(content: impl Into<String>, old_line_number: usize) -> Self {
        Self {
            kind: DiffKind::Removed,
            content: content.into(),
            old_content: None,
            line_number: 0,
            old_line_number: Some(old_line_number),
        }
    }

    pub fn modified(
        content: impl Into<String>,
        old_content: impl Into<String>,
        line_number: usize,
        old_line_number: usize,
    ) -> Self {
        Self {
            kind: DiffKind::Modified,
            content: content.into(),
            old_content: Some(old_content.into()),
            line_number,
            old_line_number: Some(old_line_number),
        }
    }
}

/// Outcome of a single note mutation, serialized straight back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MutationResult {
    pub success: bool,
    pub note_id: String,
    pub message: String,
    pub diff_data: Vec<DiffLine>,
    pub original_content: String,
    pub new_content: String,
    /// SHA-256 hex of the raw bytes written, usable as the next `expected_hash`.
    pub content_hash: String,
}

/// A body line tagged with its 1-based number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NumberedLine {
    pub line: usize,
    pub content: String,
}

/// Result of `read_lines`. `end_line` reflects clamping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineSlice {
    pub note_id: String,
    pub start_line: usize,
    pub end_line: usize,
    pub total_lines: usize,
    pub lines: Vec<NumberedLine>,
}

/// Result of `read_note`: plain body plus decoded metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteDocument {
    pub id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub content_hash: String,
}

/// One match from `search_notes`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub path: String,
    pub snippets: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}
