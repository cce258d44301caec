// Line-indexed editing primitives over a plain note body.
//
// Bodies split on `\n` (an empty body is one empty line). Line numbers are
// 1-based and inclusive. A `start_line` past the end is an error while an
// `end_line` past the end is clamped to the last line; insertion has a hard
// upper bound because "after a line that does not exist" is ambiguous.

use thiserror::Error;

use crate::types::NumberedLine;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("start_line must be >= 1, got {0}")]
    StartBelowOne(usize),

    #[error("end_line ({end}) must be >= start_line ({start})")]
    EndBeforeStart { start: usize, end: usize },

    #[error("start_line {start} exceeds total line count {total}")]
    StartOutOfRange { start: usize, total: usize },

    #[error("after_line {after} exceeds total line count {total}")]
    InsertOutOfRange { after: usize, total: usize },
}

/// Result of a mutating line operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// Lines after the edit.
    pub lines: Vec<String>,
    /// Plain body before the edit.
    pub before: String,
    /// Plain body after the edit.
    pub after: String,
}

impl EditOutcome {
    fn new(before: &str, lines: Vec<String>) -> Self {
        let after = lines.join("\n");
        Self { lines, before: before.to_string(), after }
    }
}

/// Split a body into lines. `""` is a single empty line.
pub fn split_lines(body: &str) -> Vec<String> {
    body.split('\n').map(str::to_string).collect()
}

/// Validated inclusive range as zero-based `[start, end)` slice bounds.
fn checked_range(start: usize, end: usize, total: usize) -> Result<(usize, usize), LineError> {
    if start < 1 {
        return Err(LineError::StartBelowOne(start));
    }
    if end < start {
        return Err(LineError::EndBeforeStart { start, end });
    }
    if start > total {
        return Err(LineError::StartOutOfRange { start, total });
    }
    Ok((start - 1, end.min(total)))
}

/// Read the inclusive range `start..=end`, each line tagged with its number.
pub fn read_lines(body: &str, start: usize, end: usize) -> Result<Vec<NumberedLine>, LineError> {
    let lines = split_lines(body);
    let (from, to) = checked_range(start, end, lines.len())?;

    Ok(lines[from..to]
        .iter()
        .enumerate()
        .map(|(offset, content)| NumberedLine { line: start + offset, content: content.clone() })
        .collect())
}

/// Replace `start..=end` with the lines of `new_text`.
pub fn replace_lines(
    body: &str,
    start: usize,
    end: usize,
    new_text: &str,
) -> Result<EditOutcome, LineError> {
    let mut lines = split_lines(body);
    let (from, to) = checked_range(start, end, lines.len())?;

    lines.splice(from..to, split_lines(new_text));
    Ok(EditOutcome::new(body, lines))
}

/// Insert the lines of `text` after line `after_line` (`0` prepends).
pub fn insert_lines(body: &str, after_line: usize, text: &str) -> Result<EditOutcome, LineError> {
    let mut lines = split_lines(body);
    let total = lines.len();
    if after_line > total {
        return Err(LineError::InsertOutOfRange { after: after_line, total });
    }

    lines.splice(after_line..after_line, split_lines(text));
    Ok(EditOutcome::new(body, lines))
}

/// Remove `start..=end`. Deleting every line leaves an empty body.
pub fn delete_lines(body: &str, start: usize, end: usize) -> Result<EditOutcome, LineError> {
    let mut lines = split_lines(body);
    let (from, to) = checked_range(start, end, lines.len())?;

    lines.drain(from..to);
    Ok(EditOutcome::new(body, lines))
}
