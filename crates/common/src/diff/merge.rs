// Folding adjacent removed → added pairs into single `modified` entries.

use crate::types::{DiffKind, DiffLine};

/// Merge each `Removed` immediately followed by an `Added` into one
/// `Modified` entry, scanning left to right.
///
/// Pairs never overlap, so an odd-length run of changes leaves its last
/// `Removed` or `Added` unmerged.
pub fn merge_modifications(lines: Vec<DiffLine>) -> Vec<DiffLine> {
    let mut merged = Vec::with_capacity(lines.len());
    let mut iter = lines.into_iter().peekable();

    while let Some(current) = iter.next() {
        let pairs_with_next = current.kind == DiffKind::Removed
            && iter.peek().is_some_and(|next| next.kind == DiffKind::Added);

        if pairs_with_next {
            if let Some(added) = iter.next() {
                merged.push(DiffLine::modified(
                    added.content,
                    current.content,
                    added.line_number,
                    current.old_line_number.unwrap_or_default(),
                ));
                continue;
            }
        }

        merged.push(current);
    }

    merged
}
