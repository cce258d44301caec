// Line diff engine: LCS alignment, backtracking, renumbering, then merging
// of adjacent removed/added pairs into `modified` entries.

pub mod lcs;
pub mod merge;

pub use lcs::{LcsTable, TieBreak, TIE_BREAK};
pub use merge::merge_modifications;

use crate::lines::split_lines;
use crate::types::DiffLine;

/// Diff two line sequences using the pinned [`TIE_BREAK`].
pub fn diff_lines<S: AsRef<str>>(old: &[S], new: &[S]) -> Vec<DiffLine> {
    diff_lines_with(old, new, TIE_BREAK)
}

/// Diff two line sequences with an explicit tie-break policy.
pub fn diff_lines_with<S: AsRef<str>>(old: &[S], new: &[S], tie_break: TieBreak) -> Vec<DiffLine> {
    let table = LcsTable::build(old, new);
    merge_modifications(lcs::backtrack(old, new, &table, tie_break))
}

/// Diff two plain bodies, splitting each on `\n`.
pub fn diff_text(old: &str, new: &str) -> Vec<DiffLine> {
    diff_lines(&split_lines(old), &split_lines(new))
}
