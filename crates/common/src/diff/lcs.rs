// Longest-common-subsequence alignment of two line sequences.
//
// O(n·m) time and space. Note-sized inputs (hundreds to low thousands of
// lines) are the intended workload; there is no streaming variant.

use crate::types::{DiffKind, DiffLine};

/// Which side wins when skipping a new line and skipping an old line would
/// keep the same LCS length.
///
/// The choice is visible to users (it decides which lines are highlighted as
/// added vs. removed in ambiguous alignments), so it is pinned here rather
/// than left to whatever the loop happens to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// Emit `added` first while walking backwards.
    PreferAdded,
    /// Emit `removed` first while walking backwards.
    PreferRemoved,
}

/// Tie-break used by [`super::diff_lines`].
pub const TIE_BREAK: TieBreak = TieBreak::PreferAdded;

/// Row-major `(old.len() + 1) × (new.len() + 1)` LCS length table.
pub struct LcsTable {
    width: usize,
    cells: Vec<usize>,
}

impl LcsTable {
    pub fn build<S: AsRef<str>>(old: &[S], new: &[S]) -> Self {
        let width = new.len() + 1;
        let mut cells = vec![0usize; (old.len() + 1) * width];

        for i in 1..=old.len() {
            for j in 1..=new.len() {
                cells[i * width + j] = if old[i - 1].as_ref() == new[j - 1].as_ref() {
                    cells[(i - 1) * width + (j - 1)] + 1
                } else {
                    cells[(i - 1) * width + j].max(cells[i * width + (j - 1)])
                };
            }
        }

        Self { width, cells }
    }

    pub fn get(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.width + j]
    }

    /// Length of the longest common subsequence.
    pub fn len(&self) -> usize {
        self.cells.last().copied().unwrap_or(0)
    }
}

/// Walk the table from `(|old|, |new|)` back to `(0, 0)` and return the
/// alignment in forward order.
///
/// `Removed` entries carry their old position; `Unchanged` entries carry both
/// positions; new-side numbers are assigned by a forward renumbering pass.
pub fn backtrack<S: AsRef<str>>(
    old: &[S],
    new: &[S],
    table: &LcsTable,
    tie_break: TieBreak,
) -> Vec<DiffLine> {
    let mut i = old.len();
    let mut j = new.len();
    let mut reversed = Vec::with_capacity(old.len() + new.len());

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old[i - 1].as_ref() == new[j - 1].as_ref() {
            reversed.push(DiffLine::unchanged(new[j - 1].as_ref(), 0, i));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || prefers_added(table, i, j, tie_break)) {
            reversed.push(DiffLine::added(new[j - 1].as_ref(), 0));
            j -= 1;
        } else {
            reversed.push(DiffLine::removed(old[i - 1].as_ref(), i));
            i -= 1;
        }
    }

    reversed.reverse();
    renumber(&mut reversed);
    reversed
}

fn prefers_added(table: &LcsTable, i: usize, j: usize, tie_break: TieBreak) -> bool {
    let skip_new = table.get(i, j - 1);
    let skip_old = table.get(i - 1, j);
    match tie_break {
        TieBreak::PreferAdded => skip_new >= skip_old,
        TieBreak::PreferRemoved => skip_new > skip_old,
    }
}

/// Assign 1-based new-side positions to every entry except `Removed`.
fn renumber(lines: &mut [DiffLine]) {
    let mut next = 1;
    for line in lines.iter_mut() {
        if line.kind != DiffKind::Removed {
            line.line_number = next;
            next += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(lines: &[DiffLine]) -> Vec<DiffKind> {
        lines.iter().map(|line| line.kind).collect()
    }

    #[test]
    fn table_holds_lcs_length() {
        let table = LcsTable::build(&["a", "b", "c", "d"], &["b", "x", "d"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0, 0), 0);
    }

    #[test]
    fn empty_inputs_produce_empty_alignment() {
        let empty: [&str; 0] = [];
        let table = LcsTable::build(&empty, &empty);
        assert!(backtrack(&empty, &empty, &table, TIE_BREAK).is_empty());
    }

    #[test]
    fn tie_prefers_added_when_walking_backwards() {
        // Forward order therefore shows the removal before the addition.
        let old = ["a"];
        let new = ["b"];
        let table = LcsTable::build(&old, &new);
        assert_eq!(
            kinds(&backtrack(&old, &new, &table, TieBreak::PreferAdded)),
            vec![DiffKind::Removed, DiffKind::Added]
        );
        assert_eq!(
            kinds(&backtrack(&old, &new, &table, TieBreak::PreferRemoved)),
            vec![DiffKind::Added, DiffKind::Removed]
        );
    }

    #[test]
    fn positions_are_tracked_on_both_sides() {
        let old = ["a", "b", "c"];
        let new = ["b", "c", "d"];
        let table = LcsTable::build(&old, &new);
        let aligned = backtrack(&old, &new, &table, TIE_BREAK);

        assert_eq!(
            aligned,
            vec![
                DiffLine::removed("a", 1),
                DiffLine::unchanged("b", 1, 2),
                DiffLine::unchanged("c", 2, 3),
                DiffLine::added("d", 3),
            ]
        );
    }
}
