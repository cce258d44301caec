// Tool name constants for the note tool-call surface.

// ── Reads ──────────────────────────────────────────────────────────
pub const READ_LINES: &str = "read_lines";
pub const READ_NOTE: &str = "read_note";
pub const SEARCH_NOTES: &str = "search_notes";

// ── Mutations ──────────────────────────────────────────────────────
pub const REPLACE_LINES: &str = "replace_lines";
pub const INSERT_LINES: &str = "insert_lines";
pub const DELETE_LINES: &str = "delete_lines";
pub const UPDATE_NOTE: &str = "update_note";
pub const CREATE_NOTE: &str = "create_note";

/// Tools that write to the workspace and answer with a `MutationResult`.
pub const MUTATING_TOOLS: &[&str] =
    &[REPLACE_LINES, INSERT_LINES, DELETE_LINES, UPDATE_NOTE, CREATE_NOTE];

/// All tools the dispatcher handles.
pub const IMPLEMENTED_TOOLS: &[&str] = &[
    READ_LINES,
    READ_NOTE,
    SEARCH_NOTES,
    REPLACE_LINES,
    INSERT_LINES,
    DELETE_LINES,
    UPDATE_NOTE,
    CREATE_NOTE,
];

#[must_use]
pub fn is_mutating(tool: &str) -> bool {
    MUTATING_TOOLS.contains(&tool)
}
