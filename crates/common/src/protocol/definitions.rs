// JSON-schema descriptions of each tool, suitable for handing to an agent.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::tool_names::{
    CREATE_NOTE, DELETE_LINES, INSERT_LINES, READ_LINES, READ_NOTE, REPLACE_LINES, SEARCH_NOTES,
    UPDATE_NOTE,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolDefinition {
    fn new(name: &str, description: &str, parameters: Value) -> Self {
        Self { name: name.to_string(), description: description.to_string(), parameters }
    }

    /// Names listed under `parameters.required`.
    pub fn required(&self) -> Vec<&str> {
        self.parameters
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn note_id() -> Value {
    json!({ "type": "string", "description": "Note identifier relative to the workspace root, without the .md extension" })
}

fn line(description: &str) -> Value {
    json!({ "type": "integer", "minimum": 0, "description": description })
}

fn expected_hash() -> Value {
    json!({ "type": "string", "description": "SHA-256 hex of the current file; the edit is refused if it no longer matches" })
}

/// One definition per implemented tool, in a stable order.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            READ_LINES,
            "Read an inclusive range of body lines, each tagged with its line number",
            object(
                json!({
                    "note_id": note_id(),
                    "start_line": line("First line to read (1-based)"),
                    "end_line": line("Last line to read; clamped to the last line"),
                }),
                &["note_id", "start_line", "end_line"],
            ),
        ),
        ToolDefinition::new(
            READ_NOTE,
            "Read a note's plain body, metadata and tags",
            object(json!({ "note_id": note_id() }), &["note_id"]),
        ),
        ToolDefinition::new(
            SEARCH_NOTES,
            "Search notes by content, title or tag; prefix the query with tag: to match tags only",
            object(
                json!({ "query": { "type": "string", "description": "Case-insensitive search text" } }),
                &["query"],
            ),
        ),
        ToolDefinition::new(
            REPLACE_LINES,
            "Replace an inclusive range of body lines with new content",
            object(
                json!({
                    "note_id": note_id(),
                    "start_line": line("First line to replace (1-based)"),
                    "end_line": line("Last line to replace; clamped to the last line"),
                    "new_content": { "type": "string", "description": "Replacement text, split on newlines" },
                    "expected_hash": expected_hash(),
                }),
                &["note_id", "start_line", "end_line", "new_content"],
            ),
        ),
        ToolDefinition::new(
            INSERT_LINES,
            "Insert lines after the given line; 0 inserts before the first line",
            object(
                json!({
                    "note_id": note_id(),
                    "after_line": line("Line to insert after; must not exceed the line count"),
                    "content_to_insert": { "type": "string", "description": "Text to insert, split on newlines" },
                    "expected_hash": expected_hash(),
                }),
                &["note_id", "after_line", "content_to_insert"],
            ),
        ),
        ToolDefinition::new(
            DELETE_LINES,
            "Delete an inclusive range of body lines",
            object(
                json!({
                    "note_id": note_id(),
                    "start_line": line("First line to delete (1-based)"),
                    "end_line": line("Last line to delete; clamped to the last line"),
                    "expected_hash": expected_hash(),
                }),
                &["note_id", "start_line", "end_line"],
            ),
        ),
        ToolDefinition::new(
            UPDATE_NOTE,
            "Overwrite a note's body, keeping its metadata block",
            object(
                json!({
                    "note_id": note_id(),
                    "content": { "type": "string", "description": "New plain body" },
                    "expected_hash": expected_hash(),
                }),
                &["note_id", "content"],
            ),
        ),
        ToolDefinition::new(
            CREATE_NOTE,
            "Create a new note whose identifier is derived from its title",
            object(
                json!({
                    "title": { "type": "string", "description": "Note title, also used for the file name" },
                    "content": { "type": "string", "description": "Body text placed under the title heading" },
                }),
                &["title"],
            ),
        ),
    ]
}
