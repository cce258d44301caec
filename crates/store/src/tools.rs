// Tool-call dispatch: decode JSON arguments, run the repository operation,
// wrap the outcome in a `ToolResponse`.

use noteloom_common::protocol::envelope::{METHOD_NOT_FOUND, VALIDATION_FAILED};
use noteloom_common::protocol::tool_names::{
    CREATE_NOTE, DELETE_LINES, INSERT_LINES, READ_LINES, READ_NOTE, REPLACE_LINES, SEARCH_NOTES,
    UPDATE_NOTE,
};
use noteloom_common::protocol::{ToolCall, ToolResponse};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::NoteError;
use crate::repo::NoteRepository;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadLinesParams {
    pub note_id: String,
    pub start_line: usize,
    pub end_line: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadNoteParams {
    pub note_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchNotesParams {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReplaceLinesParams {
    pub note_id: String,
    pub start_line: usize,
    pub end_line: usize,
    pub new_content: String,
    #[serde(default)]
    pub expected_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InsertLinesParams {
    pub note_id: String,
    pub after_line: usize,
    pub content_to_insert: String,
    #[serde(default)]
    pub expected_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteLinesParams {
    pub note_id: String,
    pub start_line: usize,
    pub end_line: usize,
    #[serde(default)]
    pub expected_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateNoteParams {
    pub note_id: String,
    pub content: String,
    #[serde(default)]
    pub expected_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateNoteParams {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Run one tool call against `repo`.
pub fn execute(repo: &NoteRepository, call: &ToolCall) -> ToolResponse {
    debug!(tool = %call.name, "executing tool call");
    match call.name.as_str() {
        READ_LINES => run(call, |p: ReadLinesParams| {
            repo.read_lines(&p.note_id, p.start_line, p.end_line)
        }),
        READ_NOTE => run(call, |p: ReadNoteParams| repo.read_note(&p.note_id)),
        SEARCH_NOTES => run(call, |p: SearchNotesParams| repo.search_notes(&p.query)),
        REPLACE_LINES => run(call, |p: ReplaceLinesParams| {
            repo.replace_lines(
                &p.note_id,
                p.start_line,
                p.end_line,
                &p.new_content,
                p.expected_hash.as_deref(),
            )
        }),
        INSERT_LINES => run(call, |p: InsertLinesParams| {
            repo.insert_lines(
                &p.note_id,
                p.after_line,
                &p.content_to_insert,
                p.expected_hash.as_deref(),
            )
        }),
        DELETE_LINES => run(call, |p: DeleteLinesParams| {
            repo.delete_lines(&p.note_id, p.start_line, p.end_line, p.expected_hash.as_deref())
        }),
        UPDATE_NOTE => run(call, |p: UpdateNoteParams| {
            repo.update_note(&p.note_id, &p.content, p.expected_hash.as_deref())
        }),
        CREATE_NOTE => run(call, |p: CreateNoteParams| repo.create_note(&p.title, &p.content)),
        other => ToolResponse::error(METHOD_NOT_FOUND, format!("unknown tool `{other}`")),
    }
}

fn run<P, R, F>(call: &ToolCall, op: F) -> ToolResponse
where
    P: DeserializeOwned,
    R: Serialize,
    F: FnOnce(P) -> Result<R, NoteError>,
{
    let params = match parse_params::<P>(call) {
        Ok(params) => params,
        Err(response) => return response,
    };

    match op(params) {
        Ok(result) => ToolResponse::success(json!(result)),
        Err(error) => ToolResponse::error(error.code(), error.to_string()),
    }
}

fn parse_params<P: DeserializeOwned>(call: &ToolCall) -> Result<P, ToolResponse> {
    let arguments = match &call.arguments {
        Value::Null => json!({}),
        other => other.clone(),
    };
    serde_json::from_value::<P>(arguments).map_err(|error| {
        ToolResponse::error(
            VALIDATION_FAILED,
            format!("failed to decode {} arguments: {error}", call.name),
        )
    })
}
