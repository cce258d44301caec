// Note repository: the load → decode → edit → encode → persist → diff
// pipeline over a sandboxed workspace directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use noteloom_common::diff::diff_text;
use noteloom_common::frontmatter;
use noteloom_common::lines::{self, EditOutcome};
use noteloom_common::path::{
    identifier_from_title, normalize_identifier, strip_note_extension, PathError, PathSandbox,
};
use noteloom_common::types::{LineSlice, MutationResult, NoteDocument, SearchHit};
use tracing::{debug, info, warn};

use crate::config::{NoteloomConfig, DEFAULT_MAX_SNIPPETS};
use crate::error::{NoteError, Result};
use crate::fsio;
use crate::hash::{self, sha256_hex};
use crate::search;

/// Notes stored as Markdown files under one workspace root.
///
/// Holds no note content between calls; every operation reads the file
/// fresh. Switching workspaces means building a new repository.
#[derive(Debug, Clone)]
pub struct NoteRepository {
    sandbox: PathSandbox,
    max_snippets: usize,
}

impl NoteRepository {
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        Ok(Self { sandbox: PathSandbox::new(root)?, max_snippets: DEFAULT_MAX_SNIPPETS })
    }

    /// Build from config, with `root` taking precedence over `workspace_root`.
    pub fn from_config(root: impl AsRef<Path>, config: &NoteloomConfig) -> Result<Self> {
        Ok(Self::new(root)?.with_max_snippets(config.search.max_snippets))
    }

    pub fn with_max_snippets(mut self, max_snippets: usize) -> Self {
        self.max_snippets = max_snippets;
        self
    }

    pub fn root(&self) -> &Path {
        self.sandbox.root()
    }

    /// Resolve a note identifier to its file, refusing anything outside the
    /// root either lexically or through a symlink.
    pub fn resolve(&self, note_id: &str) -> Result<PathBuf> {
        let path = self.sandbox.resolve_note(note_id).inspect_err(|error| {
            warn!(note_id, %error, "rejected note identifier");
        })?;
        self.ensure_within_root(note_id, &path)?;
        Ok(path)
    }

    // ── Reads ──────────────────────────────────────────────────────

    pub fn read_lines(&self, note_id: &str, start_line: usize, end_line: usize) -> Result<LineSlice> {
        let (id, path) = self.locate(note_id)?;
        let raw = fsio::read_if_exists(&path)?.ok_or_else(|| NoteError::NotFound(id.clone()))?;
        let body = frontmatter::decode(&raw).body;

        let total_lines = lines::split_lines(&body).len();
        let lines = lines::read_lines(&body, start_line, end_line)?;
        let end_line = lines.last().map_or(start_line, |line| line.line);

        Ok(LineSlice { note_id: id, start_line, end_line, total_lines, lines })
    }

    pub fn read_note(&self, note_id: &str) -> Result<NoteDocument> {
        let (id, path) = self.locate(note_id)?;
        let raw = fsio::read_if_exists(&path)?.ok_or_else(|| NoteError::NotFound(id.clone()))?;
        let decoded = frontmatter::decode(&raw);

        Ok(NoteDocument {
            id,
            content: decoded.body,
            metadata: decoded.metadata,
            tags: decoded.tags,
            content_hash: sha256_hex(raw.as_bytes()),
        })
    }

    pub fn search_notes(&self, query: &str) -> Result<Vec<SearchHit>> {
        search::search(&self.sandbox, query, self.max_snippets)
    }

    // ── Mutations ──────────────────────────────────────────────────

    pub fn replace_lines(
        &self,
        note_id: &str,
        start_line: usize,
        end_line: usize,
        new_content: &str,
        expected_hash: Option<&str>,
    ) -> Result<MutationResult> {
        self.mutate(note_id, expected_hash, |body| {
            let outcome = lines::replace_lines(body, start_line, end_line, new_content)?;
            Ok((outcome, format!("Replaced lines {start_line}-{end_line}")))
        })
    }

    pub fn insert_lines(
        &self,
        note_id: &str,
        after_line: usize,
        content_to_insert: &str,
        expected_hash: Option<&str>,
    ) -> Result<MutationResult> {
        self.mutate(note_id, expected_hash, |body| {
            let outcome = lines::insert_lines(body, after_line, content_to_insert)?;
            let count = lines::split_lines(content_to_insert).len();
            Ok((outcome, format!("Inserted {count} line(s) after line {after_line}")))
        })
    }

    pub fn delete_lines(
        &self,
        note_id: &str,
        start_line: usize,
        end_line: usize,
        expected_hash: Option<&str>,
    ) -> Result<MutationResult> {
        self.mutate(note_id, expected_hash, |body| {
            let outcome = lines::delete_lines(body, start_line, end_line)?;
            Ok((outcome, format!("Deleted lines {start_line}-{end_line}")))
        })
    }

    /// Overwrite the plain body. The metadata block survives with a fresh
    /// `updated_at`.
    pub fn update_note(
        &self,
        note_id: &str,
        content: &str,
        expected_hash: Option<&str>,
    ) -> Result<MutationResult> {
        self.mutate(note_id, expected_hash, |body| {
            let outcome = EditOutcome {
                lines: lines::split_lines(content),
                before: body.to_string(),
                after: content.to_string(),
            };
            Ok((outcome, "Updated note".to_string()))
        })
    }

    /// Create `<identifier>.md` with body `# <title>\n\n<content>`.
    pub fn create_note(&self, title: &str, content: &str) -> Result<MutationResult> {
        let identifier = identifier_from_title(title);
        if identifier.is_empty() {
            return Err(NoteError::Validation("title must not be empty".to_string()));
        }

        let (id, path) = self.locate(&identifier)?;
        let body = format!("# {}\n\n{content}", title.trim());
        fsio::create_new(&path, body.as_bytes()).map_err(|error| match error {
            NoteError::AlreadyExists(_) => NoteError::AlreadyExists(id.clone()),
            other => other,
        })?;

        let diff_data = diff_text("", &body);
        info!(note_id = %id, op = "create_note", entries = diff_data.len(), "note created");

        Ok(MutationResult {
            success: true,
            message: format!("Created note {id}"),
            note_id: id,
            diff_data,
            original_content: String::new(),
            content_hash: sha256_hex(body.as_bytes()),
            new_content: body,
        })
    }

    /// Shared transaction for line edits and whole-body updates. Nothing is
    /// written unless the edit and the precondition both succeed.
    fn mutate<F>(&self, note_id: &str, expected_hash: Option<&str>, edit: F) -> Result<MutationResult>
    where
        F: FnOnce(&str) -> Result<(EditOutcome, String)>,
    {
        let (id, path) = self.locate(note_id)?;
        let raw = fsio::read_or_empty(&path)?;

        if let Some(expected) = expected_hash {
            let actual = sha256_hex(raw.as_bytes());
            if !hash::matches(expected, &actual) {
                warn!(note_id = %id, expected, actual = %actual, "edit precondition failed");
                return Err(NoteError::PreconditionFailed { expected: expected.to_string(), actual });
            }
        }

        let decoded = frontmatter::decode(&raw);
        if !decoded.has_front_matter && raw.starts_with(frontmatter::DELIMITER) {
            debug!(note_id = %id, "unterminated metadata block, editing whole content as body");
        }

        let (outcome, message) = edit(&decoded.body)?;
        let encoded = frontmatter::encode(&raw, &outcome.after);
        fsio::write_atomic(&path, encoded.as_bytes())?;

        let diff_data = diff_text(&outcome.before, &outcome.after);
        info!(note_id = %id, entries = diff_data.len(), "{message}");

        Ok(MutationResult {
            success: true,
            message: format!("{message} of {id}"),
            note_id: id,
            diff_data,
            original_content: outcome.before,
            new_content: outcome.after,
            content_hash: sha256_hex(encoded.as_bytes()),
        })
    }

    /// Canonical identifier (no extension) plus the sandboxed file path.
    fn locate(&self, note_id: &str) -> Result<(String, PathBuf)> {
        let path = self.resolve(note_id)?;
        let id = normalize_identifier(note_id)?;
        Ok((strip_note_extension(&id).to_string(), path))
    }

    /// Follow symlinks from the nearest existing ancestor of `path` and check
    /// the real location is still under the real root.
    fn ensure_within_root(&self, note_id: &str, path: &Path) -> Result<()> {
        let root = self.sandbox.root();
        let real_root = match fs::canonicalize(root) {
            Ok(real_root) => real_root,
            // Nothing exists yet, so nothing can be a link.
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(()),
            Err(error) => return Err(NoteError::io(root, error)),
        };

        let Some(existing) = path.ancestors().find(|p| fs::symlink_metadata(p).is_ok()) else {
            return Ok(());
        };
        let escaped = match fs::canonicalize(existing) {
            Ok(real) => !real.starts_with(&real_root),
            // Dangling link: its target cannot be checked.
            Err(_) => true,
        };
        if escaped {
            warn!(note_id, path = %path.display(), "rejected symlink escape");
            return Err(PathError::Escape(note_id.to_string()).into());
        }
        Ok(())
    }
}
