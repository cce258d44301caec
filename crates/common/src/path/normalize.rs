// Note identifier canonicalization: separator unification, lexical `.`/`..`
// collapsing, null-byte rejection, 512 char max.

use thiserror::Error;

/// Maximum allowed identifier length in characters.
pub const MAX_PATH_CHARS: usize = 512;

/// Extension every note file carries on disk.
pub const NOTE_EXTENSION: &str = ".md";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("path exceeds maximum length of {MAX_PATH_CHARS} characters")]
    TooLong,

    #[error("path contains null byte")]
    NullByte,

    #[error("path contains invalid component: {0}")]
    InvalidComponent(String),

    #[error("path access denied: `{0}` resolves outside the workspace root")]
    Escape(String),

    #[error("cannot resolve workspace root `{path}`: {reason}")]
    Unresolvable { path: String, reason: String },
}

/// Canonicalize a caller-supplied note identifier into a root-relative path.
///
/// Rules:
/// - Convert all separators to `/`
/// - Strip leading separators so the identifier is always root-relative
/// - Drop empty and `.` segments
/// - Collapse `..` against the preceding segment; a `..` with nothing left to
///   pop is kept, so escapes stay visible to the sandbox
/// - Reject null bytes, whitespace-only segments, and empty results
/// - Enforce max 512 character limit (after normalization)
pub fn normalize_identifier(input: &str) -> Result<String, PathError> {
    if input.is_empty() {
        return Err(PathError::Empty);
    }

    if input.contains('\0') {
        return Err(PathError::NullByte);
    }

    let unified = input.replace('\\', "/");
    let mut components: Vec<&str> = Vec::new();

    for component in unified.split('/') {
        match component {
            "" | "." => {}
            ".." => match components.last() {
                Some(last) if *last != ".." => {
                    components.pop();
                }
                _ => components.push(".."),
            },
            other => {
                if other.trim().is_empty() {
                    return Err(PathError::InvalidComponent(
                        "(whitespace-only component)".to_string(),
                    ));
                }
                components.push(other);
            }
        }
    }

    if components.is_empty() {
        return Err(PathError::Empty);
    }

    let result = components.join("/");

    if result.chars().count() > MAX_PATH_CHARS {
        return Err(PathError::TooLong);
    }

    Ok(result)
}

/// Map a note identifier to its on-disk file name (`<id>.md`).
///
/// Identifiers that already carry the extension are returned unchanged.
pub fn note_file_name(note_id: &str) -> String {
    if note_id.ends_with(NOTE_EXTENSION) {
        note_id.to_string()
    } else {
        format!("{note_id}{NOTE_EXTENSION}")
    }
}

/// Strip the note extension from a file name or identifier.
pub fn strip_note_extension(name: &str) -> &str {
    name.strip_suffix(NOTE_EXTENSION).unwrap_or(name)
}
