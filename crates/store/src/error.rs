// Error taxonomy for repository operations, with stable machine codes.

use std::path::PathBuf;

use noteloom_common::lines::LineError;
use noteloom_common::path::PathError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("invalid argument: {0}")]
    Validation(String),

    #[error(transparent)]
    Range(#[from] LineError),

    #[error(transparent)]
    InvalidIdentifier(PathError),

    #[error(transparent)]
    PathSecurity(PathError),

    #[error("I/O error at `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse note: {0}")]
    Parse(String),

    #[error("note `{0}` already exists")]
    AlreadyExists(String),

    #[error("note `{0}` not found")]
    NotFound(String),

    #[error("note changed since it was read (expected {expected}, found {actual})")]
    PreconditionFailed { expected: String, actual: String },
}

impl NoteError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Stable code reported to tool callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::InvalidIdentifier(_) => "VALIDATION_FAILED",
            Self::Range(_) => "RANGE_ERROR",
            Self::PathSecurity(_) => "PATH_SECURITY",
            Self::Io { .. } => "IO_ERROR",
            Self::Parse(_) => "PARSE_ERROR",
            Self::AlreadyExists(_) => "NOTE_EXISTS",
            Self::NotFound(_) => "NOT_FOUND",
            Self::PreconditionFailed { .. } => "EDIT_PRECONDITION_FAILED",
        }
    }
}

/// Escapes are security failures; malformed identifiers are bad input.
impl From<PathError> for NoteError {
    fn from(error: PathError) -> Self {
        match error {
            PathError::Escape(_) | PathError::Unresolvable { .. } => Self::PathSecurity(error),
            PathError::Empty
            | PathError::TooLong
            | PathError::NullByte
            | PathError::InvalidComponent(_) => Self::InvalidIdentifier(error),
        }
    }
}

pub type Result<T, E = NoteError> = std::result::Result<T, E>;
