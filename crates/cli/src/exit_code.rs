// Consistent exit codes for the noteloom CLI.
//
//   0  = success
//   1  = general error
//   2  = usage/argument error (including invalid line ranges)
//   12 = conflict (note exists, stale expected hash)
//   13 = identifier escapes the workspace
//   14 = filesystem I/O error

use std::process;

use noteloom_store::NoteError;

/// Named exit codes for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    Error = 1,
    Usage = 2,
    Conflict = 12,
    PathSecurity = 13,
    Io = 14,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Map an anyhow error to an exit code by inspecting the error chain.
    pub fn from_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(note_err) = cause.downcast_ref::<NoteError>() {
                return Self::from_tool_code(note_err.code());
            }
            if let Some(tool_err) = cause.downcast_ref::<ToolFailure>() {
                return Self::from_tool_code(&tool_err.code);
            }
            if cause.downcast_ref::<std::io::Error>().is_some() {
                return Self::Io;
            }
        }
        Self::Error
    }

    /// Map a tool error code string to an exit code.
    pub fn from_tool_code(code: &str) -> Self {
        match code {
            "VALIDATION_FAILED" | "RANGE_ERROR" | "METHOD_NOT_FOUND" => Self::Usage,
            "NOTE_EXISTS" | "EDIT_PRECONDITION_FAILED" => Self::Conflict,
            "PATH_SECURITY" => Self::PathSecurity,
            "IO_ERROR" => Self::Io,
            _ => Self::Error,
        }
    }
}

impl From<ExitCode> for process::ExitCode {
    fn from(code: ExitCode) -> Self {
        process::ExitCode::from(code.code() as u8)
    }
}

/// A failed tool response that can be embedded in an `anyhow::Error` chain.
#[derive(Debug)]
pub struct ToolFailure {
    pub code: String,
    pub message: String,
}

impl std::fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ToolFailure {}

#[cfg(test)]
mod tests {
    use super::*;
    use noteloom_common::lines::LineError;
    use noteloom_common::path::PathError;

    #[test]
    fn exit_code_values() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::Error.code(), 1);
        assert_eq!(ExitCode::Usage.code(), 2);
        assert_eq!(ExitCode::Conflict.code(), 12);
        assert_eq!(ExitCode::PathSecurity.code(), 13);
        assert_eq!(ExitCode::Io.code(), 14);
    }

    #[test]
    fn from_tool_code_groups() {
        assert_eq!(ExitCode::from_tool_code("RANGE_ERROR"), ExitCode::Usage);
        assert_eq!(ExitCode::from_tool_code("VALIDATION_FAILED"), ExitCode::Usage);
        assert_eq!(ExitCode::from_tool_code("NOTE_EXISTS"), ExitCode::Conflict);
        assert_eq!(ExitCode::from_tool_code("EDIT_PRECONDITION_FAILED"), ExitCode::Conflict);
        assert_eq!(ExitCode::from_tool_code("PATH_SECURITY"), ExitCode::PathSecurity);
        assert_eq!(ExitCode::from_tool_code("NOT_FOUND"), ExitCode::Error);
    }

    #[test]
    fn from_error_finds_note_error_under_context() {
        let err = anyhow::Error::new(NoteError::from(PathError::Escape("..".into())))
            .context("replace-lines failed");
        assert_eq!(ExitCode::from_error(&err), ExitCode::PathSecurity);

        let err = anyhow::Error::new(NoteError::from(LineError::StartBelowOne(0)));
        assert_eq!(ExitCode::from_error(&err), ExitCode::Usage);
    }

    #[test]
    fn from_error_tool_failure_in_chain() {
        let err = anyhow::Error::new(ToolFailure {
            code: "NOTE_EXISTS".into(),
            message: "note `x` already exists".into(),
        });
        assert_eq!(ExitCode::from_error(&err), ExitCode::Conflict);
    }

    #[test]
    fn from_error_plain_io_is_io() {
        let err = anyhow::Error::new(std::io::Error::other("disk full"));
        assert_eq!(ExitCode::from_error(&err), ExitCode::Io);
    }

    #[test]
    fn from_error_generic_is_error() {
        let err = anyhow::anyhow!("something went wrong");
        assert_eq!(ExitCode::from_error(&err), ExitCode::Error);
    }
}
