// Output format auto-detection for the CLI.
//
// TTY → human-readable text. Piped/redirected → structured JSON.
// `--json` flag forces JSON output regardless of terminal.

use noteloom_common::types::{DiffKind, DiffLine, MutationResult};
use noteloom_store::NoteError;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

use crate::exit_code::ToolFailure;

const ANSI_RED: &str = "\x1b[31m";
const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_RESET: &str = "\x1b[0m";

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    Human,
    /// Machine-readable JSON (one object per response).
    Json,
}

impl OutputFormat {
    /// Auto-detect format: JSON if `--json` was passed or stdout is not a TTY.
    pub fn detect(json_flag: bool) -> Self {
        if json_flag {
            return Self::Json;
        }
        Self::detect_from_terminal(io::stdout().is_terminal())
    }

    /// Testable variant that takes an explicit `is_tty` flag.
    pub fn detect_from_terminal(is_tty: bool) -> Self {
        if is_tty {
            Self::Human
        } else {
            Self::Json
        }
    }
}

/// Write a value to stdout in the selected format.
pub fn print_output<T, F>(format: OutputFormat, value: &T, human_fn: F) -> io::Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    write_output(&mut io::stdout().lock(), format, value, human_fn)
}

/// Write a value to a provided writer (useful for testing).
pub fn write_output<W, T, F>(
    writer: &mut W,
    format: OutputFormat,
    value: &T,
    human_fn: F,
) -> io::Result<()>
where
    W: Write,
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Human => {
            writeln!(writer, "{}", human_fn(value))
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, value).map_err(io::Error::other)?;
            writeln!(writer)
        }
    }
}

/// Write an error to stderr in the selected format.
pub fn print_error(format: OutputFormat, code: &str, message: &str) {
    let mut err = io::stderr().lock();
    match format {
        OutputFormat::Human => {
            let line =
                render_human_stderr_line("error", message, io::stderr().is_terminal(), ANSI_RED);
            let _ = writeln!(err, "{line}");
        }
        OutputFormat::Json => {
            let obj = serde_json::json!({
                "error": {
                    "code": code,
                    "message": message,
                }
            });
            let _ = serde_json::to_writer(&mut err, &obj);
            let _ = writeln!(err);
        }
    }
}

/// Print a command failure with the most specific code found in its chain.
pub fn print_anyhow_error(format: OutputFormat, error: &anyhow::Error) {
    print_error(format, error_code(error), &format!("{error:#}"));
}

fn error_code(error: &anyhow::Error) -> &str {
    for cause in error.chain() {
        if let Some(note_err) = cause.downcast_ref::<NoteError>() {
            return note_err.code();
        }
        if let Some(tool_err) = cause.downcast_ref::<ToolFailure>() {
            return &tool_err.code;
        }
    }
    "ERROR"
}

/// Print a command outcome: the value on stdout, or the error on stderr
/// (the error is still returned so `main` can pick the exit code).
pub fn finish<T, F>(format: OutputFormat, result: anyhow::Result<T>, human_fn: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match result {
        Ok(value) => {
            print_output(format, &value, human_fn)?;
            Ok(())
        }
        Err(error) => {
            print_anyhow_error(format, &error);
            Err(error)
        }
    }
}

/// Human rendering of a mutation: the message, then one marked line per
/// diff entry.
pub fn render_mutation(result: &MutationResult) -> String {
    let mut out = result.message.clone();
    let diff = render_diff(&result.diff_data, io::stdout().is_terminal());
    if !diff.is_empty() {
        out.push('\n');
        out.push_str(&diff);
    }
    out
}

/// `+` added, `-` removed, `~` modified (old then new), two spaces unchanged.
pub fn render_diff(diff: &[DiffLine], color: bool) -> String {
    let paint = |ansi: &str, text: String| {
        if color {
            format!("{ansi}{text}{ANSI_RESET}")
        } else {
            text
        }
    };

    let mut lines = Vec::with_capacity(diff.len());
    for entry in diff {
        match entry.kind {
            DiffKind::Unchanged => lines.push(format!("{:>4}   {}", entry.line_number, entry.content)),
            DiffKind::Added => lines.push(paint(
                ANSI_GREEN,
                format!("{:>4} + {}", entry.line_number, entry.content),
            )),
            DiffKind::Removed => lines.push(paint(
                ANSI_RED,
                format!("{:>4} - {}", old_number(entry), entry.content),
            )),
            DiffKind::Modified => {
                let old = entry.old_content.as_deref().unwrap_or_default();
                lines.push(paint(ANSI_YELLOW, format!("{:>4} ~ {old}", old_number(entry))));
                lines.push(paint(
                    ANSI_YELLOW,
                    format!("{:>4} ~ {}", entry.line_number, entry.content),
                ));
            }
        }
    }
    lines.join("\n")
}

fn old_number(entry: &DiffLine) -> usize {
    entry.old_line_number.unwrap_or(entry.line_number)
}

fn render_human_stderr_line(label: &str, message: &str, is_tty: bool, color: &str) -> String {
    if is_tty {
        format!("{color}{label}:{ANSI_RESET} {message}")
    } else {
        format!("{label}: {message}")
    }
}
