// Raw note file access: tolerant reads and crash-safe writes.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::error::{NoteError, Result};

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Read a note file as UTF-8. `None` when the file does not exist.
pub fn read_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => String::from_utf8(bytes).map(Some).map_err(|error| {
            NoteError::Parse(format!("`{}` is not valid UTF-8: {error}", path.display()))
        }),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
        Err(error) => Err(NoteError::io(path, error)),
    }
}

/// Read a note file, treating a missing file as empty content.
pub fn read_or_empty(path: &Path) -> Result<String> {
    let content = read_if_exists(path)?;
    if content.is_none() {
        debug!(path = %path.display(), "note file missing, treating as empty");
    }
    Ok(content.unwrap_or_default())
}

/// Replace `path` with `content` atomically.
///
/// Writes a sibling temp file, fsyncs it, then renames it over the target so
/// readers see either the old bytes or the new ones. An existing target's
/// permissions carry over to the replacement. Parent directories are
/// created as needed.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        NoteError::io(path, std::io::Error::new(ErrorKind::InvalidInput, "path has no parent"))
    })?;
    fs::create_dir_all(parent).map_err(|error| NoteError::io(parent, error))?;

    let tmp_path = temp_path_for(path);
    let written = write_and_sync(&tmp_path, content)
        .and_then(|()| keep_permissions(path, &tmp_path))
        .and_then(|()| fs::rename(&tmp_path, path).map_err(|error| NoteError::io(path, error)));
    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    written
}

/// Create `path` with `content`, failing if it already exists.
///
/// The exclusive create claims the name; content still lands via rename.
pub fn create_new(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        NoteError::io(path, std::io::Error::new(ErrorKind::InvalidInput, "path has no parent"))
    })?;
    fs::create_dir_all(parent).map_err(|error| NoteError::io(parent, error))?;

    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => {}
        Err(error) if error.kind() == ErrorKind::AlreadyExists => {
            return Err(NoteError::AlreadyExists(path.display().to_string()));
        }
        Err(error) => return Err(NoteError::io(path, error)),
    }
    let written = write_atomic(path, content);
    if written.is_err() {
        let _ = fs::remove_file(path);
    }
    written
}

fn write_and_sync(tmp_path: &Path, content: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(tmp_path)
        .map_err(|error| NoteError::io(tmp_path, error))?;
    file.write_all(content).map_err(|error| NoteError::io(tmp_path, error))?;
    file.sync_data().map_err(|error| NoteError::io(tmp_path, error))
}

fn keep_permissions(target: &Path, tmp_path: &Path) -> Result<()> {
    match fs::metadata(target) {
        Ok(metadata) => fs::set_permissions(tmp_path, metadata.permissions())
            .map_err(|error| NoteError::io(tmp_path, error)),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
        Err(error) => Err(NoteError::io(target, error)),
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{name}.{}-{seq}.tmp", std::process::id()))
}
