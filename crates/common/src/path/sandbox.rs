// Workspace sandbox: resolves untrusted note identifiers against a root
// directory and refuses anything that would land outside of it.

use std::path::{Component, Path, PathBuf};

use super::normalize::{normalize_identifier, note_file_name, PathError};

/// A workspace root that caller-supplied identifiers are resolved against.
///
/// The root is made absolute and lexically cleaned once at construction, so
/// every `resolve` compares against the same anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSandbox {
    root: PathBuf,
}

impl PathSandbox {
    pub fn new(root: impl AsRef<Path>) -> Result<Self, PathError> {
        let root = root.as_ref();
        let absolute = std::path::absolute(root).map_err(|error| PathError::Unresolvable {
            path: root.display().to_string(),
            reason: error.to_string(),
        })?;
        Ok(Self { root: lexical_clean(&absolute) })
    }

    /// Absolute, cleaned workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `user_path` to an absolute path inside the root.
    ///
    /// Fails with [`PathError::Escape`] when the cleaned join leaves the root,
    /// however deep the traversal.
    pub fn resolve(&self, user_path: &str) -> Result<PathBuf, PathError> {
        let relative = normalize_identifier(user_path)?;
        let candidate = lexical_clean(&self.root.join(&relative));

        if candidate == self.root || !candidate.starts_with(&self.root) {
            return Err(PathError::Escape(user_path.to_string()));
        }

        Ok(candidate)
    }

    /// Resolve a note identifier, appending the `.md` extension if missing.
    ///
    /// The identifier is normalized before the extension is added, so
    /// `notes/` names `notes.md` rather than a nameless file in `notes/`.
    pub fn resolve_note(&self, note_id: &str) -> Result<PathBuf, PathError> {
        let relative = normalize_identifier(note_id)?;
        if relative.split('/').any(|part| part == "..") {
            return Err(PathError::Escape(note_id.to_string()));
        }
        self.resolve(&note_file_name(&relative))
    }

    /// Express an absolute path inside the root as a `/`-separated relative path.
    pub fn relative(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        Some(parts.join("/"))
    }
}

/// Resolve `user_path` against `root` in one call.
pub fn resolve(root: impl AsRef<Path>, user_path: &str) -> Result<PathBuf, PathError> {
    PathSandbox::new(root)?.resolve(user_path)
}

/// Collapse `.` and `..` components without touching the filesystem.
///
/// A `..` at the filesystem root is dropped, matching how the OS treats `/..`.
pub fn lexical_clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => cleaned.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::ParentDir) | None => cleaned.push(".."),
                _ => {}
            },
            Component::Normal(part) => cleaned.push(part),
        }
    }
    cleaned
}
