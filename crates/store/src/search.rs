// Workspace search over note content, titles and tags.

use std::fs;
use std::path::{Path, PathBuf};

use noteloom_common::frontmatter::{self, DecodedNote};
use noteloom_common::path::{strip_note_extension, PathSandbox};
use noteloom_common::types::SearchHit;
use tracing::debug;

use crate::error::{NoteError, Result};

/// Prefix that restricts a query to tags.
pub const TAG_PREFIX: &str = "tag:";

const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Query {
    Text(String),
    Tag(String),
}

impl Query {
    /// Fails on an empty needle, which would otherwise match every note.
    fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let query = match trimmed.get(..TAG_PREFIX.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(TAG_PREFIX) => {
                Self::Tag(trimmed[TAG_PREFIX.len()..].trim().to_lowercase())
            }
            _ => Self::Text(trimmed.to_lowercase()),
        };
        let (Self::Text(needle) | Self::Tag(needle)) = &query;
        if needle.is_empty() {
            return Err(NoteError::Validation("query must not be empty".to_string()));
        }
        Ok(query)
    }
}

/// Search every `.md` file under the sandbox root.
///
/// Hits come back in path order. Unreadable files are skipped.
pub fn search(sandbox: &PathSandbox, query: &str, max_snippets: usize) -> Result<Vec<SearchHit>> {
    let query = Query::parse(query)?;
    let mut files = Vec::new();
    collect_markdown(sandbox.root(), &mut files)?;
    files.sort();

    let mut hits = Vec::new();
    for path in files {
        let Ok(raw) = fs::read_to_string(&path) else {
            debug!(path = %path.display(), "skipping unreadable note");
            continue;
        };
        let Some(relative) = sandbox.relative(&path) else {
            continue;
        };
        let decoded = frontmatter::decode(&raw);
        if let Some(hit) = match_note(&query, &relative, &raw, &decoded, max_snippets) {
            hits.push(hit);
        }
    }
    Ok(hits)
}

fn match_note(
    query: &Query,
    relative: &str,
    raw: &str,
    decoded: &DecodedNote,
    max_snippets: usize,
) -> Option<SearchHit> {
    let title = note_title(decoded);
    let snippets = match query {
        Query::Tag(needle) => {
            if !decoded.tags.iter().any(|tag| tag.to_lowercase().contains(needle.as_str())) {
                return None;
            }
            Vec::new()
        }
        Query::Text(needle) => {
            let matched = raw.to_lowercase().contains(needle.as_str())
                || title.to_lowercase().contains(needle.as_str())
                || decoded.tags.iter().any(|tag| tag.to_lowercase().contains(needle.as_str()));
            if !matched {
                return None;
            }
            decoded
                .body
                .lines()
                .filter(|line| line.to_lowercase().contains(needle.as_str()))
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty())
                .take(max_snippets)
                .collect()
        }
    };

    Some(SearchHit {
        id: strip_note_extension(relative).to_string(),
        title,
        path: relative.to_string(),
        snippets,
        tags: decoded.tags.clone(),
    })
}

/// Metadata `title`, else the first `# ` heading, else `Untitled`.
pub fn note_title(decoded: &DecodedNote) -> String {
    if let Some(title) = decoded.metadata.title().map(str::trim).filter(|t| !t.is_empty()) {
        return title.to_string();
    }
    decoded
        .body
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|heading| heading.trim().to_string())
        .filter(|heading| !heading.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Collect Markdown files recursively. Hidden entries and symlinks are not
/// followed.
fn collect_markdown(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(error) => return Err(NoteError::io(dir, error)),
    };

    for entry in entries {
        let entry = entry.map_err(|error| NoteError::io(dir, error))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let path = entry.path();
        if file_type.is_dir() {
            collect_markdown(&path, files)?;
        } else if file_type.is_file() && is_markdown(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_markdown(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace(files: &[(&str, &str)]) -> (TempDir, PathSandbox) {
        let tmp = TempDir::new().unwrap();
        for (name, content) in files {
            let path = tmp.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let sandbox = PathSandbox::new(tmp.path()).unwrap();
        (tmp, sandbox)
    }

    #[test]
    fn query_parsing() {
        assert_eq!(Query::parse("  Rust ").unwrap(), Query::Text("rust".into()));
        assert_eq!(Query::parse("TAG: Idea").unwrap(), Query::Tag("idea".into()));
        assert_eq!(Query::parse("tags").unwrap(), Query::Text("tags".into()));
    }

    #[test]
    fn empty_query_is_rejected() {
        let (_tmp, sandbox) = workspace(&[("a.md", "anything"), ("b.md", "else")]);
        for query in ["", "   ", "tag:", "TAG:  "] {
            let error = search(&sandbox, query, 3).unwrap_err();
            assert_eq!(error.code(), "VALIDATION_FAILED", "query {query:?}");
        }
    }

    #[test]
    fn content_match_is_case_insensitive_with_snippets() {
        let (_tmp, sandbox) = workspace(&[
            ("a.md", "# Alpha\nLearning RUST today\nnothing\n  rust again  "),
            ("b.md", "# Beta\nno match"),
        ]);
        let hits = search(&sandbox, "rust", 3).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
        assert_eq!(hits[0].title, "Alpha");
        assert_eq!(hits[0].snippets, vec!["Learning RUST today", "rust again"]);
    }

    #[test]
    fn snippets_are_capped() {
        let (_tmp, sandbox) = workspace(&[("a.md", "x1\nx2\nx3\nx4")]);
        assert_eq!(search(&sandbox, "x", 2).unwrap()[0].snippets, vec!["x1", "x2"]);
    }

    #[test]
    fn tag_query_matches_front_matter_and_inline_tags() {
        let (_tmp, sandbox) = workspace(&[
            ("fm.md", "---\ntags: [Reading]\n---\nbody"),
            ("inline.md", "text #reading_list"),
            ("plain.md", "reading without tag"),
        ]);
        let ids: Vec<String> =
            search(&sandbox, "tag:read", 3).unwrap().into_iter().map(|hit| hit.id).collect();
        assert_eq!(ids, vec!["fm", "inline"]);
    }

    #[test]
    fn metadata_title_wins_over_heading() {
        let (_tmp, sandbox) = workspace(&[("n.md", "---\ntitle: Real\n---\n# Heading")]);
        assert_eq!(search(&sandbox, "real", 3).unwrap()[0].title, "Real");
    }

    #[test]
    fn untitled_when_no_title_or_heading() {
        let (_tmp, sandbox) = workspace(&[("n.md", "just text")]);
        assert_eq!(search(&sandbox, "text", 3).unwrap()[0].title, "Untitled");
    }

    #[test]
    fn walks_subfolders_and_skips_hidden_and_non_markdown() {
        let (_tmp, sandbox) = workspace(&[
            ("deep/dir/n.md", "needle"),
            (".hidden/n.md", "needle"),
            (".secret.md", "needle"),
            ("notes.txt", "needle"),
        ]);
        let hits = search(&sandbox, "needle", 3).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "deep/dir/n");
        assert_eq!(hits[0].path, "deep/dir/n.md");
    }

    #[test]
    fn missing_root_yields_no_hits() {
        let tmp = TempDir::new().unwrap();
        let sandbox = PathSandbox::new(tmp.path().join("absent")).unwrap();
        assert!(search(&sandbox, "x", 3).unwrap().is_empty());
    }
}
