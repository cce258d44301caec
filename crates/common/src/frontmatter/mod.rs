// Front matter codec: splits a note into its `---`-delimited metadata block
// and plain body, and re-encodes the block around a new body.
//
// A block exists only when the very first line is the delimiter and a later
// line closes it. Anything else is plain body; that fallback is not an error.

pub mod grammar;
pub mod tags;

use chrono::{DateTime, SecondsFormat, Utc};

pub use grammar::{MetaValue, Metadata};
pub use tags::{extract_inline_tags, merge_tags};

/// Delimiter line that opens and closes the metadata block.
pub const DELIMITER: &str = "---";

/// Field refreshed on every encode.
pub const UPDATED_AT_KEY: &str = "updated_at";

/// A note split into metadata, plain body, and tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedNote {
    pub metadata: Metadata,
    pub body: String,
    pub tags: Vec<String>,
    pub has_front_matter: bool,
}

/// Borrowed view of a well-formed metadata block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock<'a> {
    opening: &'a str,
    closing: &'a str,
    lines: Vec<&'a str>,
    /// Whether a newline follows the closing delimiter.
    closed_with_newline: bool,
    body: &'a str,
}

impl<'a> RawBlock<'a> {
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    pub fn body(&self) -> &'a str {
        self.body
    }
}

/// Locate the metadata block at the start of `raw`, if any.
pub fn split(raw: &str) -> Option<RawBlock<'_>> {
    let (opening, mut rest) = raw.split_once('\n')?;
    if !is_delimiter(opening) {
        return None;
    }

    let mut lines = Vec::new();
    loop {
        let (line, remainder, had_newline) = match rest.split_once('\n') {
            Some((line, remainder)) => (line, remainder, true),
            None => (rest, "", false),
        };

        if is_delimiter(line) {
            return Some(RawBlock {
                opening,
                closing: line,
                lines,
                closed_with_newline: had_newline,
                body: remainder,
            });
        }
        if !had_newline {
            return None;
        }

        lines.push(line);
        rest = remainder;
    }
}

/// Split raw note content into metadata, plain body, and tags.
///
/// A malformed block (no closing delimiter) leaves `body` equal to `raw` and
/// the metadata empty; tags are then gathered from the whole content.
pub fn decode(raw: &str) -> DecodedNote {
    match split(raw) {
        Some(block) => {
            let metadata = grammar::parse_block(block.lines.iter().copied());
            let tags = merge_tags(metadata.tags(), block.body);
            DecodedNote { metadata, body: block.body.to_string(), tags, has_front_matter: true }
        }
        None => DecodedNote {
            metadata: Metadata::new(),
            body: raw.to_string(),
            tags: extract_inline_tags(raw),
            has_front_matter: false,
        },
    }
}

/// Re-encode `original_raw`'s metadata block around `new_body`, stamping
/// `updated_at` with the current time.
pub fn encode(original_raw: &str, new_body: &str) -> String {
    encode_at(original_raw, new_body, Utc::now())
}

/// Like [`encode`], with an explicit timestamp.
///
/// The block is rebuilt from the original lines, not from parsed metadata, so
/// field order, comments, and nested lines survive untouched. Only top-level
/// `updated_at` lines change; one is appended if none exists. Content with
/// no block yields `new_body` verbatim.
pub fn encode_at(original_raw: &str, new_body: &str, now: DateTime<Utc>) -> String {
    let Some(block) = split(original_raw) else {
        return new_body.to_string();
    };

    // Split lines keep their `\r`, so only the stamp needs the CRLF ending.
    let carriage_return = if block.opening.ends_with('\r') { "\r" } else { "" };
    let stamp = format!("{UPDATED_AT_KEY}: {}{carriage_return}", format_timestamp(now));
    let mut stamped = false;
    let mut lines: Vec<&str> = Vec::with_capacity(block.lines.len() + 1);
    for line in &block.lines {
        if is_updated_at_line(line) {
            lines.push(&stamp);
            stamped = true;
        } else {
            lines.push(line);
        }
    }
    if !stamped {
        lines.push(&stamp);
    }

    let mut out = String::with_capacity(original_raw.len() + new_body.len() + stamp.len());
    out.push_str(block.opening);
    out.push('\n');
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(block.closing);
    if block.closed_with_newline || !new_body.is_empty() {
        out.push('\n');
    }
    out.push_str(new_body);
    out
}

/// RFC 3339, UTC, second precision: `2026-10-16T09:30:00Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

fn is_updated_at_line(line: &str) -> bool {
    line.strip_prefix(UPDATED_AT_KEY).is_some_and(|rest| rest.trim_start().starts_with(':'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).single().expect("timestamp should be valid")
    }

    #[test]
    fn decodes_metadata_body_and_tags() {
        let decoded = decode("---\ntitle: X\ntags: [a, b]\n---\nBody #c");

        assert!(decoded.has_front_matter);
        assert_eq!(decoded.metadata.get("title"), Some(&MetaValue::Text("X".into())));
        assert_eq!(
            decoded.metadata.get("tags"),
            Some(&MetaValue::List(vec!["a".into(), "b".into()]))
        );
        assert_eq!(decoded.tags, vec!["a", "b", "c"]);
        assert_eq!(decoded.body, "Body #c");
    }

    #[test]
    fn content_without_block_is_all_body() {
        let decoded = decode("# Title\nplain #idea");
        assert!(!decoded.has_front_matter);
        assert!(decoded.metadata.is_empty());
        assert_eq!(decoded.body, "# Title\nplain #idea");
        assert_eq!(decoded.tags, vec!["idea"]);
    }

    #[test]
    fn unclosed_block_falls_back_to_plain_body() {
        let raw = "---\ntitle: X\n#orphan body";
        let decoded = decode(raw);
        assert!(!decoded.has_front_matter);
        assert!(decoded.metadata.is_empty());
        assert_eq!(decoded.body, raw);
        assert_eq!(decoded.tags, vec!["orphan"]);
    }

    #[test]
    fn delimiter_must_be_first_line() {
        let raw = "intro\n---\ntitle: X\n---\nbody";
        assert!(!decode(raw).has_front_matter);
    }

    #[test]
    fn lone_delimiter_is_not_a_block() {
        assert!(split("---").is_none());
        assert!(split("---\n").is_none());
    }

    #[test]
    fn empty_block_is_well_formed() {
        let decoded = decode("---\n---\nbody");
        assert!(decoded.has_front_matter);
        assert!(decoded.metadata.is_empty());
        assert_eq!(decoded.body, "body");
    }

    #[test]
    fn closing_delimiter_at_end_of_input() {
        let decoded = decode("---\ntitle: X\n---");
        assert!(decoded.has_front_matter);
        assert_eq!(decoded.body, "");
    }

    #[test]
    fn delimiter_tolerates_trailing_whitespace_and_crlf() {
        let decoded = decode("--- \r\ntitle: X\r\n---\r\nbody");
        assert!(decoded.has_front_matter);
        assert_eq!(decoded.metadata.title(), Some("X"));
        assert_eq!(decoded.body, "body");
    }

    #[test]
    fn body_never_contains_the_block() {
        let decoded = decode("---\na: 1\n---\n---\nnot a block\n");
        assert_eq!(decoded.body, "---\nnot a block\n");
    }

    #[test]
    fn encode_replaces_existing_updated_at_in_place() {
        let raw = "---\ntitle: X\nupdated_at: 2020-01-01T00:00:00Z\nauthor: me\n---\nold";
        let encoded = encode_at(raw, "new", fixed_now());
        assert_eq!(
            encoded,
            "---\ntitle: X\nupdated_at: 2026-10-16T09:30:00Z\nauthor: me\n---\nnew"
        );
    }

    #[test]
    fn encode_appends_updated_at_when_missing() {
        let raw = "---\ntitle: X\n---\nold";
        assert_eq!(
            encode_at(raw, "new", fixed_now()),
            "---\ntitle: X\nupdated_at: 2026-10-16T09:30:00Z\n---\nnew"
        );
    }

    #[test]
    fn encode_keeps_crlf_block_consistent() {
        let raw = "---\r\ntitle: X\r\nupdated_at: 2020-01-01T00:00:00Z\r\n---\r\nold";
        assert_eq!(
            encode_at(raw, "new", fixed_now()),
            "---\r\ntitle: X\r\nupdated_at: 2026-10-16T09:30:00Z\r\n---\r\nnew"
        );

        let raw = "---\r\ntitle: X\r\n---\r\nold";
        assert_eq!(
            encode_at(raw, "new", fixed_now()),
            "---\r\ntitle: X\r\nupdated_at: 2026-10-16T09:30:00Z\r\n---\r\nnew"
        );
    }

    #[test]
    fn encode_preserves_unparsed_lines_verbatim() {
        let raw = "---\n# keep me\ncustom:  spaced  \nauthor:\n  name: Ada\n---\nbody";
        let encoded = encode_at(raw, "body", fixed_now());
        assert!(encoded.starts_with("---\n# keep me\ncustom:  spaced  \nauthor:\n  name: Ada\n"));
    }

    #[test]
    fn nested_updated_at_is_not_touched() {
        let raw = "---\nmeta:\n  updated_at: keep\n---\nbody";
        let encoded = encode_at(raw, "body", fixed_now());
        assert!(encoded.contains("  updated_at: keep\n"));
        assert!(encoded.contains("\nupdated_at: 2026-10-16T09:30:00Z\n"));
    }

    #[test]
    fn encode_without_block_returns_body_verbatim() {
        assert_eq!(encode_at("no block here", "fresh", fixed_now()), "fresh");
        assert_eq!(encode_at("", "fresh", fixed_now()), "fresh");
        assert_eq!(encode_at("---\nunclosed", "fresh", fixed_now()), "fresh");
    }

    #[test]
    fn encode_empty_body_keeps_original_trailing_shape() {
        let raw = "---\ntitle: X\n---";
        assert_eq!(
            encode_at(raw, "", fixed_now()),
            "---\ntitle: X\nupdated_at: 2026-10-16T09:30:00Z\n---"
        );
    }

    #[test]
    fn round_trip_differs_only_in_updated_at() {
        let raw = "---\ntitle: X\ntags: [a, b]\nupdated_at: 2020-01-01T00:00:00Z\n---\nline 1\nline 2\n";
        let decoded = decode(raw);
        let encoded = encode_at(raw, &decoded.body, fixed_now());
        let expected = raw.replace("2020-01-01T00:00:00Z", "2026-10-16T09:30:00Z");
        assert_eq!(encoded, expected);
    }

    #[test]
    fn timestamp_round_trips_through_rfc3339() {
        let formatted = format_timestamp(fixed_now());
        let parsed = DateTime::parse_from_rfc3339(&formatted).unwrap().with_timezone(&Utc);
        assert_eq!(parsed, fixed_now());
    }
}
