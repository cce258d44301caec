// Line grammar for the metadata block.
//
// This is deliberately NOT YAML. The accepted subset is:
//
//   line      := blank | comment | field | nested
//   comment   := '#' ...
//   field     := key ':' value          (key starts in column 0)
//   value     := scalar | '[' item (',' item)* ']'
//   nested    := any line starting with whitespace
//
// Nested lines belong to structures this grammar does not model. They are
// skipped during parsing and kept verbatim when the block is re-encoded.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Key whose value is always read as a list.
pub const TAGS_KEY: &str = "tags";

/// A metadata value: plain scalar or one level of inline array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Text(String),
    List(Vec<String>),
}

impl MetaValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Text(_) => None,
            Self::List(items) => Some(items),
        }
    }
}

/// Ordered metadata fields. A repeated key keeps its first position and
/// takes the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, MetaValue)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.iter().find(|(existing, _)| existing == key).map(|(_, value)| value)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(MetaValue::as_text).filter(|title| !title.is_empty())
    }

    pub fn tags(&self) -> &[String] {
        self.get(TAGS_KEY).and_then(MetaValue::as_list).unwrap_or(&[])
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MetadataVisitor;

        impl<'de> Visitor<'de> for MetadataVisitor {
            type Value = Metadata;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of string or string-array values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Metadata, A::Error> {
                let mut metadata = Metadata::new();
                while let Some((key, value)) = access.next_entry::<String, MetaValue>()? {
                    metadata.insert(key, value);
                }
                Ok(metadata)
            }
        }

        deserializer.deserialize_map(MetadataVisitor)
    }
}

/// Classification of a single block line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaLine<'a> {
    Blank,
    Comment,
    Nested(&'a str),
    Field { key: &'a str, value: MetaValue },
    Unrecognized(&'a str),
}

pub fn parse_line(line: &str) -> MetaLine<'_> {
    if line.trim().is_empty() {
        return MetaLine::Blank;
    }
    if line.starts_with(char::is_whitespace) {
        return MetaLine::Nested(line);
    }
    if line.starts_with('#') {
        return MetaLine::Comment;
    }

    let Some((key, value)) = line.split_once(':') else {
        return MetaLine::Unrecognized(line);
    };
    let key = key.trim();
    if key.is_empty() {
        return MetaLine::Unrecognized(line);
    }

    let value = value.trim();
    let value = if key == TAGS_KEY {
        MetaValue::List(parse_inline_array(value))
    } else {
        MetaValue::Text(unquote(value).to_string())
    };

    MetaLine::Field { key, value }
}

/// Parse every field in the block, in order.
pub fn parse_block<'a, I>(lines: I) -> Metadata
where
    I: IntoIterator<Item = &'a str>,
{
    let mut metadata = Metadata::new();
    for line in lines {
        if let MetaLine::Field { key, value } = parse_line(line) {
            metadata.insert(key, value);
        }
    }
    metadata
}

/// `[a, "b", 'c']` → `["a", "b", "c"]`. Brackets are optional; empty items
/// are dropped.
pub fn parse_inline_array(value: &str) -> Vec<String> {
    let value = value.trim();
    let value = value.strip_prefix('[').unwrap_or(value);
    let value = value.strip_suffix(']').unwrap_or(value);

    value
        .split(',')
        .map(|item| unquote(item.trim()))
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn unquote(value: &str) -> &str {
    value.trim_matches(|ch| ch == '"' || ch == '\'')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_field_is_trimmed_and_unquoted() {
        assert_eq!(
            parse_line("title:   \"Weekly Review\"  "),
            MetaLine::Field { key: "title", value: MetaValue::Text("Weekly Review".into()) }
        );
    }

    #[test]
    fn value_keeps_later_colons() {
        assert_eq!(
            parse_line("created_at: 2026-01-02T03:04:05Z"),
            MetaLine::Field {
                key: "created_at",
                value: MetaValue::Text("2026-01-02T03:04:05Z".into())
            }
        );
    }

    #[test]
    fn tags_are_always_a_list() {
        assert_eq!(
            parse_line("tags: [a, 'b', \"c\"]"),
            MetaLine::Field {
                key: "tags",
                value: MetaValue::List(vec!["a".into(), "b".into(), "c".into()])
            }
        );
        assert_eq!(
            parse_line("tags: rust, notes"),
            MetaLine::Field {
                key: "tags",
                value: MetaValue::List(vec!["rust".into(), "notes".into()])
            }
        );
    }

    #[test]
    fn bracketed_value_on_other_keys_stays_text() {
        assert_eq!(
            parse_line("title: [WIP] "),
            MetaLine::Field { key: "title", value: MetaValue::Text("[WIP]".into()) }
        );

        let metadata = parse_block(["title: [WIP]", "tags: [a]"]);
        assert_eq!(metadata.title(), Some("[WIP]"));
        assert_eq!(metadata.tags(), ["a".to_string()]);
    }

    #[test]
    fn empty_tags_give_empty_list() {
        assert_eq!(parse_inline_array("[]"), Vec::<String>::new());
        assert_eq!(parse_inline_array("[ , ,]"), Vec::<String>::new());
    }

    #[test]
    fn nested_and_comment_lines_are_not_fields() {
        assert_eq!(parse_line("  child: value"), MetaLine::Nested("  child: value"));
        assert_eq!(parse_line("# comment: here"), MetaLine::Comment);
        assert_eq!(parse_line("   "), MetaLine::Blank);
        assert_eq!(parse_line("no colon here"), MetaLine::Unrecognized("no colon here"));
        assert_eq!(parse_line(": orphan"), MetaLine::Unrecognized(": orphan"));
    }

    #[test]
    fn parse_block_skips_nested_structures() {
        let metadata = parse_block(["title: X", "author:", "  name: Ada", "  email: a@b"]);
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata.get("author"), Some(&MetaValue::Text(String::new())));
        assert!(metadata.get("name").is_none());
    }

    #[test]
    fn repeated_key_keeps_first_position_last_value() {
        let metadata = parse_block(["a: 1", "b: 2", "a: 3"]);
        let keys: Vec<&str> = metadata.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(metadata.get("a"), Some(&MetaValue::Text("3".into())));
    }

    #[test]
    fn metadata_serializes_in_insertion_order() {
        let metadata = parse_block(["zeta: z", "alpha: a", "tags: [x]"]);
        let json = serde_json::to_string(&metadata).unwrap();
        assert_eq!(json, r#"{"zeta":"z","alpha":"a","tags":["x"]}"#);

        let parsed: Metadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, metadata);
    }

    #[test]
    fn title_and_tags_accessors() {
        let metadata = parse_block(["title: Plan", "tags: [a, b]"]);
        assert_eq!(metadata.title(), Some("Plan"));
        assert_eq!(metadata.tags(), ["a".to_string(), "b".to_string()]);
        assert_eq!(Metadata::new().tags(), &[] as &[String]);
    }
}
