// Inline `#tag` extraction from note bodies.

use std::sync::OnceLock;

use regex::Regex;

fn inline_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"#([A-Za-z0-9_\p{Ideographic}]+)")
            .expect("inline tag pattern should compile")
    })
}

/// Inline tags in source order, without the leading `#`, deduplicated.
pub fn extract_inline_tags(body: &str) -> Vec<String> {
    let mut tags = Vec::new();
    push_inline_tags(&mut tags, body);
    tags
}

/// Combine front-matter tags with inline tags from `body`.
///
/// Order is front-matter first, then inline tags by first appearance.
/// Deduplication is case-sensitive.
pub fn merge_tags(front_matter: &[String], body: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(front_matter.len());
    for tag in front_matter {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    push_inline_tags(&mut tags, body);
    tags
}

fn push_inline_tags(tags: &mut Vec<String>, body: &str) {
    for captures in inline_tag_pattern().captures_iter(body) {
        let tag = &captures[1];
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    }
}
