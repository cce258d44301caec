// Filesystem-safe note identifiers derived from human titles.
//
// Titles are NFKC-normalized, then characters that are unsafe in file names
// on common platforms are replaced with `-` and spaces with `_`.

use unicode_normalization::UnicodeNormalization;

const UNSAFE_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Convert a note title into an identifier suitable for `<id>.md`.
///
/// Path separators are replaced too, so a title never addresses a subfolder.
pub fn identifier_from_title(title: &str) -> String {
    title
        .trim()
        .nfkc()
        .map(|ch| match ch {
            ch if UNSAFE_CHARS.contains(&ch) => '-',
            ' ' => '_',
            ch => ch,
        })
        .collect()
}
