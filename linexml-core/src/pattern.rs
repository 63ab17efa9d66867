//! Line-level micro-grammar.
//!
//! One "interesting" construct per line: a small set of patterns compiled
//! once into process-wide statics classifies each trimmed line. This is
//! deliberately not a tokenizer; a line either matches a pattern or it
//! contributes nothing.
//!
//! `regex` has no lookaround, so delimiters are consumed by the patterns
//! and the interesting content is taken from capture groups.

use once_cell::sync::Lazy;
use regex::Regex;

/// Opening tag name: first word run immediately following `<`.
/// Does not match `</...` because `/` is not a word character.
static OPEN_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(\w+)\b").unwrap());

/// Inline text: everything strictly between a `>` and the next `<`.
/// Greedy, so the text runs from the first `>` to the last `<` on the line.
static INLINE_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r">(.*)<").unwrap());

/// End tag name: word run between `</` and optional whitespace plus `>`.
static END_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</(\w+)\s*>").unwrap());

/// Attribute tokens: `key='value'` / `key="value"`, or a bare `key=value`
/// ending at the last word boundary. The bare form is greedy and will
/// swallow the rest of the line when it matches first; that quirk is part
/// of the recognized grammar.
static ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\w+=['"].*?['"]|\w+=.+\b"#).unwrap());

/// Extract the opening tag name, if the line carries one.
pub fn open_tag(line: &str) -> Option<&str> {
    OPEN_TAG.captures(line).map(|c| c.get(1).map_or("", |m| m.as_str()))
}

/// Extract inline text between `>` and the next `<`, if present.
pub fn inline_text(line: &str) -> Option<&str> {
    INLINE_TEXT.captures(line).map(|c| c.get(1).map_or("", |m| m.as_str()))
}

/// Extract the end-tag name, if the line carries one.
pub fn end_tag(line: &str) -> Option<&str> {
    END_TAG.captures(line).map(|c| c.get(1).map_or("", |m| m.as_str()))
}

/// True if the line carries the self-closing marker `/>` anywhere.
pub fn is_self_closing(line: &str) -> bool {
    line.contains("/>")
}

/// Iterate over attribute tokens as `(key, value)` pairs.
///
/// Each token is split on its first `=`; quotes around the value are
/// retained verbatim. A token without `=` cannot occur (the pattern
/// requires one), but the split is defensive anyway.
pub fn attributes(line: &str) -> impl Iterator<Item = (&str, &str)> {
    ATTRIBUTE
        .find_iter(line)
        .filter_map(|m| m.as_str().split_once('='))
}

/// True if the line contains the comment-open marker `<!--`.
pub fn has_comment_open(line: &str) -> bool {
    line.contains("<!--")
}

/// True if the line contains the comment-close marker `-->`.
pub fn has_comment_close(line: &str) -> bool {
    line.contains("-->")
}
