//! Character-Offset String Utilities
//!
//! Document offsets (selection anchors, entity ranges, style ranges) are
//! counted in characters, not bytes, so that a selection never lands inside
//! a multi-byte character. These helpers translate character offsets into
//! safe byte slices.
//!
//! # Example
//! ```ignore
//! use crate::string_utils::{char_slice, char_count};
//!
//! let text = "Hei på deg"; // 'å' is 2 bytes but one character
//! assert_eq!(char_count(text), 10);
//! assert_eq!(char_slice(text, 4, 6), "på");
//! ```

// ─────────────────────────────────────────────────────────────────────────────
// Offset Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Number of characters in `s`.
#[inline]
pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Convert a character offset into a byte index.
///
/// Offsets past the end clamp to `s.len()`.
#[inline]
pub fn char_to_byte(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(byte, _)| byte)
        .unwrap_or(s.len())
}

// ─────────────────────────────────────────────────────────────────────────────
// Slicing and Splicing
// ─────────────────────────────────────────────────────────────────────────────

/// Slice `s` between two character offsets.
///
/// Offsets are clamped to the string; `start >= end` yields an empty slice.
#[inline]
pub fn char_slice(s: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let start = char_to_byte(s, start);
    let end = char_to_byte(s, end);
    &s[start..end]
}

/// Split `s` at a character offset.
pub fn split_at_char(s: &str, char_index: usize) -> (&str, &str) {
    s.split_at(char_to_byte(s, char_index))
}

/// Return a copy of `s` with `range` (character offsets) replaced by `insert`.
pub fn splice_chars(s: &str, start: usize, end: usize, insert: &str) -> String {
    let start_byte = char_to_byte(s, start);
    let end_byte = char_to_byte(s, end.max(start));
    let mut out = String::with_capacity(s.len() + insert.len());
    out.push_str(&s[..start_byte]);
    out.push_str(insert);
    out.push_str(&s[end_byte..]);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_count_multibyte() {
        assert_eq!(char_count("hello"), 5);
        assert_eq!(char_count("Hei på deg"), 10);
        assert_eq!(char_count("世界🎉"), 3);
        assert_eq!(char_count(""), 0);
    }

    #[test]
    fn test_char_to_byte() {
        let s = "på deg";
        assert_eq!(char_to_byte(s, 0), 0);
        assert_eq!(char_to_byte(s, 1), 1);
        assert_eq!(char_to_byte(s, 2), 3);
        assert_eq!(char_to_byte(s, 100), s.len());
    }

    #[test]
    fn test_char_slice_chinese() {
        let text = "Hello 世界!";
        assert_eq!(char_slice(text, 6, 8), "世界");
        assert_eq!(char_slice(text, 8, 6), "");
        assert_eq!(char_slice(text, 0, 100), text);
    }

    #[test]
    fn test_split_at_char_emoji() {
        let (left, right) = split_at_char("a🎉b", 2);
        assert_eq!(left, "a🎉");
        assert_eq!(right, "b");
    }

    #[test]
    fn test_splice_chars() {
        assert_eq!(splice_chars("hello world", 6, 11, "there"), "hello there");
        assert_eq!(splice_chars("æøå", 1, 1, "-"), "æ-øå");
        assert_eq!(splice_chars("abc", 3, 3, "d"), "abcd");
    }
}
