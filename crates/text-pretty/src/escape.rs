//! C-style string escaping.

use std::fmt::Write as _;

/// Append `s` as a double-quoted, C-escaped string literal.
///
/// Backslash, quotes and `?` get a backslash; ASCII control characters use
/// their C escape when one exists and `\xHH` otherwise. Everything else,
/// including non-ASCII text, passes through unchanged.
pub fn push_escaped(buf: &mut String, s: &str) {
    buf.push('"');
    for c in s.chars() {
        match c {
            '\\' => buf.push_str("\\\\"),
            '\'' => buf.push_str("\\'"),
            '"' => buf.push_str("\\\""),
            '?' => buf.push_str("\\?"),
            c if !c.is_ascii_control() => buf.push(c),
            '\0' => buf.push_str("\\0"),
            '\x07' => buf.push_str("\\a"),
            '\x08' => buf.push_str("\\b"),
            '\x1b' => buf.push_str("\\e"),
            '\x0c' => buf.push_str("\\f"),
            '\n' => buf.push_str("\\n"),
            '\r' => buf.push_str("\\r"),
            '\t' => buf.push_str("\\t"),
            '\x0b' => buf.push_str("\\v"),
            c => {
                let _ignored = write!(buf, "\\x{:02x}", u32::from(c));
            }
        }
    }
    buf.push('"');
}

/// Escape `s` into a new string.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    push_escaped(&mut out, s);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specials_get_a_backslash() {
        assert_eq!(escape(r#"a\b'c"d?"#), r#""a\\b\'c\"d\?""#);
    }

    #[test]
    fn control_characters() {
        assert_eq!(
            escape("\0\x07\x08\x1b\x0c\n\r\t\x0b"),
            r#""\0\a\b\e\f\n\r\t\v""#
        );
        assert_eq!(escape("\x01\x1f\x7f"), r#""\x01\x1f\x7f""#);
    }

    #[test]
    fn printable_and_unicode_pass_through() {
        assert_eq!(escape("hello world"), "\"hello world\"");
        assert_eq!(escape("héllo ✓"), "\"héllo ✓\"");
        assert_eq!(escape(""), "\"\"");
    }
}
