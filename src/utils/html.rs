//! HTML escaping helpers.
//!
//! Two flavours, matching what `pulldown-cmark` emits so that hand-written
//! fragments are indistinguishable from the renderer's own output:
//! - `escape_body()` - text content (`<`, `>`, `&`)
//! - `escape_attr()` - attribute values (additionally `"` and `'`)

use std::borrow::Cow;

/// Characters escaped in text content.
const BODY_CHARS: [char; 3] = ['<', '>', '&'];

/// Characters escaped in attribute values.
const ATTR_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Get the HTML entity for a special character.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML special characters in text content.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
///
/// # Example
/// ```ignore
/// assert_eq!(escape_body("<b>"), "&lt;b&gt;");
/// assert_eq!(escape_body("say \"hi\""), "say \"hi\""); // quotes kept
/// ```
#[inline]
pub fn escape_body(s: &str) -> Cow<'_, str> {
    escape_with(s, &BODY_CHARS)
}

/// Escape HTML attribute values.
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape_with(s, &ATTR_CHARS)
}

#[inline]
fn escape_with<'a>(s: &'a str, chars: &[char]) -> Cow<'a, str> {
    if !s.contains(chars) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match escape_char(c).filter(|_| chars.contains(&c)) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_body() {
        assert_eq!(escape_body("<script>"), "&lt;script&gt;");
        assert_eq!(escape_body("a & b"), "a &amp; b");
        assert_eq!(escape_body("it's \"quoted\""), "it's \"quoted\"");
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("a\"b"), "a&quot;b");
        assert_eq!(escape_attr("it's"), "it&#39;s");
        assert_eq!(escape_attr("<x>"), "&lt;x&gt;");
    }

    #[test]
    fn test_escape_no_alloc() {
        assert!(matches!(escape_body("hello"), Cow::Borrowed(_)));
        assert!(matches!(escape_attr("hello"), Cow::Borrowed(_)));
    }
}
