//! URL processing utilities.

/// Check if a link is external (has a URL scheme like http:, mailto:, etc.)
///
/// A valid scheme must:
/// - Have at least 1 character before the colon
/// - Only contain ASCII alphanumeric or `+`, `-`, `.`
#[inline]
pub fn is_external_link(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Resolve a document-relative link against `base` (a URL path).
///
/// Returns `None` for links that need no rewriting: external links,
/// absolute paths, fragments and queries.
///
/// # Examples
/// ```ignore
/// resolve_relative_link("/posts/hello", "diagram.png") -> Some("/posts/hello/diagram.png")
/// resolve_relative_link("/posts/hello", "#intro")      -> None
/// ```
pub fn resolve_relative_link(base: &str, link: &str) -> Option<String> {
    if link.is_empty() || link.starts_with(['/', '#', '?']) || is_external_link(link) {
        return None;
    }
    let link = link.strip_prefix("./").unwrap_or(link);
    Some(format!("{}/{}", base.trim_end_matches('/'), link))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_external_link() {
        assert!(is_external_link("https://example.com"));
        assert!(is_external_link("http://example.com"));
        assert!(is_external_link("mailto:user@example.com"));
        assert!(is_external_link("tel:+1234567890"));
        assert!(!is_external_link("/about"));
        assert!(!is_external_link("./file.txt"));
        assert!(!is_external_link("#section"));
    }

    #[test]
    fn test_resolve_relative_link() {
        assert_eq!(
            resolve_relative_link("/posts/hello", "diagram.png").as_deref(),
            Some("/posts/hello/diagram.png")
        );
        assert_eq!(
            resolve_relative_link("/posts/hello/", "./img/a.png").as_deref(),
            Some("/posts/hello/img/a.png")
        );
        assert_eq!(resolve_relative_link("/posts/hello", "/about"), None);
        assert_eq!(resolve_relative_link("/posts/hello", "#top"), None);
        assert_eq!(resolve_relative_link("/posts/hello", "https://x.dev"), None);
        assert_eq!(resolve_relative_link("/posts/hello", "//cdn.dev/a.js"), None);
        assert_eq!(resolve_relative_link("/posts/hello", ""), None);
    }
}
