//! URL to route resolution.

use crate::utils::path::fs::is_contained;
use std::path::{Path, PathBuf};

/// What a request URL points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` or `/index.html`
    Index,
    /// `/posts/{key}`
    Post(String),
    /// `/posts/{key}/{file}`: a file in the post's directory
    PostFile { key: String, file: PathBuf },
    /// `/highlight.css`
    HighlightCss,
    NotFound,
}

/// Map a request URL to a route.
///
/// The URL is percent-decoded and its query string dropped. File paths that
/// could leave the post directory (`..`, absolute components) are rejected.
pub fn parse_route(url: &str) -> Route {
    let clean = normalize_url(url);
    let segments: Vec<&str> = clean.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] | ["index.html"] => Route::Index,
        ["highlight.css"] => Route::HighlightCss,
        ["posts", key] | ["posts", key, "index.html"] => Route::Post((*key).to_string()),
        ["posts", key, rest @ ..] => {
            let file: PathBuf = rest.iter().collect();
            if is_valid_key(key) && is_contained(&file) {
                Route::PostFile {
                    key: (*key).to_string(),
                    file,
                }
            } else {
                Route::NotFound
            }
        }
        _ => Route::NotFound,
    }
}

fn is_valid_key(key: &str) -> bool {
    key != "." && key != ".."
}

/// Resolve `file` inside `dir`, following symlinks only if the target stays
/// under `dir`.
pub fn resolve_file(dir: &Path, file: &Path) -> Option<PathBuf> {
    let canonical = dir.join(file).canonicalize().ok()?;
    let root_canonical = dir.canonicalize().ok()?;

    (canonical.starts_with(&root_canonical) && canonical.is_file()).then_some(canonical)
}

/// Normalize URL: decode, strip query string and fragment
fn normalize_url(url: &str) -> String {
    use percent_encoding::percent_decode_str;

    let path = url.split(['?', '#']).next().unwrap_or(url);
    percent_decode_str(path)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_pages() {
        assert_eq!(parse_route("/"), Route::Index);
        assert_eq!(parse_route("/index.html?x=1"), Route::Index);
        assert_eq!(parse_route("/highlight.css"), Route::HighlightCss);
        assert_eq!(parse_route("/posts/hello"), Route::Post("hello".into()));
        assert_eq!(parse_route("/posts/hello/"), Route::Post("hello".into()));
        assert_eq!(parse_route("/posts/a%20b"), Route::Post("a b".into()));
        assert_eq!(parse_route("/posts"), Route::NotFound);
        assert_eq!(parse_route("/about"), Route::NotFound);
    }

    #[test]
    fn test_parse_post_file() {
        assert_eq!(
            parse_route("/posts/hello/img/diagram.png"),
            Route::PostFile {
                key: "hello".into(),
                file: PathBuf::from("img/diagram.png"),
            }
        );
    }

    #[test]
    fn test_reject_traversal() {
        assert_eq!(parse_route("/posts/hello/../../secret"), Route::NotFound);
        assert_eq!(parse_route("/posts/hello/%2e%2e/secret"), Route::NotFound);
        assert_eq!(parse_route("/posts/../config.toml"), Route::NotFound);
    }

    #[test]
    fn test_resolve_file() {
        let dir = tempfile::tempdir().unwrap();
        let post = dir.path().join("hello");
        fs::create_dir_all(&post).unwrap();
        fs::write(post.join("a.png"), b"png").unwrap();
        fs::write(dir.path().join("outside.txt"), b"x").unwrap();

        assert!(resolve_file(&post, Path::new("a.png")).is_some());
        assert!(resolve_file(&post, Path::new("missing.png")).is_none());
        assert!(resolve_file(&post, Path::new("../outside.txt")).is_none());
    }
}
