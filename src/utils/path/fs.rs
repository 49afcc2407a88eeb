//! Filesystem path helpers.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Whether a relative path stays inside its base (no `..`, no root).
pub fn is_contained(relative: &Path) -> bool {
    relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Write `contents` to `path`, creating parent directories first.
pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_absolute() {
        let path = Path::new("/absolute/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_normalize_path_relative() {
        let normalized = normalize_path(Path::new("does/not/exist"));
        assert!(normalized.is_absolute());
        assert!(normalized.ends_with("does/not/exist"));
    }

    #[test]
    fn test_is_contained() {
        assert!(is_contained(Path::new("image.png")));
        assert!(is_contained(Path::new("./img/a.png")));
        assert!(!is_contained(Path::new("../secret")));
        assert!(!is_contained(Path::new("img/../../secret")));
        assert!(!is_contained(Path::new("/etc/passwd")));
    }

    #[test]
    fn test_write_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/index.html");
        write_file(&path, "<p>hi</p>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>hi</p>");
    }
}
