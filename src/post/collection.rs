//! The set of posts under a content directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use jwalk::WalkDir;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::reader::{INDEX_FILE, Post, PostError, PostReader};

/// All posts of a site, newest first.
#[derive(Debug, Default, Clone)]
pub struct PostCollection {
    root: PathBuf,
    posts: Vec<Arc<Post>>,
    by_key: FxHashMap<String, usize>,
}

impl PostCollection {
    /// Load every immediate subdirectory of `dir` that contains an
    /// `index.md`. Other entries are ignored.
    pub fn load(dir: &Path, skip_drafts: bool) -> Result<Self, PostError> {
        if !dir.is_dir() {
            return Err(PostError::MissingDir(dir.to_path_buf()));
        }

        let sources: Vec<PathBuf> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_dir())
            .map(|e| e.path().join(INDEX_FILE))
            .filter(|path| path.is_file())
            .collect();

        let reader = PostReader;
        let posts = sources
            .par_iter()
            .map(|path| reader.read(path))
            .collect::<Result<Vec<_>, _>>()?;

        let skipped = posts.iter().filter(|p| skip_drafts && p.is_draft()).count();
        if skipped > 0 {
            crate::debug!("posts"; "skipped {} draft{}", skipped, crate::utils::plural_s(skipped));
        }

        Self::from_posts(dir, posts.into_iter().filter(|p| !(skip_drafts && p.is_draft())))
    }

    /// Build a collection from already-read posts.
    pub fn from_posts(
        root: &Path,
        posts: impl IntoIterator<Item = Post>,
    ) -> Result<Self, PostError> {
        let mut posts: Vec<Arc<Post>> = posts.into_iter().map(Arc::new).collect();
        posts.sort_by(|a, b| newest_first(a, b));

        let mut by_key = FxHashMap::default();
        for (i, post) in posts.iter().enumerate() {
            if by_key.insert(post.key.clone(), i).is_some() {
                return Err(PostError::DuplicateKey(post.key.clone()));
            }
        }

        Ok(Self {
            root: root.to_path_buf(),
            posts,
            by_key,
        })
    }

    /// Directory the posts were loaded from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, key: &str) -> Option<&Arc<Post>> {
        self.by_key.get(key).map(|&i| &self.posts[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Post>> {
        self.posts.iter()
    }

    pub fn posts(&self) -> &[Arc<Post>] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Dated posts before undated ones, later dates first, then by key.
fn newest_first(a: &Post, b: &Post) -> std::cmp::Ordering {
    match (&a.meta.date, &b.meta.date) {
        (Some(x), Some(y)) => y.cmp(x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    }
    .then_with(|| a.key.cmp(&b.key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_post(root: &Path, key: &str, front: &str) {
        let dir = root.join(key);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(INDEX_FILE), format!("---\n{front}\n---\nbody of {key}\n")).unwrap();
    }

    fn keys(posts: &PostCollection) -> Vec<&str> {
        posts.iter().map(|p| p.key.as_str()).collect()
    }

    #[test]
    fn test_load_sorted_newest_first() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "old", "title: Old\ndate: 2023-01-01");
        write_post(dir.path(), "new", "title: New\ndate: 2024-06-01");
        write_post(dir.path(), "undated", "title: Undated");
        write_post(dir.path(), "also-new", "title: Also\ndate: 2024-06-01");

        let posts = PostCollection::load(dir.path(), false).unwrap();
        assert_eq!(keys(&posts), ["also-new", "new", "old", "undated"]);
    }

    #[test]
    fn test_load_ignores_other_entries() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "post", "title: Post");
        fs::create_dir_all(dir.path().join("empty")).unwrap();
        fs::write(dir.path().join("README.md"), "not a post").unwrap();

        let posts = PostCollection::load(dir.path(), false).unwrap();
        assert_eq!(keys(&posts), ["post"]);
    }

    #[test]
    fn test_skip_drafts() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "published", "title: P");
        write_post(dir.path(), "wip", "title: W\ndraft: true");

        assert_eq!(PostCollection::load(dir.path(), false).unwrap().len(), 2);
        let posts = PostCollection::load(dir.path(), true).unwrap();
        assert_eq!(keys(&posts), ["published"]);
        assert!(posts.get("wip").is_none());
    }

    #[test]
    fn test_get_by_key() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "first", "title: First");

        let posts = PostCollection::load(dir.path(), false).unwrap();
        assert_eq!(posts.get("first").unwrap().title(), "First");
        assert!(posts.get("missing").is_none());
        assert_eq!(posts.root(), dir.path());
    }

    #[test]
    fn test_bad_post_fails_load() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "good", "title: Good");
        write_post(dir.path(), "bad", "title: [broken");

        assert!(matches!(
            PostCollection::load(dir.path(), false),
            Err(PostError::Yaml(..))
        ));
    }

    #[test]
    fn test_missing_dir() {
        let dir = TempDir::new().unwrap();
        let err = PostCollection::load(&dir.path().join("posts"), false).unwrap_err();
        assert!(matches!(err, PostError::MissingDir(_)));
    }

    #[test]
    fn test_duplicate_key() {
        let post = |key: &str| Post {
            key: key.to_string(),
            meta: Default::default(),
            markdown: String::new(),
            dir: PathBuf::new(),
        };
        let err = PostCollection::from_posts(Path::new("."), [post("a"), post("a")]).unwrap_err();
        assert!(matches!(err, PostError::DuplicateKey(k) if k == "a"));
    }
}
