//! Reading a post directory's `index.md`.
//!
//! ```text
//! posts/
//! └── hello-world/          ← key: "hello-world"
//!     ├── index.md          ← front matter + Markdown body
//!     └── diagram.png       ← served at /posts/hello-world/diagram.png
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::meta::PostMeta;

/// File name of a post's source inside its directory.
pub const INDEX_FILE: &str = "index.md";

#[derive(Debug, Error)]
pub enum PostError {
    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{0}` is not inside a post directory")]
    NoKey(PathBuf),

    #[error("invalid YAML front matter in `{0}`")]
    Yaml(PathBuf, #[source] serde_yaml::Error),

    #[error("invalid TOML front matter in `{0}`")]
    Toml(PathBuf, #[source] toml::de::Error),

    #[error("front matter in `{0}` is never closed")]
    Unterminated(PathBuf),

    #[error("posts directory `{0}` does not exist")]
    MissingDir(PathBuf),

    #[error("duplicate post key `{0}`")]
    DuplicateKey(String),
}

/// A post: its key, metadata and unrendered Markdown body.
#[derive(Debug, Clone)]
pub struct Post {
    /// Name of the post's directory; also its URL slug.
    pub key: String,
    pub meta: PostMeta,
    pub markdown: String,
    /// Directory holding `index.md` and the post's assets.
    pub dir: PathBuf,
}

impl Post {
    /// Title from front matter, or the key when none is given.
    pub fn title(&self) -> &str {
        self.meta
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.key)
    }

    pub fn is_draft(&self) -> bool {
        self.meta.draft
    }

    /// Site-relative URL of the post page.
    pub fn url(&self) -> String {
        format!("/posts/{}", self.key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatterFormat {
    /// `---` fences
    Yaml,
    /// `+++` fences
    Toml,
}

impl FrontMatterFormat {
    const fn fence(self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }

    /// Whether `line` closes a block opened with this format's fence.
    fn closes(self, line: &str) -> bool {
        line == self.fence() || (self == Self::Yaml && line == "...")
    }
}

/// Front matter located at the top of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontMatter<'a> {
    pub format: FrontMatterFormat,
    pub raw: &'a str,
    pub body: &'a str,
}

/// Result of looking for front matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split<'a> {
    Found(FrontMatter<'a>),
    /// Opening fence without a closing one.
    Unterminated(FrontMatterFormat),
    /// Plain Markdown.
    None,
}

/// Split `---` (YAML) or `+++` (TOML) front matter from the document body.
///
/// The opening fence must be the document's first non-blank line and stand
/// on its own; YAML blocks may also close with `...`.
pub fn split_front_matter(content: &str) -> Split<'_> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let trimmed = content.trim_start_matches(['\r', '\n']);

    let format = if trimmed.starts_with(FrontMatterFormat::Yaml.fence()) {
        FrontMatterFormat::Yaml
    } else if trimmed.starts_with(FrontMatterFormat::Toml.fence()) {
        FrontMatterFormat::Toml
    } else {
        return Split::None;
    };

    let after_fence = &trimmed[3..];
    let Some(rest) = after_fence
        .strip_prefix("\r\n")
        .or_else(|| after_fence.strip_prefix('\n'))
    else {
        return Split::None;
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if format.closes(line.trim_end()) {
            let body = &rest[offset + line.len()..];
            return Split::Found(FrontMatter {
                format,
                raw: &rest[..offset],
                body: body.trim_start_matches(['\r', '\n']),
            });
        }
        offset += line.len();
    }

    Split::Unterminated(format)
}

/// Reads posts from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostReader;

impl PostReader {
    /// Read `path` (a post's `index.md`). The key is the name of the
    /// directory containing it.
    pub fn read(&self, path: &Path) -> Result<Post, PostError> {
        let dir = path
            .parent()
            .ok_or_else(|| PostError::NoKey(path.to_path_buf()))?;
        let key = dir
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| PostError::NoKey(path.to_path_buf()))?
            .to_string();

        let content =
            fs::read_to_string(path).map_err(|err| PostError::Io(path.to_path_buf(), err))?;
        let (meta, markdown) = self.parse(path, &content)?;

        Ok(Post {
            key,
            meta,
            markdown: markdown.to_string(),
            dir: dir.to_path_buf(),
        })
    }

    /// Parse front matter and body. `path` is only used in errors.
    pub fn parse<'a>(&self, path: &Path, content: &'a str) -> Result<(PostMeta, &'a str), PostError> {
        match split_front_matter(content) {
            Split::Found(FrontMatter {
                format: FrontMatterFormat::Yaml,
                raw,
                body,
            }) => {
                let meta = PostMeta::from_yaml(raw)
                    .map_err(|err| PostError::Yaml(path.to_path_buf(), err))?;
                Ok((meta, body))
            }
            Split::Found(FrontMatter {
                format: FrontMatterFormat::Toml,
                raw,
                body,
            }) => {
                let meta = PostMeta::from_toml(raw)
                    .map_err(|err| PostError::Toml(path.to_path_buf(), err))?;
                Ok((meta, body))
            }
            Split::Unterminated(_) => Err(PostError::Unterminated(path.to_path_buf())),
            Split::None => Ok((PostMeta::default(), content)),
        }
    }
}
