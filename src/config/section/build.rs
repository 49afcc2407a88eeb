//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "posts"           # One directory per post (relative to site root)
//! output = "public"           # Static export target (relative to site root)
//! skip_drafts = true          # Leave out posts with `draft: true`
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Build settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Posts directory.
    pub content: PathBuf,

    /// Output directory for `folio build`.
    pub output: PathBuf,

    /// Skip draft posts.
    pub skip_drafts: bool,

    /// Remove the output directory before building.
    #[serde(skip)]
    pub clean: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content: "posts".into(),
            output: "public".into(),
            skip_drafts: false,
            clean: false,
        }
    }
}

impl BuildConfig {
    pub const CONTENT: FieldPath = FieldPath::new("build.content");
    pub const OUTPUT: FieldPath = FieldPath::new("build.output");

    /// Check paths once they are absolute.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.content == self.output {
            diag.error(Self::OUTPUT, "output directory must differ from the content directory");
        } else if self.content.starts_with(&self.output) {
            diag.error(Self::OUTPUT, "output directory must not contain the content directory");
        }
    }

    /// Content directory must exist for commands that read posts.
    pub fn validate_content_exists(&self, diag: &mut ConfigDiagnostics) {
        if !self.content.is_dir() {
            diag.error_with_hint(
                Self::CONTENT,
                format!("posts directory `{}` not found", self.content.display()),
                "create it, or point `build.content` (or --content) at your posts",
            );
        }
    }
}
