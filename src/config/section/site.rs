//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "My Blog"
//! author = "Alice"
//! description = "Notes on programming"
//! language = "en"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::FieldPath;

/// Site metadata shown on every page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site title.
    pub title: String,

    /// Author name, used when a post names none.
    pub author: String,

    /// Site description.
    pub description: String,

    /// Language code (e.g., "en", "zh-Hans").
    pub language: String,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            title: "Blog".into(),
            author: String::new(),
            description: String::new(),
            language: "en".into(),
        }
    }
}

impl SiteSectionConfig {
    pub const TITLE: FieldPath = FieldPath::new("site.title");
    pub const LANGUAGE: FieldPath = FieldPath::new("site.language");

    pub fn validate(&self, diag: &mut crate::config::ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.warn(Self::TITLE, "site title is empty");
        }
        if self.language.trim().is_empty() {
            diag.error_with_hint(Self::LANGUAGE, "language must not be empty", "use \"en\"");
        }
    }
}
