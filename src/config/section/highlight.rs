//! `[highlight]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [highlight]
//! enable = true
//! theme = "InspiredGitHub"    # built-in name, or a .tmTheme file (relative to site root)
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::markdown::highlight::{HighlightError, StyleSheet, builtin_names};

/// Syntax highlighting of fenced code blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Highlight fenced code blocks.
    pub enable: bool,

    /// Color theme; the built-in light theme when unset.
    pub theme: Option<String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: None,
        }
    }
}

impl HighlightConfig {
    pub const THEME: FieldPath = FieldPath::new("highlight.theme");

    /// Resolve the configured theme. `None` means the built-in default.
    pub fn style_sheet(&self, root: &Path) -> Result<Option<StyleSheet>, HighlightError> {
        self.theme
            .as_deref()
            .map(|theme| StyleSheet::resolve(theme, root))
            .transpose()
    }

    pub fn validate(&self, root: &Path, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }
        match self.style_sheet(root) {
            Ok(_) => {}
            Err(HighlightError::UnknownTheme { name, .. }) => diag.error_with_hint(
                Self::THEME,
                format!("unknown theme `{name}`"),
                format!("built-in themes: {}", builtin_names().join(", ")),
            ),
            Err(err) => diag.error(Self::THEME, err.to_string()),
        }
    }
}
