//! Highlighting color schemes.
//!
//! A [`StyleSheet`] wraps a syntect theme. Highlighted blocks are written
//! with class names, so the sheet is used twice: once to color the block
//! wrapper inline and once to produce the site stylesheet (`/highlight.css`).

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use syntect::highlighting::{Color, Theme, ThemeSet};
use syntect::html::{ClassStyle, css_for_theme_with_class_style};
use thiserror::Error;

/// Built-in theme used when no style sheet is configured.
pub const DEFAULT_LIGHT: &str = "InspiredGitHub";

static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("unknown highlight theme `{name}` (available: {available})")]
    UnknownTheme { name: String, available: String },

    #[error("failed to load theme {}", path.display())]
    LoadTheme {
        path: PathBuf,
        #[source]
        source: syntect::LoadingError,
    },

    #[error("failed to generate stylesheet for theme `{0}`")]
    Css(String, #[source] syntect::Error),
}

/// A named color scheme for highlighted code.
#[derive(Clone)]
pub struct StyleSheet {
    name: Arc<str>,
    theme: Arc<Theme>,
}

impl StyleSheet {
    /// The built-in light scheme.
    pub fn default_light() -> Self {
        // Bundled with syntect's default theme dump
        Self::builtin(DEFAULT_LIGHT).unwrap_or_else(|_| Self::new(DEFAULT_LIGHT, Theme::default()))
    }

    pub fn new(name: &str, theme: Theme) -> Self {
        Self {
            name: Arc::from(name),
            theme: Arc::new(theme),
        }
    }

    /// One of syntect's bundled themes, by name.
    pub fn builtin(name: &str) -> Result<Self, HighlightError> {
        match THEMES.themes.get(name) {
            Some(theme) => Ok(Self::new(name, theme.clone())),
            None => Err(HighlightError::UnknownTheme {
                name: name.to_string(),
                available: builtin_names().join(", "),
            }),
        }
    }

    /// Load a `.tmTheme` file.
    pub fn from_file(path: &Path) -> Result<Self, HighlightError> {
        let theme = ThemeSet::get_theme(path).map_err(|source| HighlightError::LoadTheme {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(&name, theme))
    }

    /// Resolve a configured theme: a path ending in `.tmTheme` (relative to
    /// `root`) or a built-in theme name.
    pub fn resolve(theme: &str, root: &Path) -> Result<Self, HighlightError> {
        let is_file = Path::new(theme)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("tmTheme"));
        if is_file {
            Self::from_file(&root.join(theme))
        } else {
            Self::builtin(theme)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Default text color as `#rrggbb`.
    pub fn foreground(&self) -> String {
        hex(self.theme.settings.foreground.unwrap_or(Color::BLACK))
    }

    /// Block background color as `#rrggbb`.
    pub fn background(&self) -> String {
        hex(self.theme.settings.background.unwrap_or(Color::WHITE))
    }

    /// Stylesheet for the classes emitted by the highlighter, plus the
    /// `.editor-colors` wrapper rule.
    pub fn css(&self) -> Result<String, HighlightError> {
        let classes = css_for_theme_with_class_style(&self.theme, ClassStyle::Spaced)
            .map_err(|e| HighlightError::Css(self.name.to_string(), e))?;
        Ok(format!(
            ".editor-colors {{\n  color: {};\n  background-color: {};\n}}\n{classes}",
            self.foreground(),
            self.background()
        ))
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::default_light()
    }
}

impl fmt::Debug for StyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleSheet").field("name", &self.name).finish()
    }
}

/// Names of syntect's bundled themes, sorted.
pub fn builtin_names() -> Vec<&'static str> {
    THEMES.themes.keys().map(String::as_str).collect()
}

fn hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_light() {
        let style = StyleSheet::default_light();
        assert_eq!(style.name(), DEFAULT_LIGHT);
        assert!(style.foreground().starts_with('#'));
        assert_eq!(style.background().len(), 7);
    }

    #[test]
    fn test_unknown_builtin() {
        let err = StyleSheet::builtin("no-such-theme").unwrap_err();
        assert!(err.to_string().contains("InspiredGitHub"));
    }

    #[test]
    fn test_resolve_builtin_name() {
        let style = StyleSheet::resolve("Solarized (light)", Path::new(".")).unwrap();
        assert_eq!(style.name(), "Solarized (light)");
    }

    #[test]
    fn test_resolve_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = StyleSheet::resolve("custom.tmTheme", dir.path()).unwrap_err();
        assert!(matches!(err, HighlightError::LoadTheme { .. }));
    }

    #[test]
    fn test_css_has_wrapper_rule() {
        let css = StyleSheet::default_light().css().unwrap();
        assert!(css.starts_with(".editor-colors {"));
        assert!(css.matches('{').count() > 1);
    }
}
