//! Code → highlighted HTML.

use std::sync::LazyLock;

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use super::language::Language;
use super::style::StyleSheet;
use crate::markdown::RenderError;

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// Turns source text in a known language into an HTML fragment.
pub trait Formatter: Send + Sync {
    fn format(
        &self,
        language: Language,
        code: &str,
        style: &StyleSheet,
    ) -> Result<String, RenderError>;
}

/// Class-based formatter backed by syntect's bundled grammars.
///
/// Output is a `<div>` carrying the sheet's foreground and background inline
/// around a `<pre>` of `<span class="..">` tokens; token colors come from
/// [`StyleSheet::css`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntectFormatter;

impl SyntectFormatter {
    /// Whether the bundled grammars include `language`.
    pub fn supports(language: Language) -> bool {
        SYNTAXES.find_syntax_by_name(language.syntax_name()).is_some()
    }
}

impl Formatter for SyntectFormatter {
    fn format(
        &self,
        language: Language,
        code: &str,
        style: &StyleSheet,
    ) -> Result<String, RenderError> {
        let syntax = SYNTAXES
            .find_syntax_by_name(language.syntax_name())
            .ok_or(RenderError::MissingSyntax(language.id()))?;

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAXES, ClassStyle::Spaced);
        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|source| RenderError::Highlight {
                    language: language.id(),
                    source,
                })?;
        }

        Ok(format!(
            "<div style=\"color:{};background-color:{};\"><pre>{}</pre></div>",
            style.foreground(),
            style.background(),
            generator.finalize()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_wraps_in_colored_div() {
        let style = StyleSheet::default_light();
        let html = SyntectFormatter
            .format(Language::Rust, "fn main() {}", &style)
            .unwrap();
        assert!(html.starts_with(&format!(
            "<div style=\"color:{};background-color:{};\"><pre>",
            style.foreground(),
            style.background()
        )));
        assert!(html.ends_with("</pre></div>"));
        assert!(html.contains("<span class="));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_format_escapes_text() {
        let html = SyntectFormatter
            .format(Language::Rust, "let s = \"<b>\";", &StyleSheet::default_light())
            .unwrap();
        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_common_languages_supported() {
        for language in [
            Language::Rust,
            Language::Python,
            Language::JavaScript,
            Language::CSharp,
            Language::Json,
            Language::Bash,
            Language::Yaml,
        ] {
            assert!(SyntectFormatter::supports(language), "{}", language.id());
        }
    }
}
