//! Syntax-highlighting code block renderer.

use super::extract::extract;
use super::formatter::{Formatter, SyntectFormatter};
use super::language;
use super::style::StyleSheet;
use crate::markdown::block::{CodeBlock, CodeBlockKind};
use crate::markdown::{CodeBlockRenderer, RenderError};

/// Class added to every block this renderer handles.
pub const EDITOR_COLORS_CLASS: &str = "editor-colors";

/// Prefix of the language class written on highlighted blocks.
pub const LANG_CLASS_PREFIX: &str = "lang-";

/// Class the Markdown parser puts on fenced code.
const UPSTREAM_CLASS_PREFIX: &str = "language-";

/// Renders fenced blocks with a language moniker as a highlighted
/// `<div class="lang-{moniker} editor-colors">`. Indented blocks and bare
/// fences go to the renderer that was registered before this one.
///
/// When the moniker names no known language the code is written as is,
/// without HTML escaping, so diagram blocks (`mermaid` and friends) reach
/// client-side renderers untouched.
pub struct SyntaxHighlightingCodeBlockRenderer {
    fallback: Box<dyn CodeBlockRenderer>,
    formatter: Box<dyn Formatter>,
    style: StyleSheet,
    info_prefix: String,
}

impl SyntaxHighlightingCodeBlockRenderer {
    pub fn new(
        fallback: Box<dyn CodeBlockRenderer>,
        style: StyleSheet,
        info_prefix: impl Into<String>,
    ) -> Self {
        Self::with_formatter(fallback, Box::new(SyntectFormatter), style, info_prefix)
    }

    pub fn with_formatter(
        fallback: Box<dyn CodeBlockRenderer>,
        formatter: Box<dyn Formatter>,
        style: StyleSheet,
        info_prefix: impl Into<String>,
    ) -> Self {
        Self {
            fallback,
            formatter,
            style,
            info_prefix: info_prefix.into(),
        }
    }

    /// Fence moniker with the info prefix removed, if any is left.
    fn moniker(&self, block: &CodeBlock<'_>) -> Option<String> {
        if matches!(block.kind, CodeBlockKind::Indented) {
            return None;
        }
        let word = block.info_word();
        let moniker = word.strip_prefix(self.info_prefix.as_str()).unwrap_or(word);
        (!moniker.is_empty()).then(|| moniker.to_string())
    }
}

impl CodeBlockRenderer for SyntaxHighlightingCodeBlockRenderer {
    fn render(&self, out: &mut String, block: &mut CodeBlock<'_>) -> Result<(), RenderError> {
        let Some(moniker) = self.moniker(block) else {
            return self.fallback.render(out, block);
        };

        let attributes = &mut block.attributes;
        attributes.add_class(format!("{LANG_CLASS_PREFIX}{moniker}"));
        attributes.remove_class(&format!("{UPSTREAM_CLASS_PREFIX}{moniker}"));
        if self.info_prefix != UPSTREAM_CLASS_PREFIX {
            attributes.remove_class(&format!("{}{moniker}", self.info_prefix));
        }
        attributes.add_class(EDITOR_COLORS_CLASS);

        let code = extract(&block.lines);
        let body = match language::resolve(&moniker, code.first_line) {
            Some(language) => self.formatter.format(language, &code.text, &self.style)?,
            None => {
                crate::debug!("highlight"; "no language for `{}`, writing block as is", moniker);
                code.text
            }
        };

        out.push_str("<div");
        block.attributes.write_to(out)?;
        out.push('>');
        out.push_str(&body);
        out.push_str("\n</div>\n");
        Ok(())
    }
}
