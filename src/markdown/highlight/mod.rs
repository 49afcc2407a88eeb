//! Syntax highlighting for fenced code blocks.
//!
//! [`install`] swaps a pipeline's code block renderer for a
//! [`SyntaxHighlightingCodeBlockRenderer`], keeping the previous renderer as
//! the fallback for blocks without a language.

mod extract;
mod formatter;
mod language;
mod renderer;
mod style;

use renderer::SyntaxHighlightingCodeBlockRenderer;
pub use style::{HighlightError, StyleSheet, builtin_names};

use super::pipeline::PipelineBuilder;

/// Register the highlighting renderer on `builder`. Uses the built-in light
/// scheme when `style` is `None`.
///
/// Installing twice wraps the first highlighter as the second one's fallback.
pub fn install(builder: &mut PipelineBuilder, style: Option<StyleSheet>) {
    let style = style.unwrap_or_else(StyleSheet::default_light);
    let info_prefix = builder.options().info_prefix.clone();
    builder.replace_code_block_renderer(move |fallback| {
        Box::new(SyntaxHighlightingCodeBlockRenderer::new(
            fallback,
            style,
            info_prefix,
        ))
    });
}
