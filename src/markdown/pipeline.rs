//! Markdown to HTML pipeline with a pluggable code block renderer.
//!
//! `pulldown-cmark` produces the event stream and writes the final HTML. The
//! pipeline sits between the two: every code block (its start tag, text
//! events and end tag) is gathered into a [`CodeBlock`] node and handed to the
//! registered [`CodeBlockRenderer`], whose output is spliced back into the
//! stream as raw HTML. All other events pass through untouched.

use std::sync::Arc;

use pulldown_cmark::{CowStr, Event, Parser, Tag, TagEnd, html};
use thiserror::Error;

use super::attributes::HtmlAttributes;
use super::block::{CodeBlock, CodeBlockKind, LineSlice};
use super::highlight::{self, StyleSheet};
use super::options::MarkdownOptions;
use crate::utils::html::escape_body;

/// Errors surfaced while rendering a document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("highlighter has no syntax for `{0}`")]
    MissingSyntax(&'static str),

    #[error("failed to highlight `{language}` code block")]
    Highlight {
        language: &'static str,
        #[source]
        source: syntect::Error,
    },

    #[error("failed to write html")]
    Fmt(#[from] std::fmt::Error),
}

/// Hook rendering one code block to HTML.
///
/// Renderers may adjust `block.attributes` before writing; the block is
/// dropped once rendered.
pub trait CodeBlockRenderer: Send + Sync {
    fn render(&self, out: &mut String, block: &mut CodeBlock<'_>) -> Result<(), RenderError>;
}

/// Plain `<pre><code>` output, identical to what `pulldown-cmark` writes for
/// a code block, plus any attributes attached upstream.
#[derive(Debug, Clone)]
pub struct DefaultCodeBlockRenderer {
    info_prefix: String,
}

impl DefaultCodeBlockRenderer {
    pub fn new(info_prefix: impl Into<String>) -> Self {
        Self {
            info_prefix: info_prefix.into(),
        }
    }
}

impl CodeBlockRenderer for DefaultCodeBlockRenderer {
    fn render(&self, out: &mut String, block: &mut CodeBlock<'_>) -> Result<(), RenderError> {
        let mut attributes = HtmlAttributes::new();
        let word = block.info_word();
        if !word.is_empty() {
            attributes.add_class(format!("{}{}", self.info_prefix, word));
        }
        attributes.merge(block.attributes.clone());

        out.push_str("<pre><code");
        attributes.write_to(out)?;
        out.push('>');
        for line in block.line_texts() {
            out.push_str(&escape_body(line));
            out.push('\n');
        }
        out.push_str("</code></pre>\n");
        Ok(())
    }
}

/// Configures a [`Pipeline`].
pub struct PipelineBuilder {
    options: MarkdownOptions,
    code_block_renderer: Box<dyn CodeBlockRenderer>,
}

impl PipelineBuilder {
    pub fn new(options: MarkdownOptions) -> Self {
        let code_block_renderer = Box::new(DefaultCodeBlockRenderer::new(&options.info_prefix));
        Self {
            options,
            code_block_renderer,
        }
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    /// Swap the code block renderer. `wrap` receives the current renderer so
    /// the replacement can fall back to it.
    pub fn replace_code_block_renderer<F>(&mut self, wrap: F)
    where
        F: FnOnce(Box<dyn CodeBlockRenderer>) -> Box<dyn CodeBlockRenderer>,
    {
        let placeholder = Box::new(DefaultCodeBlockRenderer::new(&self.options.info_prefix));
        let current = std::mem::replace(&mut self.code_block_renderer, placeholder);
        self.code_block_renderer = wrap(current);
    }

    /// Highlight fenced code blocks with `style` (built-in light theme when
    /// `None`).
    pub fn use_syntax_highlighting(mut self, style: Option<StyleSheet>) -> Self {
        highlight::install(&mut self, style);
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline {
            options: self.options,
            code_block_renderer: Arc::from(self.code_block_renderer),
        }
    }
}

/// A configured Markdown renderer. Cheap to clone and safe to share between
/// threads; each call to [`render`](Self::render) owns its own state.
#[derive(Clone)]
pub struct Pipeline {
    options: MarkdownOptions,
    code_block_renderer: Arc<dyn CodeBlockRenderer>,
}

impl Pipeline {
    pub fn builder(options: MarkdownOptions) -> PipelineBuilder {
        PipelineBuilder::new(options)
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    /// Render a Markdown document to an HTML fragment.
    pub fn render(&self, markdown: &str) -> Result<String, RenderError> {
        self.render_with_links(markdown, |_| None)
    }

    /// Render, passing every link and image destination through
    /// `rewrite_link`. `None` keeps the destination as written.
    pub fn render_with_links<F>(&self, markdown: &str, rewrite_link: F) -> Result<String, RenderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parser = Parser::new_ext(markdown, self.options.to_pulldown_options())
            .map(|event| rewrite_destination(event, &rewrite_link));
        let events = self.hook_code_blocks(parser)?;

        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html, events.into_iter());
        Ok(html)
    }

    /// Replace every code block's events with the registered renderer's HTML.
    fn hook_code_blocks<'a>(
        &self,
        events: impl Iterator<Item = Event<'a>>,
    ) -> Result<Vec<Event<'a>>, RenderError> {
        let mut out = Vec::new();
        let mut open: Option<OpenCodeBlock<'a>> = None;

        for event in events {
            if let Some(pending) = open.as_mut() {
                match event {
                    Event::Text(text) => pending.push_text(text),
                    Event::End(TagEnd::CodeBlock) => {
                        if let Some(pending) = open.take() {
                            let mut block = pending.finish();
                            let mut fragment = String::new();
                            self.code_block_renderer.render(&mut fragment, &mut block)?;
                            out.push(Event::Html(fragment.into()));
                        }
                    }
                    // Code blocks only carry text
                    other => out.push(other),
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    open = Some(OpenCodeBlock::new(kind, &self.options));
                }
                other => out.push(other),
            }
        }

        Ok(out)
    }
}

/// A code block whose text events are still being collected.
struct OpenCodeBlock<'a> {
    kind: CodeBlockKind<'a>,
    attributes: HtmlAttributes,
    lines: Vec<LineSlice<'a>>,
    /// Text of a line split across several events.
    partial: Option<String>,
}

impl<'a> OpenCodeBlock<'a> {
    fn new(kind: pulldown_cmark::CodeBlockKind<'a>, options: &MarkdownOptions) -> Self {
        let (kind, attributes) = match kind {
            pulldown_cmark::CodeBlockKind::Fenced(info) if options.fence_attributes => {
                let (info, attributes) = split_fence_attributes(info);
                (CodeBlockKind::Fenced { info }, attributes)
            }
            pulldown_cmark::CodeBlockKind::Fenced(info) => {
                (CodeBlockKind::Fenced { info }, HtmlAttributes::new())
            }
            pulldown_cmark::CodeBlockKind::Indented => {
                (CodeBlockKind::Indented, HtmlAttributes::new())
            }
        };

        Self {
            kind,
            attributes,
            lines: Vec::new(),
            partial: None,
        }
    }

    /// Split a text event into lines. Borrowed text stays borrowed: each line
    /// becomes a window onto the source.
    fn push_text(&mut self, text: CowStr<'a>) {
        match text {
            CowStr::Borrowed(source) => {
                let mut offset = 0;
                for piece in source.split_inclusive('\n') {
                    let (content, terminated) = strip_line_ending(piece);
                    if terminated && self.partial.is_none() {
                        self.lines.push(LineSlice::new(
                            CowStr::Borrowed(source),
                            offset,
                            content.len(),
                        ));
                    } else {
                        self.push_piece(content, terminated);
                    }
                    offset += piece.len();
                }
            }
            owned => {
                for piece in owned.split_inclusive('\n') {
                    let (content, terminated) = strip_line_ending(piece);
                    self.push_piece(content, terminated);
                }
            }
        }
    }

    /// Append text that cannot be referenced in place.
    fn push_piece(&mut self, content: &str, terminated: bool) {
        let line = self.partial.get_or_insert_with(String::new);
        line.push_str(content);
        if terminated && let Some(line) = self.partial.take() {
            self.lines.push(LineSlice::whole(line));
        }
    }

    fn finish(mut self) -> CodeBlock<'a> {
        if let Some(line) = self.partial.take() {
            self.lines.push(LineSlice::whole(line));
        }
        CodeBlock {
            kind: self.kind,
            lines: self.lines,
            attributes: self.attributes,
        }
    }
}

fn rewrite_destination<'a, F>(event: Event<'a>, rewrite_link: &F) -> Event<'a>
where
    F: Fn(&str) -> Option<String>,
{
    match event {
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: rewrite_link(&dest_url).map_or(dest_url, CowStr::from),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: rewrite_link(&dest_url).map_or(dest_url, CowStr::from),
            title,
            id,
        }),
        other => other,
    }
}

/// Strip `\n` (and a preceding `\r`) from a line, reporting whether one was
/// present.
fn strip_line_ending(piece: &str) -> (&str, bool) {
    match piece.strip_suffix('\n') {
        Some(line) => (line.strip_suffix('\r').unwrap_or(line), true),
        None => (piece, false),
    }
}

/// Split `rust {#id .class}` into `rust` and its attributes.
fn split_fence_attributes(info: CowStr<'_>) -> (CowStr<'_>, HtmlAttributes) {
    let parsed = {
        let trimmed = info.trim_end();
        match (trimmed.rfind('{'), trimmed.ends_with('}')) {
            (Some(open), true) => Some((
                trimmed[..open].trim_end().len(),
                HtmlAttributes::parse(&trimmed[open + 1..trimmed.len() - 1]),
            )),
            _ => None,
        }
    };

    let Some((len, attributes)) = parsed else {
        return (info, HtmlAttributes::new());
    };

    let info = match info {
        CowStr::Borrowed(s) => CowStr::Borrowed(&s[..len]),
        owned => CowStr::from(owned[..len].to_string()),
    };
    (info, attributes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Pipeline {
        Pipeline::builder(MarkdownOptions::default()).build()
    }

    /// Records what reached the hook instead of rendering it.
    struct Recorder;

    impl CodeBlockRenderer for Recorder {
        fn render(&self, out: &mut String, block: &mut CodeBlock<'_>) -> Result<(), RenderError> {
            let kind = match block.kind {
                CodeBlockKind::Fenced { .. } => "fenced",
                CodeBlockKind::Indented => "indented",
            };
            let lines: Vec<_> = block.line_texts().collect();
            let mut attrs = String::new();
            block.attributes.write_to(&mut attrs)?;
            out.push_str(&format!(
                "[{kind}|{}|{}|{attrs}]\n",
                block.info().unwrap_or("-"),
                lines.join("/")
            ));
            Ok(())
        }
    }

    fn recorded(markdown: &str) -> String {
        let mut builder = Pipeline::builder(MarkdownOptions::default());
        builder.replace_code_block_renderer(|_| Box::new(Recorder));
        builder.build().render(markdown).unwrap()
    }

    #[test]
    fn test_default_matches_pulldown() {
        let docs = [
            "```rust\nfn main() {}\n```\n",
            "# Title\n\n```\nplain <text> & more\n```\n\nafter\n",
            "para\n\n    indented\n    code\n",
            "```\n```\n",
        ];
        for doc in docs {
            let mut expected = String::new();
            let options = MarkdownOptions::default().to_pulldown_options();
            html::push_html(&mut expected, Parser::new_ext(doc, options));
            assert_eq!(plain().render(doc).unwrap(), expected, "document: {doc:?}");
        }
    }

    #[test]
    fn test_non_code_content_untouched() {
        let html = plain().render("Some *emphasis* and `code`.\n\n- a\n- b\n").unwrap();
        assert_eq!(
            html,
            "<p>Some <em>emphasis</em> and <code>code</code>.</p>\n<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_hook_sees_fenced_lines() {
        let html = recorded("```js\nconst a = 1;\nconst b = 2;\n```\n");
        assert_eq!(html, "[fenced|js|const a = 1;/const b = 2;|]\n");
    }

    #[test]
    fn test_hook_sees_indented_block() {
        let html = recorded("    line one\n    line two\n");
        assert_eq!(html, "[indented|-|line one/line two|]\n");
    }

    #[test]
    fn test_hook_called_in_document_order() {
        let html = recorded("```a\n1\n```\n\ntext\n\n```b\n2\n```\n");
        let first = html.find("[fenced|a|1|]").unwrap();
        let second = html.find("[fenced|b|2|]").unwrap();
        assert!(first < html.find("<p>text</p>").unwrap());
        assert!(html.find("<p>text</p>").unwrap() < second);
    }

    #[test]
    fn test_blank_lines_inside_block_kept() {
        let html = recorded("```txt\na\n\nb\n```\n");
        assert_eq!(html, "[fenced|txt|a//b|]\n");
    }

    #[test]
    fn test_fence_attributes() {
        let html = recorded("```rust {#main .wide data-lines=3}\nx\n```\n");
        assert_eq!(
            html,
            "[fenced|rust|x| id=\"main\" class=\"wide\" data-lines=\"3\"]\n"
        );
    }

    #[test]
    fn test_fence_attributes_disabled() {
        let mut builder = Pipeline::builder(MarkdownOptions::commonmark());
        builder.replace_code_block_renderer(|_| Box::new(Recorder));
        let html = builder.build().render("```rust {.wide}\nx\n```\n").unwrap();
        assert_eq!(html, "[fenced|rust {.wide}|x|]\n");
    }

    #[test]
    fn test_default_writes_upstream_attributes() {
        let html = plain().render("```rust {#main .wide}\nlet x;\n```\n").unwrap();
        assert_eq!(
            html,
            "<pre><code id=\"main\" class=\"language-rust wide\">let x;\n</code></pre>\n"
        );
    }

    #[test]
    fn test_replace_keeps_previous_as_fallback() {
        struct Upper(Box<dyn CodeBlockRenderer>);

        impl CodeBlockRenderer for Upper {
            fn render(
                &self,
                out: &mut String,
                block: &mut CodeBlock<'_>,
            ) -> Result<(), RenderError> {
                let mut inner = String::new();
                self.0.render(&mut inner, block)?;
                out.push_str(&inner.to_uppercase());
                Ok(())
            }
        }

        let mut builder = Pipeline::builder(MarkdownOptions::default());
        builder.replace_code_block_renderer(|previous| Box::new(Upper(previous)));
        let html = builder.build().render("```\nabc\n```\n").unwrap();
        assert_eq!(html, "<PRE><CODE>ABC\n</CODE></PRE>\n");
    }

    #[test]
    fn test_split_fence_attributes() {
        let (info, attrs) = split_fence_attributes(CowStr::Borrowed("csharp {.x}"));
        assert_eq!(&*info, "csharp");
        assert!(attrs.has_class("x"));

        let (info, attrs) = split_fence_attributes(CowStr::Borrowed("{#only}"));
        assert_eq!(&*info, "");
        assert_eq!(attrs.id(), Some("only"));

        let (info, attrs) = split_fence_attributes(CowStr::Borrowed("json"));
        assert_eq!(&*info, "json");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_link_rewriting() {
        let html = plain()
            .render_with_links("[a](a.md) ![b](b.png) [c](https://c.dev)", |link| {
                (!link.contains(':')).then(|| format!("/base/{link}"))
            })
            .unwrap();
        assert_eq!(
            html,
            "<p><a href=\"/base/a.md\">a</a> <img src=\"/base/b.png\" alt=\"b\" /> <a href=\"https://c.dev\">c</a></p>\n"
        );
    }

    #[test]
    fn test_pipeline_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pipeline>();
    }
}
