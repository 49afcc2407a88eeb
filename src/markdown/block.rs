//! Code block nodes handed to code block renderers.

use pulldown_cmark::CowStr;

use super::attributes::HtmlAttributes;

/// A window onto a text buffer: one line of a code block, without its line
/// terminator.
///
/// The buffer is usually borrowed straight from the Markdown source. It may be
/// absent for lines produced by an incomplete upstream step; such lines carry
/// no text and are skipped by readers.
#[derive(Debug, Clone)]
pub struct LineSlice<'a> {
    text: Option<CowStr<'a>>,
    start: usize,
    len: usize,
}

impl<'a> LineSlice<'a> {
    pub fn new(text: CowStr<'a>, start: usize, len: usize) -> Self {
        Self {
            text: Some(text),
            start,
            len,
        }
    }

    /// A slice covering all of `text`.
    pub fn whole(text: impl Into<CowStr<'a>>) -> Self {
        let text = text.into();
        let len = text.len();
        Self::new(text, 0, len)
    }

    /// A slice with no underlying buffer.
    pub const fn detached() -> Self {
        Self {
            text: None,
            start: 0,
            len: 0,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The line's text, or `None` when the buffer is absent or the window
    /// does not fall on character boundaries inside it.
    pub fn as_str(&self) -> Option<&str> {
        let text = self.text.as_deref()?;
        text.get(self.start..self.start + self.len)
    }
}

/// How a code block was written in the source.
#[derive(Debug, Clone)]
pub enum CodeBlockKind<'a> {
    /// Delimited by backtick or tilde fences; `info` is the text after the
    /// opening fence (fence attributes already removed).
    Fenced { info: CowStr<'a> },
    /// Indented by four spaces; never has an info string.
    Indented,
}

/// A code block as seen by [`CodeBlockRenderer`](super::CodeBlockRenderer)s.
#[derive(Debug, Clone)]
pub struct CodeBlock<'a> {
    pub kind: CodeBlockKind<'a>,
    pub lines: Vec<LineSlice<'a>>,
    pub attributes: HtmlAttributes,
}

impl<'a> CodeBlock<'a> {
    pub fn fenced(info: impl Into<CowStr<'a>>, lines: Vec<LineSlice<'a>>) -> Self {
        Self {
            kind: CodeBlockKind::Fenced { info: info.into() },
            lines,
            attributes: HtmlAttributes::new(),
        }
    }

    pub fn indented(lines: Vec<LineSlice<'a>>) -> Self {
        Self {
            kind: CodeBlockKind::Indented,
            lines,
            attributes: HtmlAttributes::new(),
        }
    }

    /// Full info string of a fenced block.
    pub fn info(&self) -> Option<&str> {
        match &self.kind {
            CodeBlockKind::Fenced { info } => Some(&**info),
            CodeBlockKind::Indented => None,
        }
    }

    /// First word of the info string (empty for bare fences and indented
    /// blocks).
    pub fn info_word(&self) -> &str {
        self.info()
            .and_then(|info| info.split(|c: char| c.is_ascii_whitespace()).next())
            .unwrap_or_default()
    }

    /// Text of every line that has one, in order.
    pub fn line_texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(LineSlice::as_str)
    }
}
