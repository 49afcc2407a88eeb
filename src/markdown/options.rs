//! `[markdown]` options: parser extensions and code fence handling.
//!
//! # Example
//!
//! ```toml
//! [markdown]
//! tables = true
//! footnotes = true
//! smart_punctuation = false
//! fence_attributes = true     # ```rust {#id .class}
//! info_prefix = "language-"   # stripped from fence info before highlighting
//! ```

use pulldown_cmark::Options;
use serde::{Deserialize, Serialize};

/// Options for markdown rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
    /// Enable heading attributes extension (e.g., `# Heading {#custom-id}`)
    pub heading_attributes: bool,
    /// Enable smart quotes and dashes
    pub smart_punctuation: bool,
    /// Parse a trailing `{#id .class key=value}` on fence info strings
    pub fence_attributes: bool,
    /// Prefix of fence info strings naming a language (`language-rust`).
    /// Also used for the class written by the default code block renderer.
    pub info_prefix: String,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            heading_attributes: true,
            smart_punctuation: false,
            fence_attributes: true,
            info_prefix: "language-".to_string(),
        }
    }
}

impl MarkdownOptions {
    /// Plain CommonMark: every extension disabled.
    pub fn commonmark() -> Self {
        Self {
            tables: false,
            footnotes: false,
            strikethrough: false,
            task_lists: false,
            heading_attributes: false,
            smart_punctuation: false,
            fence_attributes: false,
            info_prefix: "language-".to_string(),
        }
    }

    /// Convert to pulldown-cmark Options
    pub fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        if self.heading_attributes {
            opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        if self.smart_punctuation {
            opts.insert(Options::ENABLE_SMART_PUNCTUATION);
        }
        opts
    }
}
