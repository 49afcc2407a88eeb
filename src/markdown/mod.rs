//! Markdown rendering.
//!
//! ```ignore
//! let pipeline = Pipeline::builder(MarkdownOptions::default())
//!     .use_syntax_highlighting(None)
//!     .build();
//! let html = pipeline.render("```rust\nfn main() {}\n```")?;
//! ```

mod attributes;
mod block;
pub mod highlight;
mod options;
mod pipeline;

pub use highlight::StyleSheet;
pub use options::MarkdownOptions;
pub use pipeline::{CodeBlockRenderer, Pipeline, RenderError};
