//! Blog posts: one directory per post, each with an `index.md`.

mod collection;
mod meta;
mod reader;
mod renderer;

pub use collection::PostCollection;
pub use meta::{JsonMap, PostMeta};
pub use reader::{INDEX_FILE, Post, Split, split_front_matter};
pub use renderer::PostRenderer;
