//! Post body rendering.

use std::sync::Arc;

use crate::markdown::{Pipeline, RenderError};
use crate::utils::path::resolve_relative_link;

use super::reader::Post;

/// Renders post bodies with a shared pipeline.
///
/// Relative links and images are resolved against the post's URL, so
/// `![](diagram.png)` in `hello/index.md` points at
/// `/posts/hello/diagram.png`.
#[derive(Clone)]
pub struct PostRenderer {
    pipeline: Arc<Pipeline>,
}

impl PostRenderer {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn render(&self, post: &Post) -> Result<String, RenderError> {
        let base = post.url();
        self.pipeline
            .render_with_links(&post.markdown, |link| resolve_relative_link(&base, link))
    }
}
