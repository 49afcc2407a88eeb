//! Embedded page templates.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `pages` - HTML page templates (layout, index, post, 404)
//!
//! # Usage
//!
//! ```ignore
//! use embed::pages::{LAYOUT_HTML, LayoutVars};
//!
//! let html = LAYOUT_HTML.render(&LayoutVars { title: "Hello", body: &body, ..vars });
//! ```
//!
//! Plain-text variables are escaped on injection; variables documented as
//! HTML are inserted verbatim.

mod template;

pub use template::{Template, TemplateVars};

pub mod pages {
    use super::{Template, TemplateVars};
    use crate::utils::html::{escape_attr, escape_body};

    /// Variables for layout.html.
    pub struct LayoutVars<'a> {
        pub lang: &'a str,
        /// Document `<title>`.
        pub title: &'a str,
        pub site_title: &'a str,
        pub description: &'a str,
        /// Extra `<head>` markup (HTML).
        pub head: &'a str,
        /// Page content (HTML).
        pub body: &'a str,
    }

    impl TemplateVars for LayoutVars<'_> {
        fn apply(&self, content: &str) -> String {
            // Body goes last so its text is never scanned for placeholders
            content
                .replace("__LANG__", &escape_attr(self.lang))
                .replace("__TITLE__", &escape_body(self.title))
                .replace("__SITE_TITLE__", &escape_body(self.site_title))
                .replace("__DESCRIPTION__", &escape_attr(self.description))
                .replace("__HEAD__", self.head)
                .replace("__BODY__", self.body)
        }
    }

    /// Shell shared by every page.
    pub const LAYOUT_HTML: Template<LayoutVars<'static>> =
        Template::new(include_str!("pages/layout.html"));

    /// Variables for index.html.
    pub struct IndexVars<'a> {
        pub site_title: &'a str,
        /// `<li>` entries (HTML).
        pub posts: &'a str,
    }

    impl TemplateVars for IndexVars<'_> {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__SITE_TITLE__", &escape_body(self.site_title))
                .replace("__POSTS__", self.posts)
        }
    }

    /// Post listing.
    pub const INDEX_HTML: Template<IndexVars<'static>> =
        Template::new(include_str!("pages/index.html"));

    /// Variables for post.html.
    pub struct PostVars<'a> {
        pub title: &'a str,
        /// Date/author line (HTML, may be empty).
        pub meta: &'a str,
        /// Rendered Markdown (HTML).
        pub content: &'a str,
    }

    impl TemplateVars for PostVars<'_> {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__TITLE__", &escape_body(self.title))
                .replace("__META__", self.meta)
                .replace("__CONTENT__", self.content)
        }
    }

    /// Single post.
    pub const POST_HTML: Template<PostVars<'static>> =
        Template::new(include_str!("pages/post.html"));

    /// Variables for 404.html.
    pub struct NotFoundVars<'a> {
        pub path: &'a str,
    }

    impl TemplateVars for NotFoundVars<'_> {
        fn apply(&self, content: &str) -> String {
            content.replace("__PATH__", &escape_body(self.path))
        }
    }

    /// Not-found page body.
    pub const NOT_FOUND_HTML: Template<NotFoundVars<'static>> =
        Template::new(include_str!("pages/404.html"));
}

#[cfg(test)]
mod tests {
    use super::pages::*;

    #[test]
    fn test_layout_escapes_text() {
        let html = LAYOUT_HTML.render(&LayoutVars {
            lang: "en",
            title: "A <b> title",
            site_title: "Blog",
            description: "say \"hi\"",
            head: "",
            body: "<p>__TITLE__</p>\n",
        });
        assert!(html.contains("<title>A &lt;b&gt; title</title>"));
        assert!(html.contains("content=\"say &quot;hi&quot;\""));
        // Body inserted verbatim, after all placeholders are filled
        assert!(html.contains("<p>__TITLE__</p>"));
        assert!(!html.contains("__HEAD__"));
    }

    #[test]
    fn test_post_template() {
        let html = POST_HTML.render(&PostVars {
            title: "Hello",
            meta: "",
            content: "<p>body</p>\n",
        });
        assert!(html.starts_with("<article>\n<h1>Hello</h1>\n"));
        assert!(html.contains("<div class=\"content\">\n<p>body</p>\n</div>"));
    }

    #[test]
    fn test_placeholders_declared() {
        assert_eq!(
            LAYOUT_HTML.placeholders(),
            ["LANG", "TITLE", "DESCRIPTION", "HEAD", "SITE_TITLE", "BODY"]
        );
        assert_eq!(INDEX_HTML.placeholders(), ["SITE_TITLE", "POSTS"]);
        assert_eq!(POST_HTML.placeholders(), ["TITLE", "META", "CONTENT"]);
        assert_eq!(NOT_FOUND_HTML.placeholders(), ["PATH"]);
    }

    #[test]
    fn test_not_found_template() {
        let html = NOT_FOUND_HTML.render(&NotFoundVars { path: "/<x>" });
        assert!(html.contains("<code>/&lt;x&gt;</code>"));
    }
}
