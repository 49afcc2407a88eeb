//! Page rendering shared by `serve` and `build`.
//!
//! Every page is a body template wrapped in the site layout:
//!
//! | Page             | URL               | Export path                  |
//! |------------------|-------------------|------------------------------|
//! | index            | `/`               | `index.html`                 |
//! | post             | `/posts/{key}`    | `posts/{key}/index.html`     |
//! | not found        | any other         | `404.html`                   |
//! | highlight styles | `/highlight.css`  | `highlight.css`              |

use crate::{
    config::SiteConfig,
    embed::pages::{
        INDEX_HTML, IndexVars, LAYOUT_HTML, LayoutVars, NOT_FOUND_HTML, NotFoundVars, POST_HTML,
        PostVars,
    },
    markdown::{Pipeline, StyleSheet},
    post::{Post, PostCollection, PostRenderer},
    utils::html::{escape_attr, escape_body},
};
use anyhow::{Context, Result};
use std::fmt::Write;
use std::sync::Arc;

/// URL of the generated highlight stylesheet.
pub const HIGHLIGHT_CSS_URL: &str = "/highlight.css";

/// Loaded posts plus everything needed to turn them into pages.
pub struct Site {
    config: Arc<SiteConfig>,
    posts: PostCollection,
    renderer: PostRenderer,
    /// Stylesheet for highlighted code (`None`: highlighting off).
    highlight_css: Option<String>,
}

impl Site {
    /// Read the posts directory and set up the Markdown pipeline.
    pub fn load(config: Arc<SiteConfig>) -> Result<Self> {
        let posts = PostCollection::load(&config.build.content, config.build.skip_drafts)?;
        Self::with_posts(config, posts)
    }

    /// Set up rendering for an already-loaded collection.
    pub fn with_posts(config: Arc<SiteConfig>, posts: PostCollection) -> Result<Self> {
        let style = config.style_sheet()?;

        let highlight_css = style
            .as_ref()
            .map(StyleSheet::css)
            .transpose()
            .context("failed to generate highlight CSS")?;

        let builder = Pipeline::builder(config.markdown.clone());
        let pipeline = match style {
            Some(style) => builder.use_syntax_highlighting(Some(style)),
            None => builder,
        }
        .build();

        Ok(Self {
            config,
            posts,
            renderer: PostRenderer::new(Arc::new(pipeline)),
            highlight_css,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn posts(&self) -> &PostCollection {
        &self.posts
    }

    pub fn highlight_css(&self) -> Option<&str> {
        self.highlight_css.as_deref()
    }

    /// The post listing.
    pub fn index_page(&self) -> String {
        let mut items = String::new();
        for post in self.posts.iter() {
            index_item(&mut items, post);
        }

        let site = &self.config.site;
        let body = INDEX_HTML.render(&IndexVars {
            site_title: &site.title,
            posts: &items,
        });
        self.layout(&site.title, &body)
    }

    /// A rendered post.
    pub fn post_page(&self, post: &Post) -> Result<String> {
        let content = self
            .renderer
            .render(post)
            .with_context(|| format!("failed to render post `{}`", post.key))?;

        let body = POST_HTML.render(&PostVars {
            title: post.title(),
            meta: &post_meta_line(post, &self.config.site.author),
            content: &content,
        });
        let title = format!("{} | {}", post.title(), self.config.site.title);
        Ok(self.layout(&title, &body))
    }

    /// Page for a URL nothing answers to.
    pub fn not_found_page(&self, path: &str) -> String {
        let body = NOT_FOUND_HTML.render(&NotFoundVars { path });
        self.layout("Not Found", &body)
    }

    fn layout(&self, title: &str, body: &str) -> String {
        let site = &self.config.site;
        let head = match self.highlight_css {
            Some(_) => format!("<link rel=\"stylesheet\" href=\"{HIGHLIGHT_CSS_URL}\">\n"),
            None => String::new(),
        };

        LAYOUT_HTML.render(&LayoutVars {
            lang: &site.language,
            title,
            site_title: &site.title,
            description: &site.description,
            head: &head,
            body,
        })
    }
}

/// `<li>` for one post on the index page.
fn index_item(out: &mut String, post: &Post) {
    let _ = write!(
        out,
        "<li><a href=\"{}\">{}</a>",
        escape_attr(&post.url()),
        escape_body(post.title())
    );
    if let Some(date) = &post.meta.date {
        let _ = write!(out, " {}", time_tag(date));
    }
    if let Some(summary) = &post.meta.summary {
        let _ = write!(out, "<p class=\"summary\">{}</p>", escape_body(summary));
    }
    out.push_str("</li>\n");
}

/// Date, author and tags under a post title. Empty when there are none.
fn post_meta_line(post: &Post, site_author: &str) -> String {
    let meta = &post.meta;
    let mut parts = Vec::new();
    if let Some(date) = &meta.date {
        parts.push(time_tag(date));
    }
    let author = meta
        .author
        .as_deref()
        .or_else(|| Some(site_author).filter(|a| !a.is_empty()));
    if let Some(author) = author {
        parts.push(format!("<span class=\"author\">{}</span>", escape_body(author)));
    }

    let mut out = String::new();
    if !parts.is_empty() {
        let _ = writeln!(out, "<p class=\"meta\">{}</p>", parts.join(" · "));
    }
    if !meta.tags.is_empty() {
        out.push_str("<ul class=\"tags\">");
        for tag in &meta.tags {
            let _ = write!(out, "<li>{}</li>", escape_body(tag));
        }
        out.push_str("</ul>\n");
    }
    out
}

fn time_tag(date: &str) -> String {
    format!(
        "<time datetime=\"{}\">{}</time>",
        escape_attr(date),
        escape_body(date)
    )
}
