//! `folio list`: post metadata as JSON.

use anyhow::Result;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::post::{JsonMap, Post, PostCollection};

/// One post in the listing, with its key and url first.
#[derive(Debug, Serialize)]
pub struct PostSummary<'a> {
    pub key: &'a str,
    pub url: String,
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<&'a str>,
    pub tags: &'a [String],
    pub draft: bool,
    /// User-defined front matter fields
    #[serde(skip_serializing_if = "JsonMap::is_empty")]
    pub extra: &'a JsonMap,
}

impl<'a> From<&'a Post> for PostSummary<'a> {
    fn from(post: &'a Post) -> Self {
        let meta = &post.meta;
        Self {
            key: &post.key,
            url: post.url(),
            title: post.title(),
            date: meta.date.as_deref(),
            author: meta.author.as_deref(),
            summary: meta.summary.as_deref(),
            tags: &meta.tags,
            draft: meta.draft,
            extra: &meta.extra,
        }
    }
}

/// Print every post's metadata, newest first.
pub fn list_posts(config: &SiteConfig, pretty: bool) -> Result<()> {
    let posts = PostCollection::load(&config.build.content, config.build.skip_drafts)?;
    println!("{}", to_json(&posts, pretty)?);
    Ok(())
}

/// Serialize the collection as a JSON array.
pub fn to_json(posts: &PostCollection, pretty: bool) -> Result<String> {
    let summaries: Vec<PostSummary<'_>> = posts.iter().map(|post| post.as_ref().into()).collect();

    let formatted = if pretty {
        serde_json::to_string_pretty(&summaries)?
    } else {
        serde_json::to_string(&summaries)?
    };
    Ok(formatted)
}
