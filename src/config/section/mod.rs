//! Configuration section definitions.
//!
//! Each module corresponds to a section in `folio.toml`:
//!
//! | Module      | TOML Section  | Purpose                            |
//! |-------------|---------------|------------------------------------|
//! | `build`     | `[build]`     | Content/output paths, drafts       |
//! | `highlight` | `[highlight]` | Code block highlighting and theme  |
//! | `serve`     | `[serve]`     | HTTP server                        |
//! | `site`      | `[site]`      | Site title, author, description    |
//!
//! `[markdown]` is [`MarkdownOptions`](crate::markdown::MarkdownOptions).

mod build;
mod highlight;
mod serve;
mod site;

pub use build::BuildConfig;
pub use highlight::HighlightConfig;
pub use serve::ServeConfig;
pub use site::SiteSectionConfig;
