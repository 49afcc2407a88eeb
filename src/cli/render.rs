//! `folio render`: one Markdown file to HTML on stdout.

use anyhow::{Context, Result, bail};
use std::io::{self, Read, Write};
use std::path::Path;

use crate::config::SiteConfig;
use crate::post::{Split, split_front_matter};

/// Render `file` (or stdin for `-`) and print the HTML.
pub fn render_file(config: &SiteConfig, file: &Path) -> Result<()> {
    let source = read_source(file)?;
    let html = render_source(config, &source)
        .with_context(|| format!("failed to render {}", file.display()))?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(html.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn read_source(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        return Ok(source);
    }
    std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
}

/// Render a document's body; front matter is dropped.
pub fn render_source(config: &SiteConfig, source: &str) -> Result<String> {
    let body = match split_front_matter(source) {
        Split::Found(front_matter) => front_matter.body,
        Split::Unterminated(_) => bail!("front matter is never closed"),
        Split::None => source,
    };
    Ok(config.pipeline()?.render(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.highlight.enable = false;
        config
    }

    #[test]
    fn test_strips_front_matter() {
        let html = render_source(&plain_config(), "---\ntitle: x\n---\n# Hi\n").unwrap();
        assert_eq!(html, "<h1>Hi</h1>\n");
    }

    #[test]
    fn test_without_highlighting() {
        let html = render_source(&plain_config(), "```rust\nfn f() {}\n```\n").unwrap();
        assert_eq!(
            html,
            "<pre><code class=\"language-rust\">fn f() {}\n</code></pre>\n"
        );
    }

    #[test]
    fn test_with_highlighting() {
        let html = render_source(&SiteConfig::default(), "```rust\nfn f() {}\n```\n").unwrap();
        assert!(html.starts_with("<div class=\"lang-rust editor-colors\"><div style="));
    }

    #[test]
    fn test_unterminated_front_matter() {
        assert!(render_source(&plain_config(), "+++\ntitle = 1\n").is_err());
    }
}
