//! Static export.
//!
//! Build phases:
//! - **Init** - Clean output if requested, load posts
//! - **Collect** - Gather each post's asset files
//! - **Render** - Parallel post rendering + asset copying
//! - **Finalize** - Index, 404 page, highlight stylesheet
//!
//! ```text
//! public/
//! ├── index.html
//! ├── 404.html
//! ├── highlight.css
//! └── posts/
//!     └── hello-world/
//!         ├── index.html
//!         └── diagram.png
//! ```

use crate::{
    cli::pages::Site,
    config::SiteConfig,
    core::is_shutdown,
    log,
    logger::ProgressLine,
    post::{INDEX_FILE, Post},
    utils::{path::fs::write_file, plural_count},
};
use anyhow::{Context, Result, anyhow};
use jwalk::WalkDir;
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
};

/// A file copied next to a post's page.
struct PostAsset {
    source: PathBuf,
    dest: PathBuf,
}

/// Export the whole site into `build.output`.
pub fn build_site(config: Arc<SiteConfig>, quiet: bool) -> Result<()> {
    let output = config.build.output.clone();
    init_output(&output, config.build.clean)?;

    let site = Site::load(config)?;
    let assets = collect_assets(&site, &output);

    let progress = (!quiet).then(|| {
        ProgressLine::new(&[("posts", site.posts().len()), ("assets", assets.len())])
    });

    let has_error = AtomicBool::new(false);
    let (posts_result, assets_result) = rayon::join(
        || render_posts(&site, &output, &has_error, progress.as_ref()),
        || copy_assets(&assets, &has_error, progress.as_ref()),
    );
    posts_result?;
    assets_result?;

    if let Some(p) = progress {
        p.finish();
    }

    finalize(&site, &output)?;

    if !quiet {
        log!(
            "build";
            "{} and {} written to {}",
            plural_count(site.posts().len(), "post"),
            plural_count(assets.len(), "asset"),
            output.display()
        );
    }
    Ok(())
}

/// Clear (if requested) and create the output directory
fn init_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

/// Output directory of a post's page and assets
fn post_output_dir(output: &Path, post: &Post) -> PathBuf {
    output.join("posts").join(&post.key)
}

/// Every file in each post's directory except its `index.md`
fn collect_assets(site: &Site, output: &Path) -> Vec<PostAsset> {
    site.posts()
        .iter()
        .flat_map(|post| {
            let dest_dir = post_output_dir(output, post);
            WalkDir::new(&post.dir)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
                .map(|e| e.path())
                .filter(|path| path.parent() != Some(post.dir.as_path()) || !is_index(path))
                .filter_map(|source| {
                    let relative = source.strip_prefix(&post.dir).ok()?.to_path_buf();
                    Some(PostAsset {
                        dest: dest_dir.join(relative),
                        source,
                    })
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

fn is_index(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == INDEX_FILE)
}

/// Render post pages in parallel
fn render_posts(
    site: &Site,
    output: &Path,
    has_error: &AtomicBool,
    progress: Option<&ProgressLine>,
) -> Result<()> {
    site.posts().posts().par_iter().try_for_each(|post| {
        if is_shutdown() || has_error.load(Ordering::Relaxed) {
            return Err(anyhow!("Aborted"));
        }

        let written = site.post_page(post).and_then(|html| {
            let dest = post_output_dir(output, post).join("index.html");
            write_file(&dest, html).with_context(|| format!("Failed to write {}", dest.display()))
        });
        if let Err(e) = written {
            if !has_error.swap(true, Ordering::Relaxed) {
                log!("error"; "{}: {:#}", post.key, e);
            }
            return Err(anyhow!("Build failed"));
        }

        if let Some(p) = progress {
            p.inc("posts");
        }
        Ok(())
    })
}

/// Copy post assets in parallel
fn copy_assets(
    assets: &[PostAsset],
    has_error: &AtomicBool,
    progress: Option<&ProgressLine>,
) -> Result<()> {
    assets.par_iter().try_for_each(|asset| {
        if is_shutdown() || has_error.load(Ordering::Relaxed) {
            return Err(anyhow!("Aborted"));
        }
        if let Err(e) = copy_file(&asset.source, &asset.dest) {
            if !has_error.swap(true, Ordering::Relaxed) {
                log!("error"; "{}: {:#}", asset.source.display(), e);
            }
            return Err(anyhow!("Build failed"));
        }
        if let Some(p) = progress {
            p.inc("assets");
        }
        Ok(())
    })
}

fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, dest)?;
    Ok(())
}

/// Write the pages that depend on every post
fn finalize(site: &Site, output: &Path) -> Result<()> {
    write_file(&output.join("index.html"), site.index_page())?;
    write_file(&output.join("404.html"), site.not_found_page("/404.html"))?;

    if let Some(css) = site.highlight_css() {
        write_file(&output.join("highlight.css"), css)?;
    }
    Ok(())
}
