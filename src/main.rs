//! Folio - A Markdown blog engine with syntax-highlighted code blocks.

#![allow(dead_code)]

mod cli;
mod config;
mod core;
mod embed;
mod logger;
mod markdown;
mod post;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;
use std::sync::Arc;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = Arc::new(SiteConfig::load(&cli)?);
    debug!("config"; "root: {}", config.get_root().display());

    match &cli.command {
        Commands::Build { .. } => cli::build::build_site(config, false),
        Commands::Serve { .. } => cli::serve::serve_site(config),
        Commands::List { pretty, .. } => cli::list::list_posts(&config, *pretty),
        Commands::Render { file, .. } => cli::render::render_file(&config, file),
    }
}
