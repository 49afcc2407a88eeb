//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Folio: Markdown blog engine with syntax-highlighted code blocks
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Output directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Posts directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: folio.toml)
    #[arg(short = 'C', long, global = true, default_value = "folio.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Export the site as static HTML
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Clean output directory completely before building
        #[arg(long)]
        clean: bool,
    },

    /// Serve posts over HTTP, rendering on request
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print post metadata as JSON
    #[command(visible_alias = "l")]
    List {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Render one Markdown file to HTML on stdout
    #[command(visible_alias = "r")]
    Render {
        /// Markdown file; front matter is stripped. Use `-` for stdin.
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Leave code blocks unhighlighted
        #[arg(long)]
        no_highlight: bool,
    },
}

/// Post selection shared by Build, Serve and List
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Skip draft posts (overrides `build.skip_drafts`)
    #[arg(short = 'E', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub skip_drafts: Option<bool>,
}

#[allow(unused)]
impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
    pub const fn is_render(&self) -> bool {
        matches!(self.command, Commands::Render { .. })
    }

    /// Whether the command reads the posts directory.
    pub const fn reads_posts(&self) -> bool {
        !self.is_render()
    }
}
