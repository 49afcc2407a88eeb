//! Site configuration management for `folio.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   ├── highlight  # [highlight]
//! │   ├── serve      # [serve]
//! │   └── site       # [site]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section       | Purpose                                       |
//! |---------------|-----------------------------------------------|
//! | `[site]`      | Site metadata (title, author, description)    |
//! | `[build]`     | Posts directory, output directory, drafts     |
//! | `[markdown]`  | Markdown extensions and fence handling        |
//! | `[highlight]` | Code highlighting on/off and theme            |
//! | `[serve]`     | HTTP server (interface, port)                 |
//!
//! A missing config file is not an error: every section has defaults.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{BuildConfig, HighlightConfig, ServeConfig, SiteSectionConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
    markdown::{MarkdownOptions, Pipeline, StyleSheet},
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site metadata
    #[serde(default)]
    pub site: SiteSectionConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Markdown rendering options
    #[serde(default)]
    pub markdown: MarkdownOptions,

    /// Code highlighting
    #[serde(default)]
    pub highlight: HighlightConfig,

    /// HTTP server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for the config file; the project root is the
    /// file's parent directory, or cwd when there is no file.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.config_path = path;
                config
            }
            None => {
                crate::debug!("config"; "{} not found, using defaults", cli.config.display());
                Self {
                    config_path: cwd.join(&cli.config),
                    ..Self::default()
                }
            }
        };

        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);
        config.finalize(cli, &root);
        config.validate(cli)?;
        Ok(config)
    }

    /// Resolve paths and apply CLI overrides.
    fn finalize(&mut self, cli: &Cli, root: &Path) {
        self.apply_command_options(cli);
        self.normalize_paths(cli, root);
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .map_err(|err| ConfigError::Toml(path.to_path_buf(), err))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), toml::de::Error> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Resolved highlight theme (`None`: highlighting off).
    pub fn style_sheet(&self) -> Result<Option<StyleSheet>> {
        if !self.highlight.enable {
            return Ok(None);
        }
        let style = self.highlight.style_sheet(&self.root)?;
        Ok(Some(style.unwrap_or_default()))
    }

    /// Markdown pipeline configured from `[markdown]` and `[highlight]`.
    pub fn pipeline(&self) -> Result<Pipeline> {
        let builder = Pipeline::builder(self.markdown.clone());
        let builder = match self.style_sheet()? {
            Some(style) => builder.use_syntax_highlighting(Some(style)),
            None => builder,
        };
        Ok(builder.build())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { build_args, clean } => {
                self.apply_build_args(build_args);
                self.build.clean = *clean;
            }
            Commands::Serve {
                build_args,
                interface,
                port,
            } => {
                self.apply_build_args(build_args);
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
            Commands::List { build_args, .. } => self.apply_build_args(build_args),
            Commands::Render { no_highlight, .. } => {
                if *no_highlight {
                    self.highlight.enable = false;
                }
            }
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        Self::update_option(&mut self.build.skip_drafts, args.skip_drafts.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize all paths relative to root directory.
    fn normalize_paths(&mut self, cli: &Cli, root: &Path) {
        use crate::utils::path::normalize_path;

        // Apply CLI path overrides first
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        let root = normalize_path(root);
        self.set_root(&root);
        self.config_path = normalize_path(&self.config_path);

        self.build.content = normalize_path(&root.join(&self.build.content));
        self.build.output = normalize_path(&root.join(&self.build.output));
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration for the current command.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self, cli: &Cli) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.build.validate(&mut diag);
        self.highlight.validate(&self.root, &mut diag);
        self.serve.validate(&mut diag);

        if cli.reads_posts() {
            self.build.validate_content_exists(&mut diag);
        }

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from TOML.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
