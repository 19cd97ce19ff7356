//! Tool configuration management for `shipkit.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [assets] and [publish]
//! ├── error.rs       # ConfigError
//! ├── util.rs        # upward config search
//! └── mod.rs         # ShipConfig (this file)
//! ```
//!
//! The config file is optional: without one every section takes its
//! defaults and the root is the current directory.

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{
    AssetCategory, AssetEntry, AssetsConfig, PublishConfig, ReleaseVars, clean_entry_problem,
};

use crate::{
    cli::{Cli, Commands},
    debug, log,
};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use util::find_config_file;

/// Root configuration structure representing shipkit.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShipConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Directory relative paths resolve against (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Asset wrapping settings
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Release settings
    #[serde(default)]
    pub publish: PublishConfig,
}

impl ShipConfig {
    /// Load configuration for the parsed CLI.
    ///
    /// Searches upward from cwd for the config file, then applies the
    /// subcommand's overrides and validates.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let mut config = Self::discover(&cli.config, &cwd)?;
        config.apply_command_options(cli, &cwd);
        config.validate()?;
        Ok(config)
    }

    /// Find and parse the config file, falling back to defaults rooted at `cwd`.
    pub fn discover(config_name: &Path, cwd: &Path) -> Result<Self> {
        let Some(path) = find_config_file(config_name, cwd) else {
            debug!("config"; "no {} found, using defaults", config_name.display());
            return Ok(Self {
                root: cwd.to_path_buf(),
                ..Self::default()
            });
        };

        let mut config = Self::from_path(&path)?;
        config.root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.to_path_buf());
        config.config_path = Some(path);
        Ok(config)
    }

    /// Parse configuration from TOML string
    #[cfg(test)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::from)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "ignoring unknown fields in {}: {}", display_path, fields.join(", "));
    }

    /// Apply CLI overrides for the active subcommand.
    fn apply_command_options(&mut self, cli: &Cli, cwd: &Path) {
        match &cli.command {
            Commands::Wrap { args } => {
                if let Some(dir) = &args.dir {
                    self.assets.dir = cwd.join(dir);
                }
                if let Some(size) = args.max_icon_size {
                    self.assets.max_icon_size = size;
                }
            }
            Commands::Publish { args } => {
                if let Some(root) = &args.root {
                    self.root = cwd.join(root);
                }
                self.publish.warn_missing_programs();
            }
        }
    }

    /// Check every section, reporting all problems at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();
        self.assets.validate(&mut problems);
        self.publish.validate(&mut problems);
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(problems))
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Join a path with the root directory.
    ///
    /// Absolute paths are returned unchanged.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Absolute asset directory.
    pub fn assets_dir(&self) -> PathBuf {
        self.root_join(&self.assets.dir)
    }
}

// ============================================================================
// tests
// ============================================================================
