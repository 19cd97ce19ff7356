//! `[assets]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [assets]
//! dir = "branding"          # Directory holding the png sources (and svg outputs)
//! max_icon_size = 512       # Longest side for `icon` entries before downscaling
//! title = "AI & Robotics Academy"
//!
//! [[assets.entries]]
//! source = "appIcon.png"
//! dest = "appIcon.svg"
//! category = "icon"
//! ```

use serde::Deserialize;
use std::{fmt, path::PathBuf};

/// Default longest side for icon assets.
pub const DEFAULT_MAX_ICON_SIZE: u32 = 512;

/// Asset category, controls whether downscaling applies.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    /// Application icon, downscaled past `max_icon_size`.
    #[default]
    Icon,
    /// Splash screen, kept at its source size.
    Splash,
}

impl AssetCategory {
    /// Lowercase config name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Icon => "icon",
            Self::Splash => "splash",
        }
    }

    /// Title-cased label used in svg metadata.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Icon => "Icon",
            Self::Splash => "Splash",
        }
    }

    /// Whether images of this category are downscaled.
    pub const fn downscales(self) -> bool {
        matches!(self, Self::Icon)
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One png source and the svg it produces, both relative to `dir`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AssetEntry {
    pub source: PathBuf,
    pub dest: PathBuf,
    #[serde(default)]
    pub category: AssetCategory,
}

impl AssetEntry {
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>, category: AssetCategory) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            category,
        }
    }
}

/// `[assets]` section.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory holding sources and outputs.
    pub dir: PathBuf,

    /// Longest side allowed for icon entries.
    pub max_icon_size: u32,

    /// Application name used in the svg `<title>`.
    pub title: String,

    /// Conversions to run, in order.
    pub entries: Vec<AssetEntry>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: default_assets_dir(),
            max_icon_size: DEFAULT_MAX_ICON_SIZE,
            title: "Application".into(),
            entries: vec![
                AssetEntry::new("appIcon.png", "appIcon.svg", AssetCategory::Icon),
                AssetEntry::new("splash.png", "splash.svg", AssetCategory::Splash),
            ],
        }
    }
}

/// Platform default for the asset directory.
fn default_assets_dir() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\airoboConfigs")
    } else {
        PathBuf::from(".")
    }
}

impl AssetsConfig {
    /// Collect validation problems for this section.
    pub fn validate(&self, problems: &mut Vec<String>) {
        if self.max_icon_size == 0 {
            problems.push("assets.max_icon_size must be greater than 0".into());
        }
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.source.as_os_str().is_empty() || entry.dest.as_os_str().is_empty() {
                problems.push(format!("assets.entries[{i}] needs both `source` and `dest`"));
            } else if entry.source == entry.dest {
                problems.push(format!(
                    "assets.entries[{i}] would overwrite its own source `{}`",
                    entry.source.display()
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_entries() {
        let config = AssetsConfig::default();
        assert_eq!(config.max_icon_size, 512);
        assert_eq!(config.entries.len(), 2);
        assert_eq!(config.entries[0].source, PathBuf::from("appIcon.png"));
        assert_eq!(config.entries[0].category, AssetCategory::Icon);
        assert_eq!(config.entries[1].dest, PathBuf::from("splash.svg"));
        assert_eq!(config.entries[1].category, AssetCategory::Splash);
    }

    #[test]
    fn test_category_from_toml() {
        let entry: AssetEntry =
            toml::from_str("source = \"a.png\"\ndest = \"a.svg\"\ncategory = \"splash\"").unwrap();
        assert_eq!(entry.category, AssetCategory::Splash);
        assert!(!entry.category.downscales());

        let entry: AssetEntry = toml::from_str("source = \"b.png\"\ndest = \"b.svg\"").unwrap();
        assert_eq!(entry.category, AssetCategory::Icon);
        assert!(entry.category.downscales());
    }

    #[test]
    fn test_validate_rejects_zero_size_and_self_overwrite() {
        let config = AssetsConfig {
            max_icon_size: 0,
            entries: vec![AssetEntry::new("x.png", "x.png", AssetCategory::Icon)],
            ..Default::default()
        };
        let mut problems = Vec::new();
        config.validate(&mut problems);
        assert_eq!(problems.len(), 2);
    }
}
