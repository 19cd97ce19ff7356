//! Manifest version extraction and patch bumping.
//!
//! The manifest is edited textually: only the value of the first
//! `version = "..."` assignment changes, every other byte is preserved.

use regex::Regex;
use std::{fmt, ops::Range, str::FromStr, sync::OnceLock};
use thiserror::Error;

/// A version string that cannot be patch-bumped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("invalid version format `{0}`: expected major.minor.patch")]
    Shape(String),

    #[error("invalid version format `{0}`: patch component is not an integer")]
    Patch(String),
}

/// Three-component version. Major and minor are kept verbatim as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    major: String,
    minor: String,
    patch: u64,
}

impl Version {
    /// Same major/minor, patch + 1.
    pub fn bump_patch(&self) -> Result<Self, VersionError> {
        let patch = self
            .patch
            .checked_add(1)
            .ok_or_else(|| VersionError::Patch(self.to_string()))?;
        Ok(Self {
            major: self.major.clone(),
            minor: self.minor.clone(),
            patch,
        })
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        let [major, minor, patch] = parts.as_slice() else {
            return Err(VersionError::Shape(s.to_string()));
        };
        let patch = patch
            .parse::<u64>()
            .map_err(|_| VersionError::Patch(s.to_string()))?;
        Ok(Self {
            major: (*major).to_string(),
            minor: (*minor).to_string(),
            patch,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Parse and bump in one step: `"X.Y.Z"` -> `"X.Y.(Z+1)"`.
pub fn bump_patch(version: &str) -> Result<String, VersionError> {
    Ok(version.parse::<Version>()?.bump_patch()?.to_string())
}

// ============================================================================
// Manifest Editing
// ============================================================================

/// `version = "..."` at the start of a line; group 1 is the value.
fn version_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^[ \t]*version[ \t]*=[ \t]*["']([^"'\r\n]+)["']"#)
            .expect("valid version pattern")
    })
}

/// Location of the first version value in a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionMatch<'a> {
    pub value: &'a str,
    span: Range<usize>,
}

/// Find the first version assignment.
pub fn find_version(content: &str) -> Option<VersionMatch<'_>> {
    let value = version_pattern().captures(content)?.get(1)?;
    Some(VersionMatch {
        value: value.as_str(),
        span: value.range(),
    })
}

/// Replace the first version value with `new_version`.
///
/// Returns `None` when the manifest has no version assignment.
pub fn replace_version(content: &str, new_version: &str) -> Option<String> {
    let found = find_version(content)?;
    let mut out = String::with_capacity(content.len() + new_version.len());
    out.push_str(&content[..found.span.start]);
    out.push_str(new_version);
    out.push_str(&content[found.span.end..]);
    Some(out)
}

/// Package name from `[project] name` (or `[tool.poetry] name`).
pub fn package_name(content: &str) -> Option<String> {
    let doc: toml::Table = toml::from_str(content).ok()?;
    let from = |table: Option<&toml::Value>| {
        table
            .and_then(|t| t.get("name"))
            .and_then(toml::Value::as_str)
            .map(str::to_string)
    };
    from(doc.get("project")).or_else(|| {
        from(
            doc.get("tool")
                .and_then(|tool| tool.get("poetry")),
        )
    })
}
