//! `[publish]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [publish]
//! package = "airobo"
//! manifest = "pyproject.toml"
//! secrets = ".env"
//! token_key = "apiToken"
//! build = ["python", "-m", "build"]
//! upload = ["twine", "upload"]
//! upgrade = ["python", "-m", "pip", "install", "--upgrade", "$PACKAGE"]
//! clean = ["dist", "build", "$PACKAGE_MODULE.egg-info"]
//! ```
//!
//! Commands and clean entries support `$PACKAGE`, `$PACKAGE_MODULE` and
//! `$VERSION` substitution.

use crate::log;
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// `[publish]` section.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PublishConfig {
    /// Package name. Falls back to `project.name` in the manifest.
    pub package: Option<String>,

    /// Manifest holding `version = "X.Y.Z"`.
    pub manifest: PathBuf,

    /// Secrets file holding the upload token.
    pub secrets: PathBuf,

    /// Key of the token line in the secrets file.
    pub token_key: String,

    /// Account name passed as `--username`.
    pub account: String,

    /// Directory whose files are uploaded.
    pub artifact_dir: PathBuf,

    /// Directories removed before building.
    pub clean: Vec<String>,

    /// Build command.
    pub build: Vec<String>,

    /// Upload command; artifacts and credentials are appended.
    pub upload: Vec<String>,

    /// Local reinstall command run after a successful upload.
    pub upgrade: Vec<String>,

    /// Project page shown after publishing.
    pub project_url: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            package: None,
            manifest: "pyproject.toml".into(),
            secrets: ".env".into(),
            token_key: "apiToken".into(),
            account: "__token__".into(),
            artifact_dir: "dist".into(),
            clean: vec![
                "dist".into(),
                "build".into(),
                "$PACKAGE_MODULE.egg-info".into(),
            ],
            build: strings(&["python", "-m", "build"]),
            upload: strings(&["twine", "upload"]),
            upgrade: strings(&["python", "-m", "pip", "install", "--upgrade", "$PACKAGE"]),
            project_url: "https://pypi.org/project/$PACKAGE/$VERSION/".into(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl PublishConfig {
    /// Collect validation problems for this section.
    pub fn validate(&self, problems: &mut Vec<String>) {
        for (field, command) in [("build", &self.build), ("upload", &self.upload)] {
            if command.is_empty() {
                problems.push(format!("publish.{field} must name a command"));
            }
        }
        if self.token_key.trim().is_empty() {
            problems.push("publish.token_key must not be empty".into());
        }
        if self.artifact_dir.as_os_str().is_empty() {
            problems.push("publish.artifact_dir must not be empty".into());
        }

        for entry in &self.clean {
            if let Some(problem) = clean_entry_problem(entry) {
                problems.push(format!("publish.clean entry `{entry}` {problem}"));
            }
        }

        let Some(package) = &self.package else {
            return;
        };
        if package.trim().is_empty() {
            problems.push("publish.package must not be empty".into());
            return;
        }
        let vars = ReleaseVars::new(package, "0.0.0");
        for entry in &self.clean {
            let resolved = vars.resolve(entry);
            if resolved != *entry
                && let Some(problem) = clean_entry_problem(&resolved)
            {
                problems.push(format!(
                    "publish.clean entry `{entry}` resolves to `{resolved}`, which {problem}"
                ));
            }
        }
    }

    /// Warn about configured programs that are not on `PATH`.
    pub fn warn_missing_programs(&self) {
        for (field, command) in [
            ("build", &self.build),
            ("upload", &self.upload),
            ("upgrade", &self.upgrade),
        ] {
            if let Some(program) = command.first()
                && which::which(program).is_err()
            {
                log!("warning"; "publish.{}: `{}` not found on PATH", field, program);
            }
        }
    }
}

/// Why `entry` is not a safe clean target, if it is not.
///
/// A clean entry must be a relative path made only of plain names, so the
/// directory it names is strictly below the project root.
pub fn clean_entry_problem(entry: &str) -> Option<&'static str> {
    let path = Path::new(entry);
    if entry.trim().is_empty() {
        Some("is empty")
    } else if path.has_root() || path.is_absolute() {
        Some("is absolute")
    } else if !path.components().all(|c| matches!(c, Component::Normal(_))) {
        Some("contains `.`, `..` or a drive prefix")
    } else {
        None
    }
}

// ============================================================================
// Variable Substitution
// ============================================================================

/// `$NAME` values substituted into commands, clean entries and the project url.
#[derive(Debug, Clone)]
pub struct ReleaseVars {
    vars: Vec<(&'static str, String)>,
}

impl ReleaseVars {
    pub fn new(package: &str, version: &str) -> Self {
        // Longest names first so `$PACKAGE` never eats `$PACKAGE_MODULE`.
        Self {
            vars: vec![
                ("PACKAGE_MODULE", package.replace('-', "_")),
                ("PACKAGE", package.to_string()),
                ("VERSION", version.to_string()),
            ],
        }
    }

    /// Replace every `$NAME` occurrence in `s`.
    pub fn resolve(&self, s: &str) -> String {
        let mut result = s.to_string();
        for (key, value) in &self.vars {
            result = result.replace(&format!("${key}"), value);
        }
        result
    }

    /// Resolve each argument.
    pub fn resolve_args(&self, args: &[String]) -> Vec<String> {
        args.iter().map(|arg| self.resolve(arg)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_pypi_workflow() {
        let config = PublishConfig::default();
        assert_eq!(config.manifest, PathBuf::from("pyproject.toml"));
        assert_eq!(config.secrets, PathBuf::from(".env"));
        assert_eq!(config.token_key, "apiToken");
        assert_eq!(config.account, "__token__");
        assert_eq!(config.upload, ["twine", "upload"]);
    }

    #[test]
    fn test_resolve_args_prefers_longest_name() {
        let vars = ReleaseVars::new("my-pkg", "1.2.4");
        let clean = vars.resolve_args(&PublishConfig::default().clean);
        assert_eq!(clean, ["dist", "build", "my_pkg.egg-info"]);
    }

    #[test]
    fn test_resolve_project_url() {
        let vars = ReleaseVars::new("airobo", "0.3.8");
        assert_eq!(
            vars.resolve(&PublishConfig::default().project_url),
            "https://pypi.org/project/airobo/0.3.8/"
        );
    }

    #[test]
    fn test_resolve_no_vars() {
        let vars = ReleaseVars::new("airobo", "1.0.0");
        assert_eq!(vars.resolve("python -m build"), "python -m build");
    }

    #[test]
    fn test_clean_entry_problem() {
        assert_eq!(clean_entry_problem("dist"), None);
        assert_eq!(clean_entry_problem("build/lib"), None);
        assert_eq!(clean_entry_problem("my_pkg.egg-info"), None);
        assert_eq!(clean_entry_problem(""), Some("is empty"));
        assert_eq!(clean_entry_problem("/tmp"), Some("is absolute"));
        assert!(clean_entry_problem(".").is_some());
        assert!(clean_entry_problem("..").is_some());
        assert!(clean_entry_problem("./dist").is_some());
        assert!(clean_entry_problem("dist/../..").is_some());
    }

    #[test]
    fn test_validate_rejects_unsafe_clean_entries() {
        let config = PublishConfig {
            clean: strings(&["dist", "", ".", "..", "/tmp", "../x", "$PACKAGE_MODULE"]),
            ..Default::default()
        };
        let mut problems = Vec::new();
        config.validate(&mut problems);
        assert_eq!(problems.len(), 5);
        assert!(problems.iter().all(|p| p.starts_with("publish.clean entry")));
    }

    #[test]
    fn test_validate_checks_resolved_clean_entries() {
        let config = PublishConfig {
            package: Some("..".into()),
            clean: strings(&["dist", "$PACKAGE"]),
            ..Default::default()
        };
        let mut problems = Vec::new();
        config.validate(&mut problems);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("resolves to `..`"));

        let config = PublishConfig {
            package: Some(" ".into()),
            ..Default::default()
        };
        let mut problems = Vec::new();
        config.validate(&mut problems);
        assert_eq!(problems, ["publish.package must not be empty"]);
    }

    #[test]
    fn test_validate_empty_commands() {
        let config = PublishConfig {
            build: Vec::new(),
            upload: Vec::new(),
            token_key: " ".into(),
            ..Default::default()
        };
        let mut problems = Vec::new();
        config.validate(&mut problems);
        assert_eq!(problems.len(), 3);
    }
}
