//! Release workflow: bump, clean, build, upload, refresh.
//!
//! # Steps
//!
//! 1. Locate the manifest
//! 2. Extract the version
//! 3. Validate and bump the patch component
//! 4. Write the bumped version back (in place, first match only)
//! 5. Remove old build directories
//! 6. Run the build command
//! 7. Read the upload token from the secrets file
//! 8. Run the upload command on every artifact
//! 9. Refresh the local install (exit status not checked)
//!
//! Any failure stops the remaining steps. Nothing is rolled back: once
//! step 4 has run, the manifest keeps the new version.

mod error;
mod secrets;
mod version;

pub use error::PublishError;
pub use secrets::{Credential, find_credential};
pub use version::{VersionError, bump_patch, find_version, package_name, replace_version};

use crate::config::{PublishConfig, ReleaseVars, clean_entry_problem};
use crate::utils::exec::{Cmd, FilterRule, failure_message};
use crate::utils::fs::{list_files, remove_dir_if_exists};
use crate::{debug, log};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Setuptools deprecation banners on a successful build's stderr.
const BUILD_NOISE: FilterRule = FilterRule::new(&["!!", "****", "warnings.warn("]);

/// What a run will do, computed before anything is written.
#[derive(Debug, Clone)]
pub struct Plan {
    pub package: String,
    pub manifest: PathBuf,
    pub current: String,
    pub next: String,
    /// Manifest text as read, rewritten in step 4.
    content: String,
}

impl Plan {
    pub fn vars(&self) -> ReleaseVars {
        ReleaseVars::new(&self.package, &self.next)
    }
}

/// A finished release.
#[derive(Debug, Clone)]
pub struct Release {
    pub package: String,
    pub previous: String,
    pub version: String,
    pub artifacts: Vec<PathBuf>,
    pub project_url: String,
}

/// Runs the workflow for one project root.
pub struct Publisher<'a> {
    config: &'a PublishConfig,
    root: PathBuf,
}

impl<'a> Publisher<'a> {
    pub fn new(config: &'a PublishConfig, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
        }
    }

    fn path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.root.join(rel)
    }

    /// Steps 1-3: read the manifest and compute the next version.
    pub fn plan(&self) -> Result<Plan, PublishError> {
        let manifest = self.path(&self.config.manifest);
        let content = match fs::read_to_string(&manifest) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PublishError::ManifestMissing(manifest));
            }
            Err(e) => return Err(PublishError::io(manifest, e)),
        };

        let current = find_version(&content)
            .ok_or_else(|| PublishError::VersionNotFound(manifest.clone()))?
            .value
            .to_string();
        let next = bump_patch(&current)?;

        let named = |name: &String| !name.trim().is_empty();
        let package = self
            .config
            .package
            .clone()
            .filter(named)
            .or_else(|| package_name(&content).filter(named))
            .ok_or_else(|| PublishError::PackageNameMissing(manifest.clone()))?;

        Ok(Plan {
            package,
            manifest,
            current,
            next,
            content,
        })
    }

    /// Run every step.
    pub fn run(&self) -> Result<Release, PublishError> {
        let plan = self.plan()?;
        log!("version"; "auto-incrementing version: {} → {}", plan.current, plan.next);

        self.persist_version(&plan)?;
        log!("version"; "version updated in {}", file_name(&plan.manifest));

        let vars = plan.vars();
        self.clean(&vars)?;
        self.build(&vars)?;

        let credential = self.read_credential()?;
        let artifacts = self.upload(&vars, &credential)?;
        log!("done"; "published {} {}", plan.package, plan.next);

        self.refresh(&vars);

        Ok(Release {
            project_url: vars.resolve(&self.config.project_url),
            package: plan.package,
            previous: plan.current,
            version: plan.next,
            artifacts,
        })
    }

    /// Step 4.
    fn persist_version(&self, plan: &Plan) -> Result<(), PublishError> {
        let updated = replace_version(&plan.content, &plan.next)
            .ok_or_else(|| PublishError::VersionNotFound(plan.manifest.clone()))?;
        fs::write(&plan.manifest, updated).map_err(|e| PublishError::io(&plan.manifest, e))
    }

    /// Step 5.
    fn clean(&self, vars: &ReleaseVars) -> Result<(), PublishError> {
        log!("clean"; "cleaning old builds...");
        for name in vars.resolve_args(&self.config.clean) {
            let dir = self.clean_target(&name)?;
            match remove_dir_if_exists(&dir) {
                Ok(true) => debug!("clean"; "removed {}", name),
                Ok(false) => {}
                Err(e) => return Err(PublishError::io(dir, e)),
            }
        }
        Ok(())
    }

    /// Resolve a clean entry, refusing anything not strictly below the root.
    fn clean_target(&self, entry: &str) -> Result<PathBuf, PublishError> {
        let dir = self.path(entry);
        if clean_entry_problem(entry).is_some() || !dir.starts_with(&self.root) || dir == self.root
        {
            return Err(PublishError::UnsafeClean {
                entry: entry.to_string(),
                root: self.root.clone(),
            });
        }
        Ok(dir)
    }

    /// Step 6.
    fn build(&self, vars: &ReleaseVars) -> Result<(), PublishError> {
        log!("build"; "building package...");
        let cmd = Cmd::from_slice(&vars.resolve_args(&self.config.build))
            .cwd(&self.root)
            .filter(&BUILD_NOISE);
        let name = cmd.program_name();
        let output = cmd.output().map_err(|e| PublishError::Launch {
            step: "build",
            message: format!("{e:#}"),
        })?;

        if !output.status.success() {
            return Err(PublishError::BuildFailed(failure_message(&name, &output)));
        }
        log!("build"; "package built successfully");
        Ok(())
    }

    /// Step 7.
    fn read_credential(&self) -> Result<Credential, PublishError> {
        let path = self.path(&self.config.secrets);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PublishError::SecretsMissing(path));
            }
            Err(e) => return Err(PublishError::io(path, e)),
        };

        find_credential(&content, &self.config.token_key).ok_or_else(|| {
            PublishError::TokenNotFound {
                key: self.config.token_key.clone(),
                path,
            }
        })
    }

    /// Step 8. Returns the uploaded files.
    fn upload(
        &self,
        vars: &ReleaseVars,
        credential: &Credential,
    ) -> Result<Vec<PathBuf>, PublishError> {
        let dir = self.path(&self.config.artifact_dir);
        let artifacts = list_files(&dir).map_err(|e| PublishError::io(&dir, e))?;
        if artifacts.is_empty() {
            return Err(PublishError::NoArtifacts(dir));
        }

        log!("upload"; "uploading {} file(s)...", artifacts.len());
        let cmd = Cmd::from_slice(&vars.resolve_args(&self.config.upload))
            .args(&artifacts)
            .arg("--username")
            .arg(&self.config.account)
            .arg("--password")
            .arg(credential.expose())
            .cwd(&self.root);
        let name = cmd.program_name();
        let output = cmd.output().map_err(|e| PublishError::Launch {
            step: "upload",
            message: format!("{e:#}"),
        })?;

        if !output.status.success() {
            return Err(PublishError::UploadFailed(failure_message(&name, &output)));
        }
        Ok(artifacts)
    }

    /// Step 9. Best effort: the exit status is ignored.
    fn refresh(&self, vars: &ReleaseVars) {
        if self.config.upgrade.is_empty() {
            return;
        }
        log!("refresh"; "updating local installation...");
        let cmd = Cmd::from_slice(&vars.resolve_args(&self.config.upgrade)).cwd(&self.root);
        match cmd.status() {
            Ok(status) => debug!("refresh"; "upgrade exited with {}", status),
            Err(e) => log!("warning"; "local refresh skipped: {:#}", e),
        }
    }

    /// Commands the run would execute, token masked. Used by `--dry-run`.
    pub fn describe(&self, plan: &Plan) -> Vec<String> {
        let vars = plan.vars();
        let join = |args: &[String]| vars.resolve_args(args).join(" ");
        let mut lines = vec![
            format!("write version \"{}\" to {}", plan.next, file_name(&plan.manifest)),
            format!("remove {}", vars.resolve_args(&self.config.clean).join(", ")),
            join(&self.config.build),
            format!(
                "{} {}/* --username {} --password ****",
                join(&self.config.upload),
                self.config.artifact_dir.display(),
                self.config.account
            ),
        ];
        if !self.config.upgrade.is_empty() {
            lines.push(join(&self.config.upgrade));
        }
        lines
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Tests
// ============================================================================
