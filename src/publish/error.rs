//! Publish workflow errors, one variant per failure branch.

use super::version::VersionError;
use crate::error::FailureKind;
use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("manifest `{}` not found", .0.display())]
    ManifestMissing(PathBuf),

    #[error("could not find a version assignment in `{}`", .0.display())]
    VersionNotFound(PathBuf),

    #[error(transparent)]
    InvalidVersion(#[from] VersionError),

    #[error("no package name: set `publish.package` or `project.name` in `{}`", .0.display())]
    PackageNameMissing(PathBuf),

    #[error("I/O error on `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not run the {step} command: {message}")]
    Launch { step: &'static str, message: String },

    #[error("build failed: {0}")]
    BuildFailed(String),

    #[error("secrets file `{}` not found", .0.display())]
    SecretsMissing(PathBuf),

    #[error("could not find `{key}` in `{}`", path.display())]
    TokenNotFound { key: String, path: PathBuf },

    #[error("refusing to clean `{entry}`: not a directory name below `{}`", root.display())]
    UnsafeClean { entry: String, root: PathBuf },

    #[error("no build artifacts in `{}`", .0.display())]
    NoArtifacts(PathBuf),

    #[error("upload failed: {0}")]
    UploadFailed(String),
}

impl PublishError {
    pub(super) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Taxonomy bucket for reporting and exit codes.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::ManifestMissing(_)
            | Self::VersionNotFound(_)
            | Self::PackageNameMissing(_)
            | Self::SecretsMissing(_)
            | Self::TokenNotFound { .. }
            | Self::NoArtifacts(_) => FailureKind::MissingInput,
            Self::InvalidVersion(_) => FailureKind::Format,
            Self::Launch { .. } | Self::BuildFailed(_) | Self::UploadFailed(_) => {
                FailureKind::ExternalTool
            }
            Self::UnsafeClean { .. } => FailureKind::Config,
            Self::Io { .. } => FailureKind::Unexpected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            PublishError::ManifestMissing("pyproject.toml".into()).kind(),
            FailureKind::MissingInput
        );
        assert_eq!(
            PublishError::from(VersionError::Shape("1.2".into())).kind(),
            FailureKind::Format
        );
        assert_eq!(
            PublishError::BuildFailed("boom".into()).kind(),
            FailureKind::ExternalTool
        );
        assert_eq!(
            PublishError::TokenNotFound {
                key: "apiToken".into(),
                path: ".env".into()
            }
            .kind(),
            FailureKind::MissingInput
        );
    }

    #[test]
    fn test_unsafe_clean_is_config_error() {
        let err = PublishError::UnsafeClean {
            entry: "..".into(),
            root: "/work/pkg".into(),
        };
        assert_eq!(err.kind(), FailureKind::Config);
        assert!(err.to_string().starts_with("refusing to clean `..`"));
    }

    #[test]
    fn test_messages() {
        let err = PublishError::from(VersionError::Shape("1.2".into()));
        assert_eq!(err.to_string(), "invalid version format `1.2`: expected major.minor.patch");

        let err = PublishError::TokenNotFound {
            key: "apiToken".into(),
            path: ".env".into(),
        };
        assert_eq!(err.to_string(), "could not find `apiToken` in `.env`");
    }
}
