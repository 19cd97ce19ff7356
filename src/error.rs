//! Failure taxonomy shared by both commands.
//!
//! Every error that reaches `main` is classified into a [`FailureKind`],
//! which picks the label printed with the message and the exit code.

use crate::asset::WrapError;
use crate::config::ConfigError;
use crate::publish::{PublishError, VersionError};
use std::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Manifest, secrets file, version, token or artifacts absent.
    MissingInput,
    /// Version string is not `major.minor.patch`.
    Format,
    /// Build or upload tool failed or could not start.
    ExternalTool,
    /// A png could not be wrapped.
    Asset,
    /// `shipkit.toml` could not be read or is invalid.
    Config,
    /// Anything else.
    Unexpected,
}

impl FailureKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::MissingInput => "missing input",
            Self::Format => "format error",
            Self::ExternalTool => "external tool error",
            Self::Asset => "asset error",
            Self::Config => "config error",
            Self::Unexpected => "unexpected error",
        }
    }

    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Unexpected => 1,
            Self::MissingInput => 2,
            Self::Format => 3,
            Self::ExternalTool => 4,
            Self::Asset => 5,
            Self::Config => 6,
        }
    }
}

/// Exit code used when the run is interrupted with Ctrl+C.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Classify an error by its concrete type.
pub fn classify(err: &anyhow::Error) -> FailureKind {
    if let Some(e) = err.downcast_ref::<PublishError>() {
        e.kind()
    } else if err.downcast_ref::<VersionError>().is_some() {
        FailureKind::Format
    } else if err.downcast_ref::<WrapError>().is_some() {
        FailureKind::Asset
    } else if err.downcast_ref::<ConfigError>().is_some() {
        FailureKind::Config
    } else {
        FailureKind::Unexpected
    }
}

/// Render an error with its sources, `outer: inner: root`.
pub fn chain(err: &dyn Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{io, path::PathBuf};

    #[test]
    fn test_exit_codes_distinct() {
        let kinds = [
            FailureKind::MissingInput,
            FailureKind::Format,
            FailureKind::ExternalTool,
            FailureKind::Asset,
            FailureKind::Config,
            FailureKind::Unexpected,
        ];
        let mut codes: Vec<_> = kinds.iter().map(|k| k.exit_code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
        assert!(codes.iter().all(|&c| c != 0));
    }

    #[test]
    fn test_classify_by_type() {
        let err = anyhow::Error::new(PublishError::UploadFailed("403".into()));
        assert_eq!(classify(&err), FailureKind::ExternalTool);

        let err = anyhow::Error::new(WrapError::Failed { count: 2 });
        assert_eq!(classify(&err), FailureKind::Asset);

        let err = anyhow::Error::new(ConfigError::Validation(vec!["x".into()]));
        assert_eq!(classify(&err), FailureKind::Config);

        assert_eq!(classify(&anyhow::anyhow!("boom")), FailureKind::Unexpected);
    }

    #[test]
    fn test_classify_through_context() {
        let err = anyhow::Error::new(PublishError::SecretsMissing(".env".into()))
            .context("publishing airobo");
        assert_eq!(classify(&err), FailureKind::MissingInput);
    }

    #[test]
    fn test_chain_includes_sources() {
        let err = WrapError::Write {
            path: PathBuf::from("appIcon.svg"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(chain(&err), "failed to write `appIcon.svg`: denied");
    }
}
