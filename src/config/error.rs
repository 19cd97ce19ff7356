//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error:\n{}", .0.join("\n"))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("shipkit.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("shipkit.toml"));

        let validation_err = ConfigError::Validation(vec![
            "publish.build must name a command".into(),
            "assets.max_icon_size must be greater than 0".into(),
        ]);
        let display = format!("{validation_err}");
        assert!(display.contains("publish.build"));
        assert!(display.contains("max_icon_size"));
    }
}
