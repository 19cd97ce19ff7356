//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`.
/// An absolute `config_name` is returned as-is when it exists.
///
/// # Example
/// ```text
/// /home/user/project/assets/     ← start
/// /home/user/project/shipkit.toml ← found!
/// ```
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_parent() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join("shipkit.toml"), "").unwrap();

        let found = find_config_file(Path::new("shipkit.toml"), &nested).unwrap();
        assert_eq!(found, tmp.path().join("shipkit.toml"));
    }

    #[test]
    fn test_find_config_prefers_nearest() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join("shipkit.toml"), "").unwrap();
        fs::write(nested.join("shipkit.toml"), "").unwrap();

        let found = find_config_file(Path::new("shipkit.toml"), &nested).unwrap();
        assert_eq!(found, nested.join("shipkit.toml"));
    }

    #[test]
    fn test_absolute_missing_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.toml");
        assert_eq!(find_config_file(&path, tmp.path()), None);
    }
}
