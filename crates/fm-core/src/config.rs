//! Configuration loading for fm-core.
//!
//! Resolves the config file (CLI > env > XDG > defaults), parses it and
//! runs semantic validation.

pub use fm_config::{Config, ConfigSource, ValidationError};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid JSON in config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Semantic validation failed: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration with provenance information.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config came from (None when using defaults).
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

/// Load configuration with the standard resolution order.
///
/// 1. Explicit `--config` path (must exist)
/// 2. `FIREMERGE_CONFIG`, then `FIREMERGE_CONFIG_DIR/config.json`
/// 3. `$XDG_CONFIG_HOME/firemerge/config.json`
/// 4. Built-in defaults
pub fn load_config(cli_path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let resolved = fm_config::resolve_config(cli_path);

    let config = match &resolved.path {
        Some(path) => load_config_file(path)?,
        None => Config::default(),
    };
    config.validate()?;

    Ok(LoadedConfig {
        config,
        path: resolved.path,
        source: resolved.source,
    })
}

fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::IoError {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_missing_path_is_not_found() {
        let err = load_config(Some(Path::new("/nonexistent/firemerge.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_explicit_path_loaded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, r#"{"merge": {"location_tolerance": 0.01}}"#).unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.source, ConfigSource::CliArgument);
        assert_eq!(loaded.path.as_deref(), Some(path.as_path()));
        assert_eq!(loaded.config.merge.location_tolerance, 0.01);
    }

    #[test]
    fn test_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_semantic_failure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"plume_merge": {"grid": {
                "spacing": -1,
                "boundary": {"sw": {"lat": 30, "lng": -120}, "ne": {"lat": 40, "lng": -110}}
            }}}"#,
        )
        .unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
