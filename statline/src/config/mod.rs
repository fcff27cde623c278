//! Configuration loading
//!
//! Reads the TOML file given on the command line, or the system-wide file
//! at [`DEFAULT_PATH`]. If no path was given and the system-wide file does
//! not exist, the copy of `statline.toml` embedded at build time is used.

pub mod file;

use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use statline_core::ConfigError;
use thiserror::Error;

pub use file::{FileConfig, HostConfig, RuntimeConfig};

/// System-wide configuration file
pub const DEFAULT_PATH: &str = "/etc/statline.toml";

/// Embedded default configuration
pub const EMBEDDED_CONFIG: &str = include_str!("../../statline.toml");

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid TOML in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown stat '{0}' (expected one of uptime, ip, load, mem, disk)")]
    UnknownStat(String),

    #[error("shutdown grace must be a non-negative number of seconds, got {0}")]
    InvalidGrace(f64),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ConfigError),
}

/// Where the configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Embedded,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Embedded => f.write_str("built-in defaults"),
        }
    }
}

/// Load and validate the configuration
///
/// An explicit `path` must exist. Without one, a missing [`DEFAULT_PATH`]
/// falls back to [`EMBEDDED_CONFIG`].
pub fn load(path: Option<&Path>) -> Result<(RuntimeConfig, ConfigSource), LoadError> {
    let (text, source) = match path {
        Some(path) => (read(path)?, ConfigSource::File(path.to_path_buf())),
        None => match read(Path::new(DEFAULT_PATH)) {
            Ok(text) => (text, ConfigSource::File(PathBuf::from(DEFAULT_PATH))),
            Err(LoadError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                debug!("{} not found, using built-in defaults", DEFAULT_PATH);
                (EMBEDDED_CONFIG.to_string(), ConfigSource::Embedded)
            }
            Err(e) => return Err(e),
        },
    };

    let config = parse(&text, &source)?;
    Ok((config, source))
}

/// Parse and validate a configuration document
pub fn parse(text: &str, source: &ConfigSource) -> Result<RuntimeConfig, LoadError> {
    let file = FileConfig::parse(text).map_err(|e| LoadError::Parse {
        origin: source.to_string(),
        source: e,
    })?;
    file.into_runtime()
}

fn read(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("statline-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_explicit_file() {
        let path = temp_file("explicit.toml", "[stats]\norder = [\"ip\"]\n");
        let (config, source) = load(Some(path.as_path())).unwrap();
        assert_eq!(source, ConfigSource::File(path.clone()));
        assert_eq!(config.core.stats.len(), 1);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("statline-does-not-exist.toml");
        let err = load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[test]
    fn test_parse_error_names_origin() {
        let path = temp_file("broken.toml", "[timing\nrotate_seconds = 1\n");
        let err = load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let path = temp_file("empty-order.toml", "[stats]\norder = []\n");
        let err = load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ConfigError::EmptyStatList)));
        assert_eq!(err.to_string(), "invalid configuration: stat list is empty");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_embedded_config_is_valid() {
        parse(EMBEDDED_CONFIG, &ConfigSource::Embedded).unwrap();
    }
}
