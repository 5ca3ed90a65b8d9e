use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::errors::{GpgBatchError, Result};
use crate::core::models::target::validate_suffix;

/// Default ciphertext suffix, matching what `gpg --symmetric` produces.
pub const DEFAULT_SUFFIX: &str = ".gpg";

/// Top-level configuration read from `config.toml`. Every section and key
/// is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendSection,
    #[serde(default)]
    pub workflow: WorkflowSection,
}

/// The `[backend]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendSection {
    /// Binary name (looked up in PATH) or path to gpg.
    #[serde(default = "default_backend_path")]
    pub path: PathBuf,
    /// Options appended to every gpg invocation.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            path: default_backend_path(),
            extra_args: Vec::new(),
        }
    }
}

fn default_backend_path() -> PathBuf {
    PathBuf::from("gpg")
}

/// The `[workflow]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowSection {
    #[serde(default = "default_suffix")]
    pub suffix: String,
    /// Cancel the remaining files of a batch after the first failure.
    #[serde(default)]
    pub fail_fast: bool,
}

impl Default for WorkflowSection {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            fail_fast: false,
        }
    }
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the per-user file
    /// (`<config dir>/gpgbatch/config.toml`) is used when present,
    /// otherwise built-in defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(GpgBatchError::InvalidConfig {
                    detail: format!("config file not found: {}", path.display()),
                });
            }
            return Ok((Self::from_file(path)?, ConfigSource::File(path.to_path_buf())));
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                let config = Self::from_file(&path)?;
                Ok((config, ConfigSource::File(path)))
            }
            _ => Ok((Self::default(), ConfigSource::Defaults)),
        }
    }

    /// Parse and validate a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| match e {
            GpgBatchError::InvalidConfig { detail } => GpgBatchError::InvalidConfig {
                detail: format!("{}: {detail}", path.display()),
            },
            other => other,
        })
    }

    /// Parse and validate TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| GpgBatchError::InvalidConfig {
            detail: format!("Failed to parse config.toml: {e}"),
        })?;

        if config.backend.path.as_os_str().is_empty() {
            return Err(GpgBatchError::InvalidConfig {
                detail: "[backend] path must not be empty".into(),
            });
        }
        validate_suffix(&config.workflow.suffix)?;

        Ok(config)
    }

    /// Per-user config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("gpgbatch").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.backend.path, PathBuf::from("gpg"));
        assert!(config.backend.extra_args.is_empty());
        assert_eq!(config.workflow.suffix, ".gpg");
        assert!(!config.workflow.fail_fast);
    }

    #[test]
    fn full_file_parses() {
        let config = AppConfig::parse(
            r#"
            [backend]
            path = "/opt/gnupg/bin/gpg"
            extra_args = ["--cipher-algo", "AES256"]

            [workflow]
            suffix = ".enc"
            fail_fast = true
            "#,
        )
        .unwrap();

        assert_eq!(config.backend.path, PathBuf::from("/opt/gnupg/bin/gpg"));
        assert_eq!(config.backend.extra_args, ["--cipher-algo", "AES256"]);
        assert_eq!(config.workflow.suffix, ".enc");
        assert!(config.workflow.fail_fast);
    }

    #[test]
    fn empty_suffix_rejected() {
        let result = AppConfig::parse("[workflow]\nsuffix = \"\"\n");
        assert!(matches!(result, Err(GpgBatchError::InvalidSuffix { .. })));
    }

    #[test]
    fn unknown_key_rejected() {
        let result = AppConfig::parse("[backend]\ninstall_url = \"http://x\"\n");
        assert!(matches!(result, Err(GpgBatchError::InvalidConfig { .. })));
    }

    #[test]
    fn explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(GpgBatchError::InvalidConfig { .. })));
    }

    #[test]
    fn explicit_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[workflow]\nsuffix = \".pgp\"\n").unwrap();

        let (config, source) = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.workflow.suffix, ".pgp");
        assert_eq!(source, ConfigSource::File(path));
    }
}
