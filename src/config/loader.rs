use crate::config::types::Config;
use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use tracing::{info, warn};

/// On-disk shape of the YAML configuration file.
///
/// Every field is optional at the serde level so that a missing entry can be
/// reported as a named `MissingField` error instead of a generic parse
/// failure.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    org: Option<String>,
    pat: Option<String>,
    secrets: Option<Vec<String>>,
    repos_file: Option<String>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    ///
    /// Fails when any of the required fields (`org`, `pat`, `secrets`,
    /// `repos_file`) is absent or empty, or when the referenced repository
    /// list file cannot be read.
    pub fn from_file(path: &str) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            warn!("Failed to read config file {}: {}", path, e);
            ConfigError::FileReadError(e)
        })?;

        let raw: ConfigFile = serde_yaml::from_str(&content).map_err(|e| {
            warn!("Failed to parse YAML in {}: {}", path, e);
            ConfigError::YamlParseError(e)
        })?;

        let org = Self::required_string(raw.org, "org")?;
        let pat = Self::required_string(raw.pat, "pat")?;
        let secrets = Self::required_list(raw.secrets, "secrets")?;
        let repos_file = Self::required_string(raw.repos_file, "repos_file")?;

        let repos = Self::read_repos_file(&repos_file)?;

        info!("Configuration loaded successfully from {}", path);
        Ok(Config {
            org,
            pat,
            secrets,
            repos,
        })
    }

    fn required_string(
        value: Option<String>,
        field: &'static str,
    ) -> Result<String, ConfigError> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ConfigError::MissingField { field }),
        }
    }

    fn required_list(
        value: Option<Vec<String>>,
        field: &'static str,
    ) -> Result<Vec<String>, ConfigError> {
        match value {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(ConfigError::MissingField { field }),
        }
    }

    /// Read the line-delimited repository list, trimming every line.
    ///
    /// Empty lines are dropped so that a trailing newline never turns into a
    /// nameless repository lookup.
    fn read_repos_file(path: &str) -> Result<Vec<String>, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            warn!("Failed to read repos file {}: {}", path, e);
            ConfigError::ReposFileReadError {
                path: path.to_string(),
                source: e,
            }
        })?;

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}
