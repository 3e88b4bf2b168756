// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Graph file read and written by every command
    pub graph_file: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "hyperpolymath", "followgraph")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graph_file: project_dirs()
                .map(|d| d.data_dir().join("graph.txt"))
                .unwrap_or_else(|| PathBuf::from("graph.txt")),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parsed log level, `None` if unrecognised
    #[must_use]
    pub fn level(&self) -> Option<tracing::Level> {
        self.log_level.parse().ok()
    }
}

/// Default location of the configuration file
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.toml"))
}

/// Load configuration from `path`, the default location, or built-in defaults
///
/// An explicit path must exist; the default location is optional.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(Config::default()),
        },
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_level = \"debug\"\n").unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.level(), Some(tracing::Level::DEBUG));
        assert_eq!(config.graph_file, Config::default().graph_file);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            graph_file: PathBuf::from("/tmp/social.txt"),
            log_level: "warn".into(),
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
