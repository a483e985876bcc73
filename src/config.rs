//! Program configuration read from a TOML file
use crate::options::{EngineOptions, GridSizing};
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Clone, Copy, Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Speed, scoring, and food settings
    #[serde(default)]
    pub engine: EngineOptions,

    /// How the terminal is divided into grid cells
    #[serde(default)]
    pub grid: GridSizing,
}

impl Config {
    /// Return the default configuration file path
    ///
    /// # Errors
    ///
    /// Returns `Err` if the local configuration directory could not be
    /// determined.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("diamond-hunter").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Read configuration from the default path, if there is one.  A missing
    /// file or configuration directory yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file exists but could not be read or parsed.
    pub fn load_default() -> Result<Config, ConfigError> {
        match Config::default_path() {
            Ok(path) => Config::load(&path, true),
            Err(ConfigError::NoPath) => Ok(Config::default()),
            Err(e) => Err(e),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
