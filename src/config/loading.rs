use std::{fs, path::Path};

use tracing::debug;

use super::{Config, ConfigPaths};
use crate::{RdocOsaError, Result};

impl Config {
    /// Loads the user configuration file, or defaults if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined or the
    /// file exists but cannot be read or parsed.
    pub fn load() -> Result<Config> {
        let path = ConfigPaths::main_config()?;
        Self::load_from(&path)
    }

    /// Loads configuration from `path`, or defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let file_content = fs::read_to_string(path).map_err(|e| RdocOsaError::io(e, path))?;
        Self::from_toml(&file_content, Some(path))
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `RdocOsaError::TomlParseError` if the content is invalid.
    pub fn from_toml(content: &str, path: Option<&Path>) -> Result<Config> {
        toml::from_str(content).map_err(|e| RdocOsaError::toml_parse(e, path))
    }
}
