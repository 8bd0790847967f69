use std::{
    env, fs,
    io::{Error, ErrorKind},
    path::PathBuf,
};

/// Utility struct for locating configuration and log paths
///
/// Follows the XDG Base Directory specification for configuration
pub struct ConfigPaths;

impl ConfigPaths {
    /// Returns the configuration directory path for the application
    ///
    /// - First checks `XDG_CONFIG_HOME`
    /// - Falls back to `$HOME/.config`
    /// - Appends "rdoc-osa" to the base config directory
    ///
    /// # Errors
    /// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` environment variables are set
    pub fn config_dir() -> Result<PathBuf, Error> {
        let config_home = env::var("XDG_CONFIG_HOME")
            .or_else(|_| env::var("HOME").map(|home| format!("{home}/.config")))
            .map_err(|_| {
                Error::new(
                    ErrorKind::NotFound,
                    "Neither XDG_CONFIG_HOME nor HOME environment variable found",
                )
            })?;

        Ok(PathBuf::from(config_home).join("rdoc-osa"))
    }

    /// Returns the application data directory path
    ///
    /// # Errors
    /// Returns an error if HOME environment variable is not set
    pub fn app_data_dir() -> Result<PathBuf, Error> {
        env::var("HOME")
            .map(|home| PathBuf::from(home).join(".rdoc-osa"))
            .map_err(|_| Error::new(ErrorKind::NotFound, "HOME environment variable not found"))
    }

    /// Get the application log directory
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    /// Returns error if HOME is unset or the directory cannot be created
    pub fn log_dir() -> Result<PathBuf, Error> {
        let log_dir = Self::app_data_dir()?.join("logs");

        if !log_dir.exists() {
            fs::create_dir_all(&log_dir)?;
        }

        Ok(log_dir)
    }

    /// Returns the path to the main configuration file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined
    pub fn main_config() -> Result<PathBuf, Error> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
