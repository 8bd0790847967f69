use std::{
    fmt, io,
    path::{Path, PathBuf},
    result,
};

use thiserror::Error;


/// Error types for rdoc-osa.
///
/// Covers application resolution, dictionary translation, configuration
/// loading, temp file handling and the documentation generator subprocess.
/// Command-line usage errors live in [`crate::cli::CliError`].
#[derive(Error, Debug)]
pub enum RdocOsaError {
    /// The reflection collaborator could not resolve an application
    #[error("cannot find application with {selector} '{criterion}': {details}")]
    Resolution {
        /// Selector used for the lookup (e.g. "name", "bundle_id")
        selector: String,
        /// The criterion passed on the command line
        criterion: String,
        /// Lookup failure details
        details: String,
    },

    /// The handle's type name does not identify an interface module
    #[error("invalid application handle type '{type_name}'")]
    InvalidHandle {
        /// The unparseable type name
        type_name: String,
    },

    /// An entity lacks a metadata collection the walker requires
    #[error("{entity} does not declare {collection}")]
    MissingMetadata {
        /// Name of the entity being walked
        entity: String,
        /// Name of the missing collection
        collection: String,
    },

    /// The scripting dictionary could not be read or parsed
    #[error("invalid scripting dictionary at '{location}': {details}")]
    Dictionary {
        /// File path or program the dictionary came from
        location: String,
        /// Parse error details
        details: String,
    },

    /// The documentation generator could not be started
    #[error("Error when executing `{command}' : {details}")]
    GeneratorSpawn {
        /// Rendered command line
        command: String,
        /// Spawn error details
        details: String,
    },

    /// The documentation generator exited unsuccessfully
    #[error("Error when executing `{command}' : {status}")]
    GeneratorFailed {
        /// Rendered command line
        command: String,
        /// Exit status description
        status: String,
    },

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// Standard I/O operation error (for compatibility)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A specialized `Result` type for rdoc-osa operations.
pub type Result<T> = result::Result<T, RdocOsaError>;

impl RdocOsaError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        RdocOsaError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error bound to the path it occurred on.
    pub fn io(error: impl fmt::Display, path: &Path) -> Self {
        RdocOsaError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }

    /// Creates a dictionary error for the given source location.
    pub fn dictionary(error: impl fmt::Display, location: impl Into<String>) -> Self {
        RdocOsaError::Dictionary {
            location: location.into(),
            details: error.to_string(),
        }
    }
}
