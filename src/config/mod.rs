//! Configuration schema definitions and loading.
//!
//! Everything is optional: a missing file, section or field falls back to
//! the defaults that reproduce the classic `rdoc-osa` behavior.

mod dictionary;
mod generator;
mod loading;
mod logging;
mod paths;
mod stub;


pub use dictionary::DictionaryConfig;
pub use generator::GeneratorConfig;
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use paths::ConfigPaths;
pub use stub::StubConfig;

use serde::{Deserialize, Serialize};

/// Main configuration structure for rdoc-osa.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Documentation generator invocation.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Stub rendering options.
    #[serde(default)]
    pub stub: StubConfig,

    /// Scripting dictionary access.
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// Diagnostic logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}
