use std::{env, path::PathBuf};

use serde::{Deserialize, Serialize};

/// Settings for the documentation generator and its input file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Generator program, looked up on `PATH`.
    pub program: String,

    /// Extension of the temporary stub file.
    pub extension: String,

    /// Directory for the temporary stub; the platform temp dir when unset.
    pub tmp_dir: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            program: "rdoc".to_string(),
            extension: ".rb".to_string(),
            tmp_dir: None,
        }
    }
}

impl GeneratorConfig {
    /// Directory the stub is written to.
    pub fn tmp_dir(&self) -> PathBuf {
        self.tmp_dir.clone().unwrap_or_else(env::temp_dir)
    }
}
