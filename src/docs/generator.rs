use std::{path::Path, process::Command};

use tracing::{info, instrument};

use crate::{RdocOsaError, Result};

/// Runs the external documentation generator on a stub file.
pub struct DocGenerator {
    program: String,
}

impl Default for DocGenerator {
    fn default() -> Self {
        Self {
            program: "rdoc".to_string(),
        }
    }
}

impl DocGenerator {
    /// Creates an invoker for the default `rdoc` program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a different generator program.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Renders the command line for display, quoting the stub path.
    pub fn command_line(&self, passthrough: &[String], path: &Path) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(passthrough.iter().cloned());
        parts.push(format!("\"{}\"", path.display()));
        parts.join(" ")
    }

    /// Runs the generator with `passthrough` flags followed by `path`,
    /// blocking until it exits.
    ///
    /// # Errors
    ///
    /// Returns `RdocOsaError::GeneratorSpawn` if the program cannot be started
    /// and `RdocOsaError::GeneratorFailed` if it exits unsuccessfully.
    #[instrument(skip(self, passthrough), fields(program = %self.program))]
    pub fn invoke(&self, passthrough: &[String], path: &Path) -> Result<()> {
        let command = self.command_line(passthrough, path);
        info!(%command, "running documentation generator");

        let status = Command::new(&self.program)
            .args(passthrough)
            .arg(path)
            .status()
            .map_err(|e| RdocOsaError::GeneratorSpawn {
                command: command.clone(),
                details: e.to_string(),
            })?;

        if !status.success() {
            return Err(RdocOsaError::GeneratorFailed {
                command,
                status: status.to_string(),
            });
        }

        Ok(())
    }
}
