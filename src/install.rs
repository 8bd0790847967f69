use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{info, instrument};

use crate::{RdocOsaError, Result};

/// Where the installer puts things.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    /// Destination of the `rdoc-osa` executable.
    pub bindir: PathBuf,
    /// Base of the support data directory; the script lands in `<datadir>/rubyosa`.
    pub datadir: PathBuf,
    /// The executable to install.
    pub binary: PathBuf,
    /// Optional HTML template script for the generator.
    pub support_script: Option<PathBuf>,
}

impl InstallPlan {
    /// Plan with `<prefix>/bin` and `<prefix>/share` as destinations.
    pub fn from_prefix(prefix: &Path, binary: impl Into<PathBuf>) -> Self {
        Self {
            bindir: prefix.join("bin"),
            datadir: prefix.join("share"),
            binary: binary.into(),
            support_script: None,
        }
    }

    /// Directory receiving the support script.
    pub fn support_dir(&self) -> PathBuf {
        self.datadir.join("rubyosa")
    }

    /// Installs the binary and, if set, the support script.
    ///
    /// Returns the installed paths in that order.
    ///
    /// # Errors
    ///
    /// Returns `RdocOsaError::IoError` if any copy fails.
    pub fn execute(&self) -> Result<Vec<PathBuf>> {
        let mut installed = vec![install(&self.binary, &self.bindir)?];
        if let Some(script) = &self.support_script {
            installed.push(install(script, &self.support_dir())?);
        }
        Ok(installed)
    }
}

/// Copies `file` into `dest` under its own file name and marks it executable.
///
/// Creates `dest` as needed and overwrites an existing copy.
///
/// # Errors
///
/// Returns `RdocOsaError::IoError` naming the path that failed.
#[instrument(fields(file = %file.display(), dest = %dest.display()))]
pub fn install(file: &Path, dest: &Path) -> Result<PathBuf> {
    let file_name = file.file_name().ok_or_else(|| RdocOsaError::IoError {
        path: file.to_path_buf(),
        details: "not a file path".to_string(),
    })?;

    fs::create_dir_all(dest).map_err(|e| RdocOsaError::io(e, dest))?;
    let path = dest.join(file_name);
    fs::copy(file, &path).map_err(|e| RdocOsaError::io(e, file))?;
    set_executable(&path)?;

    info!(path = %path.display(), "installed");
    Ok(path)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|e| RdocOsaError::io(e, path))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}
