use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    process,
};

use tracing::{debug, warn};

use crate::{RdocOsaError, Result};

fn slot_path(dir: &Path, base: &str, counter: usize, extension: &str) -> PathBuf {
    let base = base.replace(['/', '\\'], "_");
    dir.join(format!("{base}-{counter}-{}{extension}", process::id()))
}

/// Returns the first `<dir>/<base>-<counter>-<pid><extension>` that does not
/// exist yet, scanning upward from `start`.
///
/// This is a collision-avoidance scan, not a reservation: the path may be
/// taken by someone else before it is created.
pub fn unique_tmp_path(dir: &Path, base: &str, extension: &str, start: usize) -> (usize, PathBuf) {
    let mut counter = start;
    loop {
        let path = slot_path(dir, base, counter, extension);
        if !path.exists() {
            return (counter, path);
        }
        counter += 1;
    }
}

/// A stub written to a temporary file, removed again on drop.
#[derive(Debug)]
pub struct TempStub {
    path: PathBuf,
}

impl TempStub {
    /// Writes `contents` to a fresh temporary path in `dir`.
    ///
    /// # Errors
    ///
    /// Returns `RdocOsaError::IoError` if the file cannot be created or
    /// written. A partially written file is removed.
    pub fn create(dir: &Path, base: &str, extension: &str, contents: &str) -> Result<Self> {
        let mut start = 0;

        let (file, path) = loop {
            let (counter, path) = unique_tmp_path(dir, base, extension, start);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => break (file, path),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => start = counter + 1,
                Err(e) => return Err(RdocOsaError::io(e, &path)),
            }
        };

        let stub = Self { path };
        write_contents(file, contents).map_err(|e| RdocOsaError::io(e, &stub.path))?;

        debug!(path = %stub.path.display(), bytes = contents.len(), "wrote stub");
        Ok(stub)
    }

    /// Path of the temporary file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_contents(mut file: fs::File, contents: &str) -> std::io::Result<()> {
    file.write_all(contents.as_bytes())?;
    if !contents.ends_with('\n') {
        file.write_all(b"\n")?;
    }
    file.flush()
}

impl Drop for TempStub {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed stub"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to remove stub"),
        }
    }
}
