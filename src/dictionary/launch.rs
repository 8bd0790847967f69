use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use tracing::{debug, info, instrument};

use super::{
    ApplicationHandle, InterfaceModule, Reflection,
    sdef::SdefParser,
    translate::translate,
};
use crate::{RdocOsaError, Result, config::DictionaryConfig};

/// Reflection backed by LaunchServices and the `sdef` tool.
///
/// Applications are located with `osascript`; their dictionary is read with
/// `sdef`. A path pointing at a plain `.sdef` file is read directly, which
/// also works where neither tool is available.
pub struct SdefReflection {
    sdef_program: String,
    osascript_program: String,
    include_depth: usize,
}

impl SdefReflection {
    /// Creates a reflection using the programs named in `config`.
    pub fn new(config: &DictionaryConfig) -> Self {
        Self {
            sdef_program: config.sdef_program.clone(),
            osascript_program: config.osascript_program.clone(),
            include_depth: config.include_depth,
        }
    }

    #[instrument(skip(self, script))]
    fn locate(&self, selector: &str, criterion: &str, script: String) -> Result<ApplicationHandle> {
        let resolution_error = |details: String| RdocOsaError::Resolution {
            selector: selector.to_string(),
            criterion: criterion.to_string(),
            details,
        };

        let output = Command::new(&self.osascript_program)
            .arg("-e")
            .arg(&script)
            .output()
            .map_err(|e| resolution_error(format!("cannot run {}: {e}", self.osascript_program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(resolution_error(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = stdout.trim().trim_end_matches('/');
        if path.is_empty() {
            return Err(resolution_error("no application path returned".to_string()));
        }

        info!(path, "resolved application");
        Ok(handle_for_path(PathBuf::from(path)))
    }

    fn dictionary_xml(&self, location: &Path) -> Result<Vec<u8>> {
        if location.is_file() {
            debug!(path = %location.display(), "reading dictionary file");
            return fs::read(location).map_err(|e| RdocOsaError::io(e, location));
        }

        let output = Command::new(&self.sdef_program)
            .arg(location)
            .output()
            .map_err(|e| {
                RdocOsaError::dictionary(
                    format!("cannot run {}: {e}", self.sdef_program),
                    location.to_string_lossy(),
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RdocOsaError::dictionary(
                format!("{} failed ({}): {}", self.sdef_program, output.status, stderr.trim()),
                location.to_string_lossy(),
            ));
        }

        Ok(output.stdout)
    }
}

fn handle_for_path(path: PathBuf) -> ApplicationHandle {
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());

    ApplicationHandle::new(name, path)
}

fn applescript_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

impl Reflection for SdefReflection {
    fn app_with_name(&self, name: &str) -> Result<ApplicationHandle> {
        let script = format!(
            "POSIX path of (path to application {})",
            applescript_string(name)
        );
        self.locate("name", name, script)
    }

    fn app_with_path(&self, path: &str) -> Result<ApplicationHandle> {
        let location = PathBuf::from(path);
        if !location.exists() {
            return Err(RdocOsaError::Resolution {
                selector: "path".to_string(),
                criterion: path.to_string(),
                details: "no such file or directory".to_string(),
            });
        }

        Ok(handle_for_path(location))
    }

    fn app_with_bundle_id(&self, bundle_id: &str) -> Result<ApplicationHandle> {
        let script = format!(
            "POSIX path of (path to application id {})",
            applescript_string(bundle_id)
        );
        self.locate("bundle_id", bundle_id, script)
    }

    fn app_with_signature(&self, signature: &str) -> Result<ApplicationHandle> {
        if signature.chars().count() != 4 {
            return Err(RdocOsaError::Resolution {
                selector: "signature".to_string(),
                criterion: signature.to_string(),
                details: "signatures are four-character codes".to_string(),
            });
        }

        let script = format!(
            "POSIX path of (path to application id {})",
            applescript_string(signature)
        );
        self.locate("signature", signature, script)
    }

    #[instrument(skip(self), fields(app = %handle.name))]
    fn interface_module(&self, handle: &ApplicationHandle) -> Result<InterfaceModule> {
        let xml = self.dictionary_xml(&handle.location)?;
        let dictionary = SdefParser::new(self.include_depth)
            .parse(&xml, &handle.location.to_string_lossy())?;

        let suites: Vec<&str> = dictionary.suites.iter().map(|s| s.name.as_str()).collect();
        debug!(title = ?dictionary.title, ?suites, "parsed dictionary");
        translate(&dictionary, handle)
    }
}
