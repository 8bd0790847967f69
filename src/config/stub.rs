use serde::{Deserialize, Serialize};

use crate::docs::RenderOptions;

/// Stub rendering options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StubConfig {
    /// Homepage named in the generated header.
    pub homepage: String,

    /// Keep `=nil` defaults in rendered method signatures.
    pub signature_defaults: bool,
}

impl Default for StubConfig {
    fn default() -> Self {
        let options = RenderOptions::default();
        Self {
            homepage: options.homepage,
            signature_defaults: options.signature_defaults,
        }
    }
}

impl StubConfig {
    /// Converts into the renderer's options.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            homepage: self.homepage.clone(),
            signature_defaults: self.signature_defaults,
        }
    }
}
