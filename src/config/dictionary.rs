use serde::{Deserialize, Serialize};

/// External programs used to locate applications and read dictionaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Program printing an application's sdef XML.
    pub sdef_program: String,

    /// Program running the AppleScript used for application lookups.
    pub osascript_program: String,

    /// Maximum nesting of `xi:include` elements that is followed.
    pub include_depth: usize,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            sdef_program: "sdef".to_string(),
            osascript_program: "osascript".to_string(),
            include_depth: 4,
        }
    }
}
