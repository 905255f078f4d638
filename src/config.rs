//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_payload_dir() -> String {
    "payloads".to_string()
}

#[derive(Clone, Debug, Deserialize)]
/// Settings of the `schema_check` tool.
pub struct CheckerConfig {
    /// Directory scanned by `check` when no paths are given.
    #[serde(default = "default_payload_dir")]
    pub payload_dir: String,
    /// Stop at the first payload that fails.
    #[serde(default)]
    pub fail_fast: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            payload_dir: default_payload_dir(),
            fail_fast: false,
        }
    }
}
