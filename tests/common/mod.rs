//! Shared helpers for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

/// Scratch directory of payload files, removed on drop.
pub struct PayloadDir {
    dir: TempDir,
}

#[allow(dead_code)]
impl PayloadDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create payload directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `payload` as pretty JSON to `file_name`.
    pub fn write_json(&self, file_name: &str, payload: &Value) -> PathBuf {
        let body = serde_json::to_string_pretty(payload).expect("payload serializes");
        self.write_raw(file_name, &body)
    }

    pub fn write_raw(&self, file_name: &str, body: &str) -> PathBuf {
        let path = self.dir.path().join(file_name);
        fs::write(&path, body).expect("failed to write payload");
        path
    }
}
