//! Validation of JSON payload files against the schema catalog.
//!
//! A payload file names its schema: `JobCreate.json` and
//! `JobCreate.urgent-breakdown.json` are both checked as `JobCreate`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError, SchemaError};

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("{} is not a valid {schema}: {source}", .path.display())]
    Schema {
        path: PathBuf,
        schema: &'static str,
        #[source]
        source: SchemaError,
    },

    #[error("cannot tell which schema {} is for", .0.display())]
    UnnamedPayload(PathBuf),
}

/// Outcome of checking one payload file.
#[derive(Debug)]
pub struct PayloadReport {
    pub path: PathBuf,
    pub outcome: Result<Value, CheckError>,
}

impl PayloadReport {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Schema name a payload file is checked against: its file name up to the first `.`.
pub fn schema_name_for(path: &Path) -> Option<&str> {
    path.file_name()?
        .to_str()?
        .split('.')
        .next()
        .filter(|name| !name.is_empty())
}

/// Decodes and validates one payload file, returning its normalized JSON.
pub fn check_file(catalog: &Catalog, path: &Path) -> Result<Value, CheckError> {
    let name =
        schema_name_for(path).ok_or_else(|| CheckError::UnnamedPayload(path.to_path_buf()))?;
    let schema = catalog.resolve(name)?;

    let contents = fs::read_to_string(path).map_err(|source| CheckError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let payload: Value = serde_json::from_str(&contents).map_err(|source| CheckError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Checking {} as {}", path.display(), schema.name());

    schema.normalize(payload).map_err(|source| CheckError::Schema {
        path: path.to_path_buf(),
        schema: schema.name(),
        source,
    })
}

/// Checks every `*.json` file directly inside `dir`, in file name order.
///
/// With `fail_fast` the scan stops after the first failing file, which is the
/// last report returned.
pub fn check_directory(
    catalog: &Catalog,
    dir: &Path,
    fail_fast: bool,
) -> Result<Vec<PayloadReport>, CheckError> {
    let io_error = |source: std::io::Error| CheckError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut reports = Vec::with_capacity(paths.len());
    for path in paths {
        let outcome = check_file(catalog, &path);
        let failed = outcome.is_err();
        reports.push(PayloadReport { path, outcome });
        if failed && fail_fast {
            break;
        }
    }

    Ok(reports)
}
