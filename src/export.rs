//! Writes a built skill to disk as a skill package.
//!
//! Layout:
//!
//! ```text
//! <dir>/skill.json
//! <dir>/models/<locale>.json
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use serde::Serialize;
use thiserror::Error;

use crate::model::{
    Model,
    Skill,
};

/// File name of the manifest.
pub const MANIFEST_FILE: &str = "skill.json";
/// Directory holding one model file per locale.
pub const MODELS_DIR: &str = "models";

/// Errors of writing a skill package.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Creating a directory or writing a file failed.
    #[error("Failed to write '{}': {source}", .path.display())]
    Io {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A document could not be serialized.
    #[error("Failed to serialize '{name}': {source}")]
    Serialize {
        /// Manifest file name or locale of the model.
        name: String,
        /// Underlying serializer error.
        #[source]
        source: serde_json::Error,
    },
}

/// Pretty JSON with two-space indentation.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Writes the manifest and one model file per locale below `dir`.
///
/// Returns the written paths, manifest first.
pub fn write_skill_package(
    dir: &Path,
    skill: &Skill,
    models: &BTreeMap<String, Model>,
) -> Result<Vec<PathBuf>, ExportError> {
    let models_dir = dir.join(MODELS_DIR);
    fs::create_dir_all(&models_dir).map_err(|source| ExportError::Io { path: models_dir.clone(), source })?;

    let mut written = Vec::with_capacity(models.len() + 1);
    written.push(write_json(&dir.join(MANIFEST_FILE), MANIFEST_FILE, skill)?);
    for (locale, model) in models {
        written.push(write_json(&models_dir.join(format!("{locale}.json")), locale, model)?);
    }

    tracing::debug!("Wrote skill package with {} file(s) to {:?}", written.len(), dir);
    Ok(written)
}

/// Writes `value` as pretty JSON with a trailing newline.
fn write_json<T: Serialize>(path: &Path, name: &str, value: &T) -> Result<PathBuf, ExportError> {
    let mut json =
        to_pretty_json(value).map_err(|source| ExportError::Serialize { name: name.to_string(), source })?;
    json.push('\n');
    fs::write(path, json).map_err(|source| ExportError::Io { path: path.to_path_buf(), source })?;
    Ok(path.to_path_buf())
}
