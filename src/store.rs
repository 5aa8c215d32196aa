//! Flat-file JSON artifacts
//!
//! Crawl runs persist discovered URLs and per-item metadata as pretty-printed
//! JSON arrays, one owning writer per file. Writes go through a same-directory
//! temp file and a rename, so a crashed run leaves either the previous
//! artifact or the new one, never a torn file.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Metadata record for one collected item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub tags: Vec<String>,
    pub image_path: String,
    pub url: String,
}

/// Read a JSON artifact into any deserializable value
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Write a JSON artifact atomically: serialize to a sibling temp file, then
/// rename over the destination.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let body = serde_json::to_vec_pretty(value)?;

    let file_name = path
        .file_name()
        .ok_or_else(|| Error::StorageError(format!("Not a file path: {}", path.display())))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    fs::write(&tmp, &body)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
