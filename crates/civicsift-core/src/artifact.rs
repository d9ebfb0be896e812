//! Reading and writing the persisted JSON artifacts.
//!
//! Each pipeline stage reads its predecessor's output file and writes its
//! own. A missing input file is a fatal stage error; nothing is written in
//! that case.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

/// Load a JSON artifact, failing with `MissingArtifact` if it does not exist.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(Error::MissingArtifact(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Write a pretty-printed JSON artifact.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}
