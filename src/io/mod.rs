pub mod tables;

pub use tables::{
    read_index_rows, read_indicator_records, read_qualitative_scores, write_index_rows,
    write_indicator_records, INDEX_COLUMNS, INDICATOR_COLUMNS, SCORE_COLUMNS,
};

use crate::core::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub fn read_file(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

/// Write `content` next to `path` and rename it into place.
///
/// Readers never observe a half-written file; on failure the previous
/// file, if any, is left untouched.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let tmp = temp_sibling(path);
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    if let Err(e) = fs::write(&tmp, content) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        e.into()
    })
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}
