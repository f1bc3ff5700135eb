//! Checkpoint file writing.
//!
//! A checkpoint is the complete result set serialized as one JSON array.
//! Every write replaces the previous file; nothing is appended.
//!
//! ```text
//! output/
//! └── scraped_data.json   [{"news_id": "...", "title": ..., "body": ..., "summary": [...]}, ...]
//! ```
//!
//! By default the target is truncated and rewritten in place, so a crash
//! mid-write can leave a damaged file. With `atomic` set, the data goes to
//! `<file>.tmp` first and is renamed over the target.

use crate::errors::CheckpointError;
use crate::models::ArticleRecord;
use crate::utils::tail;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

/// Number of trailing records included in the pre-write debug log.
const TAIL_SAMPLE: usize = 20;

/// Serialize all `records` to `path`, replacing any previous checkpoint.
///
/// Creates the parent directory if needed. Logs the record count and the
/// last records at debug level before writing.
///
/// # Arguments
///
/// * `records` - The full result set, in input order
/// * `path` - Checkpoint file to overwrite
/// * `atomic` - Write `<file>.tmp` first and rename it over `path`
///
/// # Returns
///
/// `Ok(())` on success, or [`CheckpointError`] if serialization, directory
/// creation or the write fails.
#[instrument(level = "info", skip_all, fields(path = %path.display(), records = records.len()))]
pub async fn write_checkpoint(
    records: &[ArticleRecord],
    path: &Path,
    atomic: bool,
) -> Result<(), CheckpointError> {
    debug!(len = records.len(), "Saving outputs");
    debug!(tail = ?tail(records, TAIL_SAMPLE), "Checkpoint tail sample");

    let json = serde_json::to_string(records)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| CheckpointError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    if atomic {
        let tmp = temp_path(path);
        fs::write(&tmp, &json)
            .await
            .map_err(|source| CheckpointError::Io {
                path: tmp.clone(),
                source,
            })?;
        fs::rename(&tmp, path)
            .await
            .map_err(|source| CheckpointError::Io {
                path: path.to_path_buf(),
                source,
            })?;
    } else {
        fs::write(path, &json)
            .await
            .map_err(|source| CheckpointError::Io {
                path: path.to_path_buf(),
                source,
            })?;
    }

    info!(bytes = json.len(), "Wrote checkpoint");
    Ok(())
}

/// Read a checkpoint file back into records.
#[cfg(test)]
pub async fn read_checkpoint(path: &Path) -> Result<Vec<ArticleRecord>, CheckpointError> {
    let raw = fs::read(path)
        .await
        .map_err(|source| CheckpointError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(serde_json::from_slice(&raw)?)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("checkpoint"));
    name.push(".tmp");
    path.with_file_name(name)
}
