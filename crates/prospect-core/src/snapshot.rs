//! Pretty-printed JSON snapshots of run output.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error for {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Writes `value` as pretty JSON to `dir/file_name`, creating `dir` if it
/// does not exist yet. Returns the path written.
///
/// # Errors
///
/// Returns [`SnapshotError::Io`] if the directory or file cannot be written,
/// [`SnapshotError::Json`] if `value` cannot be serialized.
pub async fn save_json<T>(dir: &Path, file_name: &str, value: &T) -> Result<PathBuf, SnapshotError>
where
    T: Serialize + ?Sized,
{
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| SnapshotError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

    let path = dir.join(file_name);
    let body = serde_json::to_string_pretty(value).map_err(|source| SnapshotError::Json {
        path: path.clone(),
        source,
    })?;
    tokio::fs::write(&path, body)
        .await
        .map_err(|source| SnapshotError::Io {
            path: path.clone(),
            source,
        })?;

    tracing::info!(path = %path.display(), "saved snapshot");
    Ok(path)
}

/// Reads a JSON snapshot previously written by [`save_json`].
///
/// # Errors
///
/// Returns [`SnapshotError::Io`] if the file cannot be read,
/// [`SnapshotError::Json`] if it does not deserialize into `T`.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, SnapshotError> {
    let body = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&body).map_err(|source| SnapshotError::Json {
        path: path.to_path_buf(),
        source,
    })
}
