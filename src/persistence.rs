use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Failure modes of a persisted JSON store.
///
/// `Missing` and `Corrupt` are recoverable: callers synthesize a default
/// record and continue. `Io` covers everything else (permissions, hardware).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store not found: {0:?}")]
    Missing(PathBuf),

    #[error("store corrupt at {path:?}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("store IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StoreError {
    /// Whether a caller may substitute a default record and continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StoreError::Missing(_) | StoreError::Corrupt { .. })
    }
}

/// Load a record from a JSON file on disk.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let raw = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            StoreError::Missing(path.to_path_buf())
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Save a record as pretty-printed JSON, creating parent directories.
pub fn save<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, json).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
    struct Sample {
        value: u32,
    }

    #[test]
    fn missing_store_is_recoverable() {
        let dir = TempDir::new().unwrap();
        let err = load::<Sample>(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, StoreError::Missing(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn corrupt_store_is_recoverable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load::<Sample>(&path).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("sample.json");
        save(&path, &Sample { value: 7 }).unwrap();
        let loaded: Sample = load(&path).unwrap();
        assert_eq!(loaded, Sample { value: 7 });
    }
}
