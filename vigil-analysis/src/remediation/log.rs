//! Append-only record store.
//!
//! One JSON object per line. The store is a single-writer resource: all
//! appends serialize through one mutex, since the format has no
//! sequence numbers to recover interleaved writes.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;

use vigil_core::RemediationError;

/// Line-delimited, append-only JSON record store.
pub struct RecordStore {
    path: PathBuf,
    file: Mutex<File>,
}

impl RecordStore {
    /// Open (creating parents and the file as needed) for appending.
    pub fn open(path: &Path) -> Result<Self, RemediationError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| RemediationError::StoreOpen {
                    path: path.display().to_string(),
                    source,
                })?;
            }
        }
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|source| RemediationError::StoreOpen {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    /// Append one record as a JSON line.
    pub fn append<T: Serialize>(&self, record: &T) -> Result<(), RemediationError> {
        let line = serde_json::to_string(record).map_err(|e| RemediationError::StoreAppend {
            path: self.path.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        let mut file = self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(file, "{line}")
            .and_then(|()| file.flush())
            .map_err(|source| RemediationError::StoreAppend {
                path: self.path.display().to_string(),
                source,
            })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
