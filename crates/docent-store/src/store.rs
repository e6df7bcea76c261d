// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON-array feedback store.
//!
//! The whole array is loaded, extended by one record, and written back on
//! every append. A single mutex serializes appends so concurrent
//! submissions cannot observe the same base length and overwrite each
//! other's records; ids stay dense and increasing. Writes go through a
//! temp file and rename so a crash mid-write never leaves a half-written
//! array behind.

use std::path::{Path, PathBuf};

use docent_core::DocentError;
use tokio::sync::Mutex;
use tracing::debug;

use crate::record::{FeedbackDraft, FeedbackRecord};

/// Helper to convert I/O errors into DocentError::Storage.
fn storage_err(e: std::io::Error) -> DocentError {
    DocentError::Storage {
        source: Box::new(e),
    }
}

/// Persistent store for feedback records in a single JSON file.
pub struct FeedbackStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FeedbackStore {
    /// Creates a store over the given file path. The file is created on
    /// first append; an absent file reads as an empty store.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every record.
    ///
    /// An absent file yields an empty vec. A file that exists but does not
    /// parse as a record array yields [`DocentError::StoreCorrupt`]; the
    /// error is request-scoped and the file is left untouched.
    pub async fn load_all(&self) -> Result<Vec<FeedbackRecord>, DocentError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| DocentError::StoreCorrupt {
                    path: self.path.display().to_string(),
                    source: Box::new(e),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(storage_err(e)),
        }
    }

    /// Appends one record, assigning `id = existing count + 1`, and
    /// rewrites the backing file. Returns the record with its id.
    pub async fn append(&self, draft: FeedbackDraft) -> Result<FeedbackRecord, DocentError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load_all().await?;
        let record = draft.into_record(records.len() as u64 + 1);
        records.push(record.clone());
        self.write_all(&records).await?;

        debug!(id = record.id, total = records.len(), "feedback record appended");
        Ok(record)
    }

    /// Writes the full array, pretty-printed, non-ASCII text verbatim.
    ///
    /// Must be called with the write lock held.
    async fn write_all(&self, records: &[FeedbackRecord]) -> Result<(), DocentError> {
        let json = serde_json::to_vec_pretty(records)
            .map_err(|e| DocentError::Internal(format!("failed to encode records: {e}")))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(storage_err)?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &json).await.map_err(storage_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(storage_err)?;
        Ok(())
    }
}
