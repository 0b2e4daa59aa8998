//! JSON-file-backed ledger store.
//!
//! The whole state file is loaded into a [`MemoryStore`] on open. Every `put` rewrites the file
//! (temp file + rename) before the in-memory copy changes, so a failed write leaves both the
//! file and the served state untouched. Values are hex-encoded in the file.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

use crate::core::memory::MemoryStore;
use crate::core::store::{LedgerStore, StateIter, StoreError, StoreResult};

const STATE_FILE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StateFile {
    version: u32,
    entries: BTreeMap<String, String>,
}

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens the state file at `path`, or starts empty if it does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let inner = if path.exists() {
            let raw = fs::read(&path)?;
            let file: StateFile = serde_json::from_slice(&raw)
                .map_err(|e| StoreError::Format(format!("{}: {}", path.display(), e)))?;
            if file.version != STATE_FILE_VERSION {
                return Err(StoreError::Format(format!(
                    "{}: unsupported state file version {}",
                    path.display(),
                    file.version
                )));
            }
            let mut entries = Vec::with_capacity(file.entries.len());
            for (key, value) in file.entries {
                let decoded = hex::decode(&value).map_err(|e| StoreError::Read {
                    key: key.clone(),
                    cause: e.to_string(),
                })?;
                entries.push((key, Bytes::from(decoded)));
            }
            debug!(path = %path.display(), entries = entries.len(), "loaded state file");
            MemoryStore::from_entries(entries)
        } else {
            MemoryStore::new()
        };

        Ok(Self {
            path,
            inner,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> StoreResult<usize> {
        self.inner.len()
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        self.inner.is_empty()
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        let file = StateFile {
            version: STATE_FILE_VERSION,
            entries: entries.clone(),
        };
        let raw =
            serde_json::to_vec_pretty(&file).map_err(|e| StoreError::Format(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl LedgerStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<Bytes>> {
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: Bytes) -> StoreResult<()> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut entries: BTreeMap<String, String> = self
            .inner
            .entries()?
            .into_iter()
            .map(|kv| (kv.key, hex::encode(&kv.value)))
            .collect();
        entries.insert(key.to_string(), hex::encode(&value));
        self.persist(&entries).map_err(|e| StoreError::Write {
            key: key.to_string(),
            cause: e.to_string(),
        })?;
        self.inner.put(key, value)
    }

    fn scan(&self, start_key: &str, end_key: &str) -> StoreResult<StateIter<'_>> {
        self.inner.scan(start_key, end_key)
    }
}
