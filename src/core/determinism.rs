//! State root: a digest of the ledger contents inside a key range.
//!
//! Entries are hashed in scan order, which is the store's key order, so the same set of
//! (key, value) pairs always yields the same root regardless of the order they were written.
//! Each key and value is length-prefixed so adjacent fields cannot run together.

use sha2::{Digest, Sha256};

use crate::core::store::LedgerStore;
use crate::error::{LedgerError, Result};

/// Hex-encoded SHA-256 over every entry with `start_key <= key < end_key`.
pub fn state_root<S: LedgerStore + ?Sized>(
    store: &S,
    start_key: &str,
    end_key: &str,
) -> Result<String> {
    let mut hasher = Sha256::new();
    let iter = store
        .scan(start_key, end_key)
        .map_err(|e| LedgerError::Scan(e.to_string()))?;
    for entry in iter {
        let entry = entry.map_err(|e| LedgerError::Scan(e.to_string()))?;
        hasher.update((entry.key.len() as u64).to_le_bytes());
        hasher.update(entry.key.as_bytes());
        hasher.update((entry.value.len() as u64).to_le_bytes());
        hasher.update(&entry.value);
    }
    Ok(hex::encode(hasher.finalize()))
}
