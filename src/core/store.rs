//! Ledger store: the ordered key -> bytes map the asset service reads and writes.
//!
//! The service never owns persistence. It is handed a `LedgerStore` and talks to it only
//! through point reads, point writes and ordered range scans.
//!
//! # Iterator release
//! `scan` hands back a boxed iterator. Dropping it releases whatever the backend holds for
//! the scan, so a caller that lets the iterator fall out of scope (including through `?`)
//! has released it.

use bytes::Bytes;
use std::sync::Arc;
use thiserror::Error;

/// One entry produced by a range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Bytes,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<Bytes>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Errors produced by a ledger store backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Read failed for key {key}: {cause}")]
    Read { key: String, cause: String },

    #[error("Write failed for key {key}: {cause}")]
    Write { key: String, cause: String },

    #[error("Iterator fault: {0}")]
    Iterator(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Malformed state: {0}")]
    Format(String),

    #[error("Store lock poisoned")]
    Poisoned,
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Ordered range iterator over `[start, end)`. Items arrive in ascending key order.
pub type StateIter<'a> = Box<dyn Iterator<Item = StoreResult<KeyValue>> + 'a>;

/// Ordered, durable key -> bytes map.
pub trait LedgerStore {
    /// Point read. `Ok(None)` means the key is absent; `Err` means the store itself failed.
    fn get(&self, key: &str) -> StoreResult<Option<Bytes>>;

    /// Point write; overwrites any existing value.
    fn put(&self, key: &str, value: Bytes) -> StoreResult<()>;

    /// Ordered scan over keys `k` with `start_key <= k < end_key` in the store's native
    /// (byte-lexicographic) order.
    fn scan(&self, start_key: &str, end_key: &str) -> StoreResult<StateIter<'_>>;
}

impl<S: LedgerStore + ?Sized> LedgerStore for Arc<S> {
    fn get(&self, key: &str) -> StoreResult<Option<Bytes>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: Bytes) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn scan(&self, start_key: &str, end_key: &str) -> StoreResult<StateIter<'_>> {
        (**self).scan(start_key, end_key)
    }
}

impl<S: LedgerStore + ?Sized> LedgerStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<Bytes>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: Bytes) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn scan(&self, start_key: &str, end_key: &str) -> StoreResult<StateIter<'_>> {
        (**self).scan(start_key, end_key)
    }
}

impl<S: LedgerStore + ?Sized> LedgerStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<Bytes>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: Bytes) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn scan(&self, start_key: &str, end_key: &str) -> StoreResult<StateIter<'_>> {
        (**self).scan(start_key, end_key)
    }
}
