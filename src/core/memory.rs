//! In-memory ordered ledger store.
//!
//! Entries live in a `BTreeMap` behind `RwLock<Arc<..>>`. Writes go through `Arc::make_mut`
//! (copy-on-write, clones only while a scan still shares the map) and a scan captures the
//! current `Arc` in O(1), so an open iterator never holds the lock and sees a stable view.

use bytes::Bytes;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::core::store::{KeyValue, LedgerStore, StateIter, StoreError, StoreResult};

type Entries = BTreeMap<String, Bytes>;

/// Counts scan iterators handed out and released.
#[derive(Debug, Default)]
struct IterTracker {
    opened: AtomicUsize,
    released: AtomicUsize,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<Arc<Entries>>,
    iterators: Arc<IterTracker>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `entries`.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Bytes)>,
        K: Into<String>,
    {
        let map: Entries = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            entries: RwLock::new(Arc::new(map)),
            iterators: Arc::new(IterTracker::default()),
        }
    }

    pub fn len(&self) -> StoreResult<usize> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// All entries in key order.
    pub fn entries(&self) -> StoreResult<Vec<KeyValue>> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries
            .iter()
            .map(|(k, v)| KeyValue::new(k.clone(), v.clone()))
            .collect())
    }

    /// Scan iterators currently alive.
    pub fn open_iterators(&self) -> usize {
        let released = self.iterators.released.load(Ordering::SeqCst);
        self.iterators.opened.load(Ordering::SeqCst).saturating_sub(released)
    }

    /// Scan iterators handed out since creation.
    pub fn iterators_opened(&self) -> usize {
        self.iterators.opened.load(Ordering::SeqCst)
    }
}

impl LedgerStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<Bytes>> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: Bytes) -> StoreResult<()> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        Arc::make_mut(&mut entries).insert(key.to_string(), value);
        Ok(())
    }

    fn scan(&self, start_key: &str, end_key: &str) -> StoreResult<StateIter<'_>> {
        let snapshot = self
            .entries
            .read()
            .map_err(|_| StoreError::Poisoned)?
            .clone();
        self.iterators.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemoryIter {
            snapshot,
            cursor: None,
            start: start_key.to_string(),
            end: end_key.to_string(),
            tracker: Arc::clone(&self.iterators),
        }))
    }
}

/// Cursor over a snapshot. Each step resumes strictly after the last key returned.
struct MemoryIter {
    snapshot: Arc<Entries>,
    cursor: Option<String>,
    start: String,
    end: String,
    tracker: Arc<IterTracker>,
}

impl Iterator for MemoryIter {
    type Item = StoreResult<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        let lower = match &self.cursor {
            Some(last) => Bound::Excluded(last.as_str()),
            None => Bound::Included(self.start.as_str()),
        };
        // BTreeMap::range panics on an empty or inverted interval.
        let floor = self.cursor.as_deref().unwrap_or(self.start.as_str());
        if floor >= self.end.as_str() {
            return None;
        }
        let (key, value) = self
            .snapshot
            .range::<str, _>((lower, Bound::Excluded(self.end.as_str())))
            .next()?;
        let item = KeyValue::new(key.clone(), value.clone());
        self.cursor = Some(key.clone());
        Some(Ok(item))
    }
}

impl Drop for MemoryIter {
    fn drop(&mut self) {
        self.tracker.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(store: &MemoryStore, start: &str, end: &str) -> Vec<String> {
        store
            .scan(start, end)
            .unwrap()
            .map(|kv| kv.unwrap().key)
            .collect()
    }

    #[test]
    fn test_get_absent() {
        let store = MemoryStore::new();
        assert_eq!(store.get("1").unwrap(), None);
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_len_reports_poisoned_lock() {
        let store = MemoryStore::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.entries.write().unwrap();
            panic!("writer died holding the lock");
        }));
        assert_eq!(store.len(), Err(StoreError::Poisoned));
        assert_eq!(store.is_empty(), Err(StoreError::Poisoned));
    }

    #[test]
    fn test_put_overwrites() {
        let store = MemoryStore::new();
        store.put("a", Bytes::from_static(b"1")).unwrap();
        store.put("a", Bytes::from_static(b"2")).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(Bytes::from_static(b"2")));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_scan_is_lexicographic() {
        let store = MemoryStore::from_entries(
            ["1", "10", "11", "2", "9", "9999", "A", "0"]
                .into_iter()
                .map(|k| (k, Bytes::from_static(b"{}"))),
        );
        // "9999" sorts after "999" and "A" sorts after every digit, so both fall outside.
        assert_eq!(
            keys(&store, "0", "999"),
            vec!["0", "1", "10", "11", "2", "9"]
        );
    }

    #[test]
    fn test_scan_empty_and_inverted_ranges() {
        let store = MemoryStore::from_entries([("5", Bytes::from_static(b"{}"))]);
        assert!(keys(&store, "5", "5").is_empty());
        assert!(keys(&store, "9", "1").is_empty());
    }

    #[test]
    fn test_scan_sees_snapshot() {
        let store = MemoryStore::from_entries([("1", Bytes::from_static(b"a"))]);
        let mut iter = store.scan("0", "999").unwrap();
        store.put("2", Bytes::from_static(b"b")).unwrap();
        assert_eq!(iter.next().unwrap().unwrap().key, "1");
        assert!(iter.next().is_none());
        drop(iter);
        assert_eq!(keys(&store, "0", "999"), vec!["1", "2"]);
    }

    #[test]
    fn test_iterator_release_on_drop() {
        let store = MemoryStore::from_entries([("1", Bytes::from_static(b"a"))]);
        {
            let _iter = store.scan("0", "999").unwrap();
            assert_eq!(store.open_iterators(), 1);
        }
        assert_eq!(store.open_iterators(), 0);
        assert_eq!(store.iterators_opened(), 1);
    }
}
