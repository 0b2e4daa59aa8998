//! Asset service: the five ledger operations.
//!
//! Each handler takes the raw positional string arguments of an invocation, checks arity,
//! and turns them into ledger store calls. Nothing is cached between calls; every handler
//! that needs prior state reads it fresh from the store.
//!
//! # Known gap
//! `change_asset_holder` is a plain read-modify-write. Two concurrent transfers of the same
//! key race, and the last write wins. Ordering writes per key is the store's job.

use bytes::Bytes;
use tracing::{debug, info};

use crate::core::payload::Payload;
use crate::core::record::{seed_assets, seed_key, Asset};
use crate::core::store::LedgerStore;
use crate::error::{LedgerError, Result};

/// Default lower bound (inclusive) of the `query_all_asset` scan.
pub const DEFAULT_SCAN_START: &str = "0";
/// Default upper bound (exclusive) of the `query_all_asset` scan.
///
/// The bounds compare as strings, not numbers: "1000" sorts before "999" and is included,
/// "9999" sorts after it and is not.
pub const DEFAULT_SCAN_END: &str = "999";

fn expect_args(args: &[String], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(LedgerError::ArgumentCount {
            expected,
            actual: args.len(),
        });
    }
    Ok(())
}

#[derive(Debug)]
pub struct AssetService<S> {
    store: S,
    scan_start: String,
    scan_end: String,
}

impl<S: LedgerStore> AssetService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            scan_start: DEFAULT_SCAN_START.to_string(),
            scan_end: DEFAULT_SCAN_END.to_string(),
        }
    }

    /// Replaces the bounds used by `query_all_asset`.
    pub fn with_scan_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.scan_start = start.into();
        self.scan_end = end.into();
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scan_range(&self) -> (&str, &str) {
        (&self.scan_start, &self.scan_end)
    }

    /// `queryAsset(key)`: returns the stored bytes exactly as written.
    pub fn query_asset(&self, args: &[String]) -> Result<Payload> {
        expect_args(args, 1)?;
        self.read_raw(&args[0]).map(Payload::from)
    }

    /// `initLedger()`: writes the seed records to keys "1".."11", in that order.
    ///
    /// Arguments are ignored. Re-running rewrites the same values.
    pub fn init_ledger(&self, _args: &[String]) -> Result<Payload> {
        for (index, asset) in seed_assets().iter().enumerate() {
            let key = seed_key(index);
            self.write(&key, asset)?;
            info!(key = %key, asset = %asset, "seeded asset");
        }
        Ok(Payload::empty())
    }

    /// `recordAsset(key, cost, location, item, holder)`: create or overwrite.
    pub fn record_asset(&self, args: &[String]) -> Result<Payload> {
        expect_args(args, 5)?;
        let key = &args[0];
        let asset = Asset {
            cost: args[1].clone(),
            location: args[2].clone(),
            item: args[3].clone(),
            holder: args[4].clone(),
        };
        self.write(key, &asset)?;
        info!(key = %key, holder = %asset.holder, "recorded asset");
        Ok(Payload::empty())
    }

    /// `queryAllAsset()`: every entry in the scan range as
    /// `[{"Key":"1", "Record":{...}},...]`, with each stored value spliced in verbatim.
    ///
    /// The scan iterator is dropped on every exit path. A fault mid-scan fails the whole
    /// call; a partial array is never returned.
    pub fn query_all_asset(&self, _args: &[String]) -> Result<Payload> {
        let iter = self
            .store
            .scan(&self.scan_start, &self.scan_end)
            .map_err(|e| LedgerError::Scan(e.to_string()))?;

        let mut buffer: Vec<u8> = Vec::new();
        buffer.push(b'[');
        let mut count = 0usize;
        for entry in iter {
            let entry = entry.map_err(|e| LedgerError::Scan(e.to_string()))?;
            if count > 0 {
                buffer.push(b',');
            }
            buffer.extend_from_slice(b"{\"Key\":");
            serde_json::to_writer(&mut buffer, &entry.key)?;
            buffer.extend_from_slice(b", \"Record\":");
            buffer.extend_from_slice(&entry.value);
            buffer.push(b'}');
            count += 1;
        }
        buffer.push(b']');

        debug!(entries = count, start = %self.scan_start, end = %self.scan_end, "queryAllAsset");
        Ok(Payload::from(buffer))
    }

    /// `changeAssetHolder(key, newHolder)`: rewrites only the holder.
    ///
    /// The new holder is not checked against anything.
    pub fn change_asset_holder(&self, args: &[String]) -> Result<Payload> {
        expect_args(args, 2)?;
        let key = &args[0];
        let raw = self.read_raw(key)?;
        let asset = Asset::from_bytes(&raw)?.with_holder(args[1].as_str());
        self.write(key, &asset)?;
        info!(key = %key, holder = %asset.holder, "changed asset holder");
        Ok(Payload::empty())
    }

    /// Decoded record at `key`.
    pub fn get_asset(&self, key: &str) -> Result<Asset> {
        Asset::from_bytes(&self.read_raw(key)?)
    }

    fn read_raw(&self, key: &str) -> Result<Bytes> {
        self.store
            .get(key)?
            .ok_or_else(|| LedgerError::NotFound(key.to_string()))
    }

    fn write(&self, key: &str, asset: &Asset) -> Result<()> {
        let raw = asset.to_bytes()?;
        self.store
            .put(key, raw)
            .map_err(|e| LedgerError::Persistence {
                key: key.to_string(),
                cause: e.to_string(),
            })
    }
}
