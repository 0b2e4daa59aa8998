// Core module: the asset service, its dispatcher, and the ledger store collaborators.
//
// Flow: Invocation -> Dispatcher -> AssetService handler -> LedgerStore get/put/scan -> Response.
//
// INVARIANTS:
// - No state is held between invocations; the ledger store is the only source of truth.
// - Every handler runs at most once per invocation.
// - Range scans release their iterator on every exit path.

pub mod record;
pub mod payload;
pub mod store;
pub mod memory;
pub mod file;
pub mod service;
pub mod dispatch;
pub mod response;
pub mod determinism;

use crate::config::{Config, StoreBackend};
use crate::core::dispatch::Dispatcher;
use crate::core::file::FileStore;
use crate::core::memory::MemoryStore;
use crate::core::service::AssetService;
use crate::core::store::LedgerStore;
use crate::error::Result;
use tracing::info;

/// Store chosen at runtime from configuration.
pub type DynStore = Box<dyn LedgerStore + Send + Sync>;

/// Opens the configured store backend.
pub fn open_store(config: &Config) -> Result<DynStore> {
    match config.store.backend {
        StoreBackend::Memory => Ok(Box::new(MemoryStore::new())),
        StoreBackend::File => {
            let store = FileStore::open(&config.store.path)?;
            info!(path = %store.path().display(), entries = store.len()?, "opened file store");
            Ok(Box::new(store))
        }
    }
}

/// Builds a dispatcher over `store` using the configured scan bounds.
pub fn build_dispatcher<S: LedgerStore>(config: &Config, store: S) -> Dispatcher<S> {
    let service = AssetService::new(store)
        .with_scan_range(config.scan.start_key.clone(), config.scan.end_key.clone());
    Dispatcher::new(service)
}
