pub mod config;
pub mod error;
pub mod core;

pub use config::{Config, LogConfig, ScanConfig, StoreBackend, StoreConfig};
pub use error::{LedgerError, Result};

// Core API exports
pub use crate::core::{build_dispatcher, open_store, DynStore};
pub use crate::core::record::{seed_assets, seed_key, Asset, SEED_COUNT};
pub use crate::core::payload::Payload;
pub use crate::core::store::{KeyValue, LedgerStore, StateIter, StoreError, StoreResult};
pub use crate::core::memory::MemoryStore;
pub use crate::core::file::FileStore;
pub use crate::core::service::{AssetService, DEFAULT_SCAN_END, DEFAULT_SCAN_START};
pub use crate::core::dispatch::{Dispatcher, Invocation, Operation};
pub use crate::core::response::{Response, ResponseView, STATUS_ERROR, STATUS_OK};
pub use crate::core::determinism::state_root;
