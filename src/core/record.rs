//! Asset record: the four-field value stored under a caller-chosen key.
//!
//! A record carries no identity of its own; its key lives in the ledger store. Every field
//! is free text, including `cost`, which is never parsed as a number.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Tracked asset. Field order is the canonical JSON order: item, holder, location, cost.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    pub item: String,
    pub holder: String,
    pub location: String,
    pub cost: String,
}

impl Asset {
    pub fn new(
        item: impl Into<String>,
        holder: impl Into<String>,
        location: impl Into<String>,
        cost: impl Into<String>,
    ) -> Self {
        Self {
            item: item.into(),
            holder: holder.into(),
            location: location.into(),
            cost: cost.into(),
        }
    }

    /// Canonical byte encoding (compact JSON, declaration field order).
    pub fn to_bytes(&self) -> Result<Bytes> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }

    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(raw)?)
    }

    /// Same record with a different holder; the other three fields carry through.
    pub fn with_holder(mut self, holder: impl Into<String>) -> Self {
        self.holder = holder.into();
        self
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} held by {} at {} ({})",
            self.item, self.holder, self.location, self.cost
        )
    }
}

/// Number of records written by the seed operation.
pub const SEED_COUNT: usize = 11;

/// Fixed seed set, written to keys "1" through "11" in this order.
pub fn seed_assets() -> [Asset; SEED_COUNT] {
    [
        Asset::new("Porche 911", "Roger Raceman", "Washington, D.C.", "$85,000"),
        Asset::new("Leer Jet G5", "Jerry Pits", "San Diego, CA", "$6,000,000"),
        Asset::new("Beach House", "Rick Jortz", "Bali, Indonesia", "$575,000"),
        Asset::new("Porche 911", "Roger Raceman", "Washington, D.C.", "$85,000"),
        Asset::new("Park City Mountainside Home", "Sloan Slacks", "Park City, UT", "$3,750,000"),
        Asset::new("Dinasaur Egg", "Madam Mern", "New Orleans,LA", "$33,333"),
        Asset::new("JetPack 3000", "Perry Pants", "Elon Musk's Warehouse", "$2,000,000"),
        Asset::new("Unopened Heavyweights DVD", "Fiona Fiddle", "Blockbuster in Omaha, NE", "$50"),
        Asset::new("Rare Red Ruby Ring", "Brick Block", "New York, NY", "$75,000"),
        Asset::new("Gold Bars", "Eddie Eth", "Zurich, Switerland", "$25,00"),
        Asset::new("The Dark Knight Yacht", "Tim Cook", "Montengero", "$65,000,000"),
    ]
}

/// Seed key for a zero-based position: decimal string of `index + 1`.
pub fn seed_key(index: usize) -> String {
    (index + 1).to_string()
}
