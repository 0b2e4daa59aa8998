//! Opaque response payload. Stored record bytes are relayed through this type untouched so
//! they are never decoded and re-encoded on the way back to the caller.

use bytes::Bytes;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload(Bytes);

impl Payload {
    pub fn empty() -> Self {
        Self(Bytes::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl From<Bytes> for Payload {
    fn from(raw: Bytes) -> Self {
        Self(raw)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(raw: Vec<u8>) -> Self {
        Self(Bytes::from(raw))
    }
}

impl AsRef<[u8]> for Payload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Lossy UTF-8 rendering for terminals and logs.
impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}
