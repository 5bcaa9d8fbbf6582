use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use std::sync::Arc;

/// An immutable view of a cached value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteView {
    bytes: Bytes,
}

impl ByteView {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Copies the bytes out, so the caller cannot mutate the view.
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

impl From<Bytes> for ByteView {
    fn from(bytes: Bytes) -> Self {
        Self { bytes }
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<String> for ByteView {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&'static str> for ByteView {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.bytes))
    }
}

/// A named cache group able to produce the value for a key.
#[async_trait]
pub trait GroupHandle: Send + Sync {
    fn name(&self) -> &str;

    async fn get(&self, key: &str) -> Result<ByteView>;
}

/// Resolves a group name to a group. Must tolerate concurrent lookups.
pub trait GroupLookup: Send + Sync {
    fn lookup(&self, name: &str) -> Option<Arc<dyn GroupHandle>>;
}
