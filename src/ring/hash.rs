use std::sync::Arc;

/// A pluggable ring hash: raw bytes in, ring position out.
///
/// Every node in a cluster must use the same function, otherwise they will
/// disagree on key ownership.
pub type HashFn = Arc<dyn Fn(&[u8]) -> u32 + Send + Sync>;

/// xxHash32 with a zero seed.
pub fn default_hash(data: &[u8]) -> u32 {
    xxhash_rust::xxh32::xxh32(data, 0)
}

pub(crate) fn default_hash_fn() -> HashFn {
    Arc::new(default_hash)
}
