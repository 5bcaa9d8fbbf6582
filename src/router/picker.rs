use crate::transport::PeerGetter;

use std::sync::Arc;

/// Locates the peer that owns a key.
///
/// Returns `None` when the key should be served locally: either no peers are
/// configured or this node is the owner.
pub trait PeerPicker: Send + Sync {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>>;
}
