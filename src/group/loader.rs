use super::types::{ByteView, GroupHandle};
use crate::router::PeerPicker;

use anyhow::Result;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, OnceLock};

/// Type-erased loader: computes the value for a key on this node.
pub type LoaderFn =
    Arc<dyn Fn(String) -> Pin<Box<dyn Future<Output = Result<ByteView>> + Send>> + Send + Sync>;

/// A cache group whose values come from a loader function.
///
/// Once peers are registered, a key owned by another node is first requested from that
/// node. If the peer cannot answer the key is computed locally instead, so a
/// partitioned or crashed owner degrades to duplicated work rather than errors.
pub struct LoaderGroup {
    name: String,
    loader: LoaderFn,
    peers: OnceLock<Arc<dyn PeerPicker>>,
}

impl LoaderGroup {
    pub fn new<F, Fut, V>(name: impl Into<String>, loader: F) -> Arc<Self>
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V>> + Send + 'static,
        V: Into<ByteView> + Send + 'static,
    {
        let loader_fn: LoaderFn = Arc::new(move |key: String| {
            let fut = loader(key);
            Box::pin(async move { fut.await.map(Into::<ByteView>::into) })
                as Pin<Box<dyn Future<Output = Result<ByteView>> + Send>>
        });

        Arc::new(Self {
            name: name.into(),
            loader: loader_fn,
            peers: OnceLock::new(),
        })
    }

    /// Attaches the peer picker. Can only be done once per group.
    pub fn register_peers(&self, peers: Arc<dyn PeerPicker>) -> Result<()> {
        self.peers
            .set(peers)
            .map_err(|_| anyhow::anyhow!("Peers already registered for group {}", self.name))
    }

    pub fn has_peers(&self) -> bool {
        self.peers.get().is_some()
    }

    async fn load(&self, key: &str) -> Result<ByteView> {
        if let Some(peers) = self.peers.get()
            && let Some(peer) = peers.pick_peer(key)
        {
            match peer.fetch(&self.name, key).await {
                Ok(bytes) => return Ok(ByteView::from(bytes)),
                Err(e) => {
                    tracing::warn!("Failed to get {}/{} from peer: {}", self.name, key, e);
                }
            }
        }

        self.load_locally(key).await
    }

    async fn load_locally(&self, key: &str) -> Result<ByteView> {
        tracing::debug!("Loading {}/{} locally", self.name, key);
        (self.loader)(key.to_string()).await
    }
}

#[async_trait]
impl GroupHandle for LoaderGroup {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, key: &str) -> Result<ByteView> {
        if key.is_empty() {
            return Err(anyhow::anyhow!("key is required"));
        }
        self.load(key).await
    }
}
