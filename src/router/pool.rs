use super::error::{InboundError, RouterError};
use super::options::RouterOptions;
use super::picker::PeerPicker;
use crate::group::{ByteView, GroupLookup};
use crate::ring::hash::default_hash_fn;
use crate::ring::{HashFn, HashRing, NodeId};
use crate::transport::protocol;
use crate::transport::{HttpGetter, PeerGetter};

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

/// The ring and the clients for the nodes on it. Only ever replaced as a whole.
#[derive(Debug)]
struct PeerSet {
    ring: HashRing,
    getters: HashMap<NodeId, Arc<HttpGetter>>,
}

/// Routes keys to their owning node and serves peer requests for this node.
///
/// Constructed once per process. `set_peers` may be called any number of times
/// afterwards; lookups running concurrently observe either the old or the new peer set
/// in full.
pub struct PeerRouter {
    self_id: NodeId,
    base_path: String,
    replicas: usize,
    hash_fn: HashFn,
    fetch_timeout: Duration,
    client: reqwest::Client,
    peers: RwLock<PeerSet>,
}

impl PeerRouter {
    /// Creates a router with the default options and no peers.
    pub fn new(self_id: impl Into<NodeId>) -> Self {
        Self::build(self_id.into(), RouterOptions::default())
    }

    pub fn with_options(
        self_id: impl Into<NodeId>,
        options: RouterOptions,
    ) -> Result<Self, RouterError> {
        options.validate()?;
        Ok(Self::build(self_id.into(), options))
    }

    fn build(self_id: NodeId, options: RouterOptions) -> Self {
        let hash_fn = options.hash_fn.unwrap_or_else(default_hash_fn);
        let peers = PeerSet {
            ring: HashRing::with_hash(options.replicas, hash_fn.clone()),
            getters: HashMap::new(),
        };

        Self {
            self_id,
            base_path: options.base_path,
            replicas: options.replicas,
            hash_fn,
            fetch_timeout: options.fetch_timeout,
            client: reqwest::Client::new(),
            peers: RwLock::new(peers),
        }
    }

    pub fn self_id(&self) -> &NodeId {
        &self.self_id
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Replaces the cluster membership.
    ///
    /// A fresh ring and a fresh client per peer are built outside the lock, then
    /// installed together under the write lock.
    pub fn set_peers<I, N>(&self, peers: I)
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeId>,
    {
        let peers: Vec<NodeId> = peers.into_iter().map(Into::into).collect();

        let mut ring = HashRing::with_hash(self.replicas, self.hash_fn.clone());
        ring.add_nodes(peers.iter().cloned());

        let getters = peers
            .iter()
            .map(|peer| {
                let getter = HttpGetter::new(
                    format!("{}{}", peer, self.base_path),
                    self.client.clone(),
                    self.fetch_timeout,
                );
                (peer.clone(), Arc::new(getter))
            })
            .collect();

        let next = PeerSet { ring, getters };
        *self.peers.write().unwrap_or_else(PoisonError::into_inner) = next;

        tracing::info!("[node {}] Peer set replaced: {} peers", self.self_id, peers.len());
    }

    /// Returns the client for the peer owning `key`.
    ///
    /// `None` means the key is served locally: no peers are configured, or this node
    /// is the owner.
    pub fn pick_peer(&self, key: &str) -> Option<Arc<HttpGetter>> {
        let peers = self.peers.read().unwrap_or_else(PoisonError::into_inner);

        let owner = peers.ring.owner(key)?;
        if owner == &self.self_id {
            return None;
        }

        tracing::debug!("[node {}] Pick peer {} for {}", self.self_id, owner, key);
        peers.getters.get(owner).cloned()
    }

    /// Currently configured peers, sorted.
    pub fn peers(&self) -> Vec<NodeId> {
        let peers = self.peers.read().unwrap_or_else(PoisonError::into_inner);
        peers.ring.nodes().cloned().collect()
    }

    /// Answers a peer request for `path` from the local groups.
    ///
    /// Never panics on bad input: a path outside the base path, a malformed path, an
    /// unknown group and a failed lookup all come back as `InboundError`.
    pub async fn handle_inbound(
        &self,
        groups: &dyn GroupLookup,
        path: &str,
    ) -> Result<ByteView, InboundError> {
        let rest = path
            .strip_prefix(self.base_path.as_str())
            .ok_or_else(|| InboundError::UnexpectedPath {
                path: path.to_string(),
            })?;

        let (group_name, key) =
            protocol::split_peer_path(rest).ok_or_else(|| InboundError::MalformedRequest {
                path: path.to_string(),
            })?;

        let group = groups
            .lookup(&group_name)
            .ok_or_else(|| InboundError::UnknownGroup {
                name: group_name.clone(),
            })?;

        group
            .get(&key)
            .await
            .map_err(|e| InboundError::InternalLookup {
                group: group_name,
                key,
                message: format!("{:#}", e),
            })
    }
}

impl PeerPicker for PeerRouter {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>> {
        PeerRouter::pick_peer(self, key).map(|getter| getter as Arc<dyn PeerGetter>)
    }
}
