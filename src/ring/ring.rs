use super::hash::{HashFn, default_hash_fn};
use super::types::NodeId;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Default number of virtual nodes per physical node.
pub const DEFAULT_REPLICAS: usize = 50;

/// Consistent hashing ring.
///
/// Each node contributes `replicas` points, the hash of `"{i}{node_id}"` for
/// `i` in `0..replicas`. The `BTreeMap` doubles as the sorted point set and
/// the point -> node lookup table.
///
/// The replica count and hash function are fixed at construction; a topology
/// change builds a new ring rather than reconfiguring this one.
#[derive(Clone)]
pub struct HashRing {
    replicas: usize,
    hash: HashFn,
    points: BTreeMap<u32, NodeId>,
    nodes: BTreeSet<NodeId>,
}

impl HashRing {
    /// Creates an empty ring using the default hash function.
    pub fn new(replicas: usize) -> Self {
        Self::with_hash(replicas, default_hash_fn())
    }

    /// Creates an empty ring with a custom hash function.
    pub fn with_hash(replicas: usize, hash: HashFn) -> Self {
        Self {
            // every node needs at least one point to be reachable
            replicas: replicas.max(1),
            hash,
            points: BTreeMap::new(),
            nodes: BTreeSet::new(),
        }
    }

    /// Places every given node on the ring.
    ///
    /// Re-adding a node that is already present rewrites the same points, so
    /// the call is idempotent. On the (unlikely) collision of two nodes' points
    /// the last registration wins.
    pub fn add_nodes<I, N>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeId>,
    {
        for node in nodes {
            let node = node.into();
            for i in 0..self.replicas {
                let point = self.vnode_point(&node, i);
                self.points.insert(point, node.clone());
            }
            tracing::debug!("Added node {} to ring ({} points)", node, self.replicas);
            self.nodes.insert(node);
        }
    }

    /// Removes a node's points from the ring.
    ///
    /// Points that a later registration took over are left alone.
    pub fn remove_node(&mut self, node: &NodeId) {
        if !self.nodes.remove(node) {
            return;
        }
        for i in 0..self.replicas {
            let point = self.vnode_point(node, i);
            if self.points.get(&point) == Some(node) {
                self.points.remove(&point);
            }
        }
        tracing::debug!("Removed node {} from ring", node);
    }

    /// Returns the node owning `key`, or `None` when the ring is empty.
    ///
    /// The owner is the node of the smallest point `>= hash(key)`, wrapping
    /// around to the first point of the ring.
    pub fn owner(&self, key: &str) -> Option<&NodeId> {
        if self.points.is_empty() {
            return None;
        }

        let hash = (self.hash)(key.as_bytes());

        self.points
            .range(hash..)
            .next()
            .or_else(|| self.points.iter().next())
            .map(|(_, node)| node)
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn vnode_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, node: &NodeId) -> bool {
        self.nodes.contains(node)
    }

    /// All physical nodes on the ring, in sorted order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter()
    }

    fn vnode_point(&self, node: &NodeId, replica: usize) -> u32 {
        let label = format!("{}{}", replica, node);
        (self.hash)(label.as_bytes())
    }
}

impl Default for HashRing {
    fn default() -> Self {
        Self::new(DEFAULT_REPLICAS)
    }
}

impl fmt::Debug for HashRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRing")
            .field("replicas", &self.replicas)
            .field("nodes", &self.nodes)
            .field("points", &self.points.len())
            .finish()
    }
}
