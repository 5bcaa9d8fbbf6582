//! Consistent Hashing Module
//!
//! Maps cache keys onto cluster nodes so that every member of the cluster,
//! given the same peer list, agrees on which node owns a key.
//!
//! ## Core Concepts
//! - **Virtual nodes**: Each physical node is placed on the ring `replicas` times,
//!   smoothing the key distribution between nodes.
//! - **Ownership**: A key belongs to the first virtual node clockwise from the key's hash.
//! - **Minimal disruption**: Adding or removing a node only moves the keys that land on
//!   that node's arcs; all other keys keep their owner.

pub mod hash;
pub mod ring;
pub mod types;

pub use hash::{HashFn, default_hash};
pub use ring::HashRing;
pub use types::NodeId;

#[cfg(test)]
mod tests;
