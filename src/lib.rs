//! Distributed Cache Peer Layer
//!
//! Routing and inter-node transport for a sharded key-value cache. Given a key, every
//! node agrees on which cluster member owns it; non-owners fetch the value from the
//! owner over HTTP.
//!
//! ## Architecture Modules
//! - **`ring`**: Consistent hashing with virtual nodes. Maps a key to its owning node.
//! - **`transport`**: The outbound side. A `PeerGetter` fetches `(group, key)` from one
//!   peer over HTTP; `protocol` fixes the wire path layout.
//! - **`router`**: `PeerRouter` holds this node's identity and the current peer set,
//!   picks the peer for a key, and serves the inbound side of the protocol.
//! - **`group`**: The cache groups the inbound handler answers from, and a loader-backed
//!   group that resolves keys through their owner.

pub mod group;
pub mod ring;
pub mod router;
pub mod transport;
