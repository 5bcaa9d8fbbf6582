//! Peer Routing Module
//!
//! Decides, for every cache miss, whether the key belongs to this node or to a peer,
//! and answers the fetch requests other nodes send here.
//!
//! ## Core Concepts
//! - **Peer set**: The hash ring and the per-peer HTTP clients are built together and
//!   swapped in together, so a lookup never sees a ring node without a client.
//! - **Self ownership**: Keys owned by this node are never routed to the network.
//! - **Inbound**: Requests under the base path are decoded into `(group, key)` and
//!   answered from the local group registry.

pub mod error;
pub mod handlers;
pub mod options;
pub mod picker;
pub mod pool;

pub use error::{InboundError, RouterError};
pub use handlers::{handle_peer_request, peer_routes};
pub use options::RouterOptions;
pub use picker::PeerPicker;
pub use pool::PeerRouter;
