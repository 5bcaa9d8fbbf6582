//! Peer Transport Module
//!
//! The client side of inter-node traffic: fetching a `(group, key)` value from the
//! node that owns it.
//!
//! ## Submodules
//! - **`protocol`**: Wire path layout shared by the client and the inbound handler.
//! - **`getter`**: The `PeerGetter` capability and its HTTP implementation.
//! - **`error`**: Failures of an outbound fetch.
//!
//! A fetch is a single attempt bounded by a timeout. Retrying, or falling back to a
//! local computation, is left to the caller.

pub mod error;
pub mod getter;
pub mod protocol;

pub use error::FetchError;
pub use getter::{HttpGetter, PeerGetter, fetch_or_cancel};
