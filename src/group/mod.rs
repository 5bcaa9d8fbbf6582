//! Cache Group Module
//!
//! The collaborators the peer layer talks to when it has to answer for a key locally.
//!
//! ## Submodules
//! - **`types`**: `ByteView` and the `GroupHandle` / `GroupLookup` capabilities.
//! - **`registry`**: A concurrent name -> group registry handed to the inbound handler.
//! - **`loader`**: A group that resolves keys through its owning peer, falling back to a
//!   local loader function.
//!
//! Value storage and eviction live outside this crate; a `LoaderGroup` keeps no values.

pub mod loader;
pub mod registry;
pub mod types;

pub use loader::LoaderGroup;
pub use registry::GroupRegistry;
pub use types::{ByteView, GroupHandle, GroupLookup};
