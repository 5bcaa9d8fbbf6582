use super::error::RouterError;
use crate::ring::HashFn;
use crate::ring::ring::DEFAULT_REPLICAS;
use crate::transport::protocol::{DEFAULT_BASE_PATH, DEFAULT_FETCH_TIMEOUT};

use std::fmt;
use std::time::Duration;

/// Tunables for a `PeerRouter`.
///
/// `base_path`, `replicas` and `hash_fn` must be identical on every node of a cluster.
#[derive(Clone)]
pub struct RouterOptions {
    /// Path prefix of peer traffic; must start and end with `/`.
    pub base_path: String,
    /// Virtual nodes per peer.
    pub replicas: usize,
    /// Ring hash; `None` selects the default.
    pub hash_fn: Option<HashFn>,
    /// Upper bound on a single outbound fetch.
    pub fetch_timeout: Duration,
}

impl RouterOptions {
    pub fn validate(&self) -> Result<(), RouterError> {
        if !self.base_path.starts_with('/') || !self.base_path.ends_with('/') {
            return Err(RouterError::InvalidBasePath {
                base_path: self.base_path.clone(),
            });
        }
        if self.replicas == 0 {
            return Err(RouterError::InvalidReplicas);
        }
        Ok(())
    }
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            replicas: DEFAULT_REPLICAS,
            hash_fn: None,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl fmt::Debug for RouterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterOptions")
            .field("base_path", &self.base_path)
            .field("replicas", &self.replicas)
            .field("custom_hash", &self.hash_fn.is_some())
            .field("fetch_timeout", &self.fetch_timeout)
            .finish()
    }
}
