use super::error::FetchError;
use super::protocol;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use std::future::Future;
use std::time::Duration;

/// The capability to fetch `(group, key)` from one specific remote node.
///
/// The target node is fixed by the implementor.
#[async_trait]
pub trait PeerGetter: Send + Sync {
    async fn fetch(&self, group: &str, key: &str) -> Result<Bytes, FetchError>;
}

/// HTTP client bound to a single peer.
///
/// Immutable once built; the router creates a fresh set of these every time the peer
/// list is replaced. Clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpGetter {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpGetter {
    /// `base_url` is the peer address followed by the base path, e.g.
    /// `http://10.0.0.2:8008/_geecache/`.
    pub fn new(base_url: impl Into<String>, client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            client,
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl PeerGetter for HttpGetter {
    async fn fetch(&self, group: &str, key: &str) -> Result<Bytes, FetchError> {
        let url = protocol::peer_url(&self.base_url, group, key);
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?;

        // Only 200 carries a value; 204/206 and friends would hand back an empty or partial one
        let status = response.status();
        if status != StatusCode::OK {
            // Drain the body so the connection can be reused.
            if let Err(e) = response.bytes().await {
                tracing::debug!("Discarding error body from {} failed: {}", url, e);
            }
            return Err(FetchError::RemoteServer { url, status });
        }

        let body = response.bytes().await?;
        Ok(body)
    }
}

/// Runs a fetch until it completes or `cancel` resolves, whichever comes first.
///
/// On cancellation the in-flight request is dropped, which closes its connection.
pub async fn fetch_or_cancel<C>(
    getter: &dyn PeerGetter,
    group: &str,
    key: &str,
    cancel: C,
) -> Result<Bytes, FetchError>
where
    C: Future<Output = ()>,
{
    tokio::select! {
        result = getter.fetch(group, key) => result,
        _ = cancel => Err(FetchError::Cancelled),
    }
}
