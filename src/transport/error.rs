use reqwest::StatusCode;

/// Errors returned by an outbound peer fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The peer answered, but not with a success status.
    #[error("peer {url} returned {status}")]
    RemoteServer {
        /// The URL that was requested.
        url: String,
        /// Status the peer replied with.
        status: StatusCode,
    },

    /// The request never completed: connection failure, timeout, DNS, truncated body.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The caller's cancellation signal fired before the fetch finished.
    #[error("fetch cancelled")]
    Cancelled,
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Status reported by the peer, if it got as far as replying.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::RemoteServer { status, .. } => Some(*status),
            _ => None,
        }
    }
}
