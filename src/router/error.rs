use crate::transport::protocol::CONTENT_TYPE_ERROR;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Invalid router configuration.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("base path must start and end with '/': {base_path:?}")]
    InvalidBasePath { base_path: String },

    #[error("replica count must be greater than zero")]
    InvalidReplicas,
}

/// Reasons an inbound peer request is rejected.
#[derive(Debug, thiserror::Error)]
pub enum InboundError {
    /// The request is outside the base path this router serves.
    #[error("unexpected path: {path}")]
    UnexpectedPath { path: String },

    /// The path does not decompose into exactly `<group>/<key>`.
    #[error("bad request: {path}")]
    MalformedRequest { path: String },

    #[error("no such group: {name}")]
    UnknownGroup { name: String },

    /// The local group failed to produce the value.
    #[error("{message}")]
    InternalLookup {
        group: String,
        key: String,
        message: String,
    },
}

impl InboundError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnexpectedPath { .. } => StatusCode::BAD_REQUEST,
            Self::MalformedRequest { .. } => StatusCode::BAD_REQUEST,
            Self::UnknownGroup { .. } => StatusCode::NOT_FOUND,
            Self::InternalLookup { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for InboundError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            [(header::CONTENT_TYPE, CONTENT_TYPE_ERROR)],
            self.to_string(),
        )
            .into_response()
    }
}
