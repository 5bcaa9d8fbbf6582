use super::error::InboundError;
use super::pool::PeerRouter;
use crate::group::GroupLookup;
use crate::transport::protocol::CONTENT_TYPE_VALUE;

use axum::{
    Router,
    body::Bytes,
    extract::Extension,
    http::{HeaderName, Method, Uri, header},
};
use std::sync::Arc;

/// Builds the HTTP routes for peer traffic.
///
/// The handler is mounted as the fallback, so it sees every request and rejects those
/// outside the base path itself. Merge the result into a larger router if the node also
/// serves other endpoints.
pub fn peer_routes(router: Arc<PeerRouter>, groups: Arc<dyn GroupLookup>) -> Router {
    Router::new()
        .fallback(handle_peer_request)
        .layer(Extension(router))
        .layer(Extension(groups))
}

pub async fn handle_peer_request(
    Extension(router): Extension<Arc<PeerRouter>>,
    Extension(groups): Extension<Arc<dyn GroupLookup>>,
    method: Method,
    uri: Uri,
) -> Result<([(HeaderName, &'static str); 1], Bytes), InboundError> {
    let path = uri.path();
    tracing::debug!("[node {}] {} {}", router.self_id(), method, path);

    match router.handle_inbound(groups.as_ref(), path).await {
        Ok(view) => Ok((
            [(header::CONTENT_TYPE, CONTENT_TYPE_VALUE)],
            view.into_bytes(),
        )),
        Err(e) => {
            match &e {
                InboundError::InternalLookup { .. } => {
                    tracing::error!("[node {}] {} {}: {}", router.self_id(), method, path, e);
                }
                _ => {
                    tracing::warn!("[node {}] Rejected {} {}: {}", router.self_id(), method, path, e);
                }
            }
            Err(e)
        }
    }
}
