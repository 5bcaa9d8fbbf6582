//! Peer Wire Protocol
//!
//! Requests are plain HTTP `GET`s addressed to
//! `<base_url><percent-encoded group>/<percent-encoded key>`, where `base_url` is the
//! peer's address followed by the cluster-wide base path.
//!
//! A successful reply carries the raw value bytes with an `application/octet-stream`
//! content type. Errors are `text/plain`: 400 for a malformed path, 404 for an unknown
//! group and 500 for a failed local lookup.

use std::borrow::Cow;
use std::time::Duration;

/// Default path prefix for peer traffic. Every cluster member must use the same one.
pub const DEFAULT_BASE_PATH: &str = "/_geecache/";
/// Default upper bound on a single peer round trip.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(3);

pub const CONTENT_TYPE_VALUE: &str = "application/octet-stream";
pub const CONTENT_TYPE_ERROR: &str = "text/plain; charset=utf-8";

/// Builds the request URL for `(group, key)` on the peer at `base_url`.
///
/// Both segments are percent-encoded so that `/`, `?`, `%` and friends in a name
/// cannot change the shape of the path.
pub fn peer_url(base_url: &str, group: &str, key: &str) -> String {
    format!(
        "{}{}/{}",
        base_url,
        urlencoding::encode(group),
        urlencoding::encode(key)
    )
}

/// Splits the part of a request path after the base path into `(group, key)`.
///
/// The split happens on the raw (still encoded) path, so an encoded `/` inside a key
/// never counts as a separator. Returns `None` unless there are exactly two segments
/// and both decode to valid UTF-8.
pub fn split_peer_path(rest: &str) -> Option<(String, String)> {
    let mut segments = rest.split('/');
    let group = segments.next()?;
    let key = segments.next()?;
    if segments.next().is_some() {
        return None;
    }

    let group = decode_segment(group)?;
    let key = decode_segment(key)?;
    Some((group.into_owned(), key.into_owned()))
}

// `+` is a literal character in a path, not a space.
fn decode_segment(segment: &str) -> Option<Cow<'_, str>> {
    urlencoding::decode(segment).ok()
}
