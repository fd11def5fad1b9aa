//! HTTP cache validation module
//!
//! `ETag` generation and `If-None-Match` handling. A dev server never
//! wants stale responses, so file responses are marked `no-cache` and the
//! validator only short-circuits byte-identical content to 304.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Compute a quoted `ETag` from file content
///
/// Content-addressed, so the tag changes exactly when the file does.
pub fn make_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// Check whether a client's `If-None-Match` header matches the `ETag`
///
/// Handles a single tag, a comma-separated list, and the `*` wildcard.
/// A match means the client's copy is current and a 304 should be sent.
pub fn etag_matches(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|header| {
        header
            .split(',')
            .any(|candidate| candidate.trim() == etag || candidate.trim() == "*")
    })
}
