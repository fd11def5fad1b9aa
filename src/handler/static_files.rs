//! Static file serving module
//!
//! Resolves request paths against the serving root and builds file
//! responses with conditional-request and range support.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, range::RangeOutcome};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Serve the file named by the request path, or 404
pub async fn serve_path(ctx: &RequestContext<'_>, root: &Path) -> Response<Full<Bytes>> {
    match load_file(root, ctx.path).await {
        Some((content, content_type)) => build_file_response(
            &content,
            content_type,
            ctx.if_none_match.as_deref(),
            ctx.is_head,
            ctx.range_header.as_deref(),
        ),
        None => http::build_404_response(),
    }
}

/// Resolve a request path inside the serving root and read it
///
/// Returns `None` for anything that is not a readable regular file within
/// the root: missing files, directories, and traversal attempts.
pub async fn load_file(root: &Path, path: &str) -> Option<(Vec<u8>, &'static str)> {
    // Strip the leading slash and neutralize parent references
    let clean_path = path.trim_start_matches('/').replace("..", "");
    let file_path = root.join(&clean_path);

    let root_canonical = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Serving root not accessible '{}': {e}",
                root.display()
            ));
            return None;
        }
    };

    // Missing files are ordinary 404s, not worth a log line
    let file_canonical = file_path.canonicalize().ok()?;
    if !file_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!("Path traversal attempt blocked: {path}"));
        return None;
    }
    // Directories are 404s too: a single-page app has no use for listings
    if !file_canonical.is_file() {
        return None;
    }

    let content = match fs::read(&file_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_canonical.display()
            ));
            return None;
        }
    };

    let content_type = mime::content_type_for(file_canonical.extension().and_then(|e| e.to_str()));

    Some((content, content_type))
}

/// Build a file response with `ETag` validation and Range support
fn build_file_response(
    data: &[u8],
    content_type: &'static str,
    if_none_match: Option<&str>,
    is_head: bool,
    range_header: Option<&str>,
) -> Response<Full<Bytes>> {
    let etag = cache::make_etag(data);
    let total_size = data.len();

    // Client copy is current
    if cache::etag_matches(if_none_match, &etag) {
        return http::build_304_response(&etag);
    }

    match http::parse_range_header(range_header, total_size) {
        RangeOutcome::Range(range) => {
            let start = range.start;
            let end = range.end_position(total_size);
            let body = if is_head {
                Bytes::new()
            } else {
                Bytes::from(data[start..=end].to_vec())
            };
            http::response::build_partial_response(body, content_type, &etag, start, end, total_size)
        }
        RangeOutcome::Unsatisfiable => http::build_416_response(total_size),
        RangeOutcome::Ignore => {
            // HEAD carries the full headers and no body
            let body = if is_head {
                Bytes::new()
            } else {
                Bytes::from(data.to_owned())
            };
            http::response::build_ok_response(body, content_type, &etag, total_size)
        }
    }
}
