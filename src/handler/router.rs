//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, the root
//! path rewrite, static-file dispatch, and response decoration.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http::{self, cors};
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::borrow::Cow;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context for the static-file layer
pub struct RequestContext<'a> {
    /// Effective request path, after any root rewrite
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub range_header: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let received = Instant::now();
    let method = req.method();
    let path = req.uri().path();
    let is_head = *method == Method::HEAD;

    // The rewrite applies to GET only, mirroring the reference server:
    // HEAD / and friends go to the file layer untouched
    let effective = effective_path(method, path, &state.config.files.index);

    let mut response = match serve_method(method) {
        MethodOutcome::Serve => {
            let ctx = RequestContext {
                path: &effective,
                is_head,
                if_none_match: header_string(&req, "if-none-match"),
                range_header: header_string(&req, "range"),
            };
            static_files::serve_path(&ctx, &state.root).await
        }
        MethodOutcome::Preflight => http::build_options_response(),
        MethodOutcome::Reject => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::build_405_response()
        }
    };

    // Every response passes through the decoration policy, whatever its
    // status code
    cors::decorate_response(&mut response, &state.config.cors, &effective);

    if state.config.logging.access_log {
        let entry = AccessLogEntry {
            remote_addr: peer_addr.ip().to_string(),
            time: chrono::Local::now(),
            method: req.method().to_string(),
            path: req.uri().path().to_string(),
            query: req.uri().query().map(ToString::to_string),
            version: req.version(),
            status: response.status().as_u16(),
            body_bytes: usize::try_from(response.body().size_hint().exact().unwrap_or(0))
                .unwrap_or(usize::MAX),
            request_time_us: u64::try_from(received.elapsed().as_micros()).unwrap_or(u64::MAX),
        };
        logger::log_access(&entry);
    }

    Ok(response)
}

/// What to do with a request method
enum MethodOutcome {
    /// GET and HEAD reach the file layer
    Serve,
    /// OPTIONS gets an empty 204
    Preflight,
    /// Everything else is a 405
    Reject,
}

fn serve_method(method: &Method) -> MethodOutcome {
    match method {
        &Method::GET | &Method::HEAD => MethodOutcome::Serve,
        &Method::OPTIONS => MethodOutcome::Preflight,
        _ => MethodOutcome::Reject,
    }
}

/// Map `GET /` to the default document; every other request is untouched
fn effective_path<'a>(method: &Method, path: &'a str, index: &str) -> Cow<'a, str> {
    if *method == Method::GET && path == "/" {
        Cow::Owned(format!("/{index}"))
    } else {
        Cow::Borrowed(path)
    }
}

/// Extract a request header as an owned string, skipping non-UTF8 values
fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)?
        .to_str()
        .ok()
        .map(ToString::to_string)
}
