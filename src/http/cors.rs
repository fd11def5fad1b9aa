//! Response decoration module
//!
//! Appends the development CORS headers to every outgoing response and
//! forces the JavaScript content type for script requests, so a browser
//! loading the app from another origin can fetch and execute ES modules.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{
    HeaderMap, HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
};
use hyper::Response;

use crate::config::CorsConfig;
use crate::logger;

/// Request path suffixes that force the JavaScript content type
const SCRIPT_SUFFIXES: [&str; 2] = [".js", ".mjs"];

const JAVASCRIPT_CONTENT_TYPE: &str = "application/javascript";

/// Append the CORS headers and, for script paths, the JavaScript content
/// type to a finished response.
///
/// The content-type override is appended after whatever type the
/// file-serving layer already set; clients that honor the last occurrence
/// see `application/javascript`. The policy is a function of the request
/// path alone, so every status code gets it, including a 404 for a
/// missing script file.
pub fn decorate_response(
    response: &mut Response<Full<Bytes>>,
    cors: &CorsConfig,
    effective_path: &str,
) {
    let headers = response.headers_mut();

    append_header(headers, ACCESS_CONTROL_ALLOW_ORIGIN, &cors.allow_origin);
    append_header(headers, ACCESS_CONTROL_ALLOW_METHODS, &cors.allow_methods);
    append_header(headers, ACCESS_CONTROL_ALLOW_HEADERS, &cors.allow_headers);

    if is_script_path(effective_path) {
        headers.append(
            CONTENT_TYPE,
            HeaderValue::from_static(JAVASCRIPT_CONTENT_TYPE),
        );
    }
}

/// Whether the request path names a classic script or an ES module
pub fn is_script_path(path: &str) -> bool {
    SCRIPT_SUFFIXES.iter().any(|suffix| path.ends_with(suffix))
}

/// Append a configured header value, skipping values that are not legal
/// header text rather than failing the whole response
fn append_header(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(v) => {
            headers.append(name, v);
        }
        Err(e) => logger::log_warning(&format!("Skipping invalid value for header {name}: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_policy() -> CorsConfig {
        CorsConfig {
            allow_origin: "*".to_string(),
            allow_methods: "GET, POST, OPTIONS".to_string(),
            allow_headers: "Content-Type".to_string(),
        }
    }

    fn html_response(status: u16) -> Response<Full<Bytes>> {
        Response::builder()
            .status(status)
            .header(CONTENT_TYPE, "text/html; charset=utf-8")
            .body(Full::new(Bytes::from("<html></html>")))
            .unwrap()
    }

    #[test]
    fn test_cors_headers_appended() {
        let mut response = html_response(200);
        decorate_response(&mut response, &test_policy(), "/index.html");

        let headers = response.headers();
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, OPTIONS");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }

    #[test]
    fn test_error_responses_also_decorated() {
        let mut response = Response::builder()
            .status(404)
            .body(Full::new(Bytes::from("404 Not Found")))
            .unwrap();
        decorate_response(&mut response, &test_policy(), "/missing.txt");

        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(response.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_script_path_gets_content_type_override() {
        let mut response = Response::builder()
            .status(200)
            .header(CONTENT_TYPE, "application/javascript")
            .body(Full::new(Bytes::from("export {};")))
            .unwrap();
        decorate_response(&mut response, &test_policy(), "/app.mjs");

        // Appended, not replaced: the override is the last occurrence
        let values: Vec<_> = response.headers().get_all(CONTENT_TYPE).iter().collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values[1], "application/javascript");
    }

    #[test]
    fn test_missing_script_still_gets_override() {
        let mut response = Response::builder()
            .status(404)
            .header(CONTENT_TYPE, "text/plain")
            .body(Full::new(Bytes::from("404 Not Found")))
            .unwrap();
        decorate_response(&mut response, &test_policy(), "/gone.js");

        let values: Vec<_> = response.headers().get_all(CONTENT_TYPE).iter().collect();
        assert_eq!(values.last().unwrap().as_bytes(), b"application/javascript");
    }

    #[test]
    fn test_non_script_paths_untouched() {
        let mut response = html_response(200);
        decorate_response(&mut response, &test_policy(), "/style.css");

        let values: Vec<_> = response.headers().get_all(CONTENT_TYPE).iter().collect();
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_is_script_path() {
        assert!(is_script_path("/app.js"));
        assert!(is_script_path("/modules/storage.mjs"));
        assert!(!is_script_path("/app.json"));
        assert!(!is_script_path("/js"));
        assert!(!is_script_path("/app.JS"));
    }
}
