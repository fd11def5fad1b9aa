//! Access log format module
//!
//! Common Log Format lines with a trailing request-duration field, one
//! per completed request.

use chrono::Local;
use hyper::Version;

/// Access log entry containing request and response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method (GET, HEAD, ...)
    pub method: String,
    /// Request path as received, before any rewrite
    pub path: String,
    /// Query string (without leading ?)
    pub query: Option<String>,
    /// HTTP version
    pub version: Version,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: usize,
    /// Request processing time in microseconds
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Common Log Format plus duration:
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes $duration`
    pub fn format_clf(&self) -> String {
        format!(
            "{} - - [{}] \"{} {}{} HTTP/{}\" {} {} {}us",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.path,
            self.query
                .as_ref()
                .map(|q| format!("?{q}"))
                .unwrap_or_default(),
            version_label(self.version),
            self.status,
            self.body_bytes,
            self.request_time_us,
        )
    }
}

/// Numeric protocol label for the request line
fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2.0",
        Version::HTTP_3 => "3.0",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> AccessLogEntry {
        AccessLogEntry {
            remote_addr: "127.0.0.1".to_string(),
            time: Local::now(),
            method: "GET".to_string(),
            path: "/index.html".to_string(),
            query: None,
            version: Version::HTTP_11,
            status: 200,
            body_bytes: 13,
            request_time_us: 42,
        }
    }

    #[test]
    fn test_clf_line_shape() {
        let line = sample_entry().format_clf();
        assert!(line.starts_with("127.0.0.1 - - ["));
        assert!(line.contains("\"GET /index.html HTTP/1.1\" 200 13"));
        assert!(line.ends_with("42us"));
    }

    #[test]
    fn test_query_string_included() {
        let mut entry = sample_entry();
        entry.query = Some("v=2".to_string());
        let line = entry.format_clf();
        assert!(line.contains("\"GET /index.html?v=2 HTTP/1.1\""));
    }

    #[test]
    fn test_version_labels() {
        assert_eq!(version_label(Version::HTTP_10), "1.0");
        assert_eq!(version_label(Version::HTTP_11), "1.1");
        assert_eq!(version_label(Version::HTTP_2), "2.0");
    }
}
