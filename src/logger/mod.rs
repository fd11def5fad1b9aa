//! Logger module
//!
//! Logging utilities for the development server: startup banner, access
//! lines in Common Log Format, and warning/error output on stderr.

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;
use std::path::Path;

use crate::config::Config;

pub fn log_server_start(addr: &SocketAddr, root: &Path, config: &Config) {
    println!("======================================");
    println!("Development server running at: http://{addr}/");
    println!("Serving files from: {}", root.display());
    println!("Log level: {}", config.logging.level);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("Press Ctrl+C to stop the server");
    println!("======================================\n");
}

pub fn log_server_stopped() {
    println!("\nServer stopped.");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

/// Log a completed request in Common Log Format
pub fn log_access(entry: &AccessLogEntry) {
    println!("{}", entry.format_clf());
}
