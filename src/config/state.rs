// Application state module
// Read-only state shared by every connection

use std::path::PathBuf;

use super::types::Config;

/// Application state
///
/// Built once at startup and shared via `Arc`. Nothing here changes while
/// the server runs, so request handling never takes a lock.
pub struct AppState {
    pub config: Config,
    /// Canonicalized serving root, anchor for the traversal guard
    pub root: PathBuf,
}

impl AppState {
    pub const fn new(config: Config, root: PathBuf) -> Self {
        Self { config, root }
    }
}
