// Signal handling module
//
// SIGINT (Ctrl+C) and SIGTERM both stop the accept loop; the listener is
// released on the way out. In-flight requests are not drained.

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Shutdown signal state
pub struct ShutdownSignal {
    /// Notified once when shutdown is requested
    pub shutdown: Arc<Notify>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(Notify::new()),
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Start the shutdown signal listener (Unix)
///
/// Spawns a background task that waits for SIGINT or SIGTERM and notifies
/// the accept loop.
#[cfg(unix)]
pub fn start_signal_handler(handler: Arc<ShutdownSignal>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                logger::log_error(&format!("Failed to register SIGTERM handler: {e}"));
                return;
            }
        };
        let mut sigint = match signal(SignalKind::interrupt()) {
            Ok(s) => s,
            Err(e) => {
                logger::log_error(&format!("Failed to register SIGINT handler: {e}"));
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }

        // notify_one stores a permit, so the accept loop sees the signal
        // even if it is not parked on notified() at this instant
        handler.shutdown.notify_one();
    });
}

/// Fallback for non-Unix platforms - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(handler: Arc<ShutdownSignal>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handler.shutdown.notify_one();
        }
    });
}
