// Configuration module entry point
// Loads the typed configuration and resolves the serving root

mod state;
mod types;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

// Re-export public types
pub use state::AppState;
pub use types::{Config, CorsConfig, FilesConfig, LoggingConfig, PerformanceConfig, ServerConfig};

impl Config {
    /// Load configuration from the specified file path (without extension)
    ///
    /// The file and the `DEVSERVE_*` environment variables are both optional;
    /// with neither present, the defaults reproduce the reference behavior:
    /// port 8000 on all interfaces, `index.html` as the default document,
    /// wildcard CORS for development.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("DEVSERVE"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("files.index", "index.html")?
            .set_default("cors.allow_origin", "*")?
            .set_default("cors.allow_methods", "GET, POST, OPTIONS")?
            .set_default("cors.allow_headers", "Content-Type")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Resolve the directory files are served from
    ///
    /// An explicit `files.root` wins; otherwise it is the directory
    /// containing the executable, so the server can be dropped next to the
    /// app it serves and started without arguments.
    pub fn resolve_root(&self) -> std::io::Result<PathBuf> {
        match &self.files.root {
            Some(root) => Ok(PathBuf::from(root)),
            None => {
                let exe = std::env::current_exe()?;
                exe.parent().map(Path::to_path_buf).ok_or_else(|| {
                    std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "Executable has no parent directory",
                    )
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn defaults_match_reference_behavior() {
        let cfg = Config::load_from("devserve-test-missing-config").unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.server.workers, None);
        assert_eq!(cfg.files.root, None);
        assert_eq!(cfg.files.index, "index.html");
        assert_eq!(cfg.cors.allow_origin, "*");
        assert_eq!(cfg.cors.allow_methods, "GET, POST, OPTIONS");
        assert_eq!(cfg.cors.allow_headers, "Content-Type");
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.performance.max_connections, None);
    }

    #[test]
    fn socket_addr_from_defaults() {
        let cfg = Config::load_from("devserve-test-missing-config").unwrap();
        let addr = cfg.get_socket_addr().unwrap();
        assert_eq!(addr.port(), 8000);
        assert!(addr.ip().is_unspecified());
    }
}
