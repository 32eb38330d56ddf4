// Configuration module entry point
// Manages application configuration and runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, StoreConfig};

/// Command-line values that take precedence over file and environment
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(
        config_path: &str,
        overrides: &Overrides,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("EXPENSES").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("store.seed_samples", true)?
            .set_default("store.id_policy", "max_plus_one")?
            .set_override_option("server.host", overrides.host.clone())?
            .set_override_option("server.port", overrides.port.map(i64::from))?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::IdPolicy;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("does-not-exist/config", &Overrides::default()).unwrap();
        assert_eq!(cfg.http.max_body_size, 1_048_576);
        assert_eq!(cfg.performance.read_timeout, 30);
        assert!(cfg.store.seed_samples);
        assert_eq!(cfg.store.id_policy, IdPolicy::MaxPlusOne);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert!(cfg.logging.access_log_file.is_none());
    }

    #[test]
    fn test_overrides_win() {
        let overrides = Overrides {
            host: Some("0.0.0.0".to_string()),
            port: Some(9090),
        };
        let cfg = Config::load_from("does-not-exist/config", &overrides).unwrap();
        assert_eq!(cfg.get_socket_addr().unwrap().to_string(), "0.0.0.0:9090");
    }

    #[test]
    fn test_invalid_address() {
        let overrides = Overrides {
            host: Some("not a host".to_string()),
            port: None,
        };
        let cfg = Config::load_from("does-not-exist/config", &overrides).unwrap();
        assert!(cfg.get_socket_addr().is_err());
    }
}
