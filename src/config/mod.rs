use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

use crate::cli::Cli;
use crate::store::User;

/// Process configuration, built once in `main` and handed to the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub routing: RoutingConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub read_timeout_secs: u64,
    pub write_timeout_secs: u64,
    /// Keep-alive connections waiting this long for a new request are closed
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Answer 405 instead of 404 when a known path is hit with the wrong method
    pub strict_method_status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub seed_users: Vec<User>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 1234,
            read_timeout_secs: 5,
            write_timeout_secs: 5,
            idle_timeout_secs: 10,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_users: vec![User::new("admin", "admin", true)],
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        self.bind_addr()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid listen address {}: {}", self.bind_addr(), e))
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl AppConfig {
    /// Apply command-line overrides on top of the defaults
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_addr(), "0.0.0.0:1234");
        assert_eq!(config.server.read_timeout(), Duration::from_secs(5));
        assert_eq!(config.server.write_timeout(), Duration::from_secs(5));
        assert_eq!(config.server.idle_timeout(), Duration::from_secs(10));
        assert!(!config.routing.strict_method_status);
        assert_eq!(config.store.seed_users.len(), 1);
        assert!(config.store.seed_users[0].admin);
    }

    #[test]
    fn test_cli_port_override() {
        let cli = Cli::parse_from(["restdb-api", "8080"]);
        let config = AppConfig::default().with_cli(&cli);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_cli_without_port_keeps_default() {
        let cli = Cli::parse_from(["restdb-api"]);
        let config = AppConfig::default().with_cli(&cli);
        assert_eq!(config.server.port, 1234);
    }
}
