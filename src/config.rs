//! Process configuration for the ticketd binary.

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use anyhow::Context;
use serde_json::{json, Value};

/// Configuration for the HTTP server, read from the environment.
///
/// - `TICKETD_HOST`: bind address (default 127.0.0.1)
/// - `TICKETD_PORT`: listen port (default 8080)
/// - `TICKETD_SEED`: path to a JSON object used as initial store data
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub seed_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            seed_path: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("TICKETD_HOST")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(defaults.host);
        let port = std::env::var("TICKETD_PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(defaults.port);
        let seed_path = std::env::var("TICKETD_SEED").ok().map(PathBuf::from);

        Self {
            host,
            port,
            seed_path,
        }
    }

    /// Initial store contents: the configured seed file, or the built-in
    /// demo record when none is configured.
    pub fn initial_data(&self) -> anyhow::Result<Value> {
        match &self.seed_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read seed file {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("Failed to parse seed file {}", path.display()))
            }
            None => Ok(demo_seed()),
        }
    }
}

/// One pending demo request, so a fresh instance has something to serve.
pub fn demo_seed() -> Value {
    json!({
        "requests": [
            {
                "id": "123",
                "message": "I cannot access my training dashboard",
                "user": {
                    "fullName": "Victor Dupuy",
                    "email": "victor@example.com",
                    "age": 28,
                    "role": "dev",
                },
                "createdAt": chrono::Utc::now().timestamp_millis(),
                "state": "pending",
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_seed_is_valid_initial_data() {
        let store = crate::store::PathStore::new(Some(demo_seed())).unwrap();
        assert_eq!(store.keys(), vec!["requests"]);
    }

    #[test]
    fn defaults_are_loopback() {
        let config = ServerConfig::default();
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.port, 8080);
        assert!(config.seed_path.is_none());
    }
}
