use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub auth: AuthConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8888
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    Fixed,
    // Future: Table, Plugin
}

/// Catalog snapshot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PersistenceConfig {
    #[serde(default = "default_snapshot_path")]
    pub path: PathBuf,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
        }
    }
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("catalog_data.json")
}
