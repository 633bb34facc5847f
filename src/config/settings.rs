// Configuration structs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default daemon API address
pub const DEFAULT_DAEMON_ADDRESS: &str = "127.0.0.1:5507";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Force debug-level logging
    #[serde(default)]
    pub debug_logging: bool,

    /// Daemon connection settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Where the command handler shows its badge
    #[serde(default)]
    pub badge: BadgeConfig,
}

/// How to reach the daemon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Daemon API address (host:port)
    #[serde(default = "default_daemon_address")]
    pub daemon_address: String,

    /// Per-request timeout in seconds; transport default when unset
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            daemon_address: default_daemon_address(),
            timeout_seconds: None,
        }
    }
}

fn default_daemon_address() -> String {
    DEFAULT_DAEMON_ADDRESS.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeConfig {
    /// Write badge text to this file instead of stdout
    #[serde(default)]
    pub file: Option<PathBuf>,
}
