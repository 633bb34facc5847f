// Daemon client implementation
//
// HTTP client for the taper daemon API. Two calls: read the status,
// push a new level. Failures are normalized into DaemonError.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::level::{Level, Status};
use crate::config::{ClientConfig, DEFAULT_DAEMON_ADDRESS};
use crate::errors::{describe_transport_error, DaemonError};

/// Remote side of the level synchronization protocol
///
/// Both front-ends are generic over this so they can be driven by the
/// HTTP client or by an in-memory double in tests.
#[async_trait]
pub trait LevelControl: Send + Sync {
    /// Read the daemon's current status
    async fn fetch_status(&self) -> Result<Status, DaemonError>;

    /// Write a new level; the reply body is ignored
    async fn push_level(&self, level: Level) -> Result<(), DaemonError>;

    /// Read the daemon's effective level (missing/falsy counts as 10)
    async fn get_level(&self) -> Result<Level, DaemonError> {
        Ok(self.fetch_status().await?.effective_level())
    }
}

/// Configuration for daemon connection
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Daemon bind address (e.g., "127.0.0.1:5507")
    pub bind_address: String,
    /// Request timeout; None keeps the transport default
    pub timeout: Option<Duration>,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_DAEMON_ADDRESS.to_string(),
            timeout: None,
        }
    }
}

impl DaemonConfig {
    /// Create DaemonConfig from ClientConfig settings
    pub fn from_client_config(client_config: &ClientConfig) -> Self {
        Self {
            bind_address: client_config.daemon_address.clone(),
            timeout: client_config.timeout_seconds.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Serialize)]
struct LevelRequest {
    level: u8,
}

/// HTTP client for the taper daemon
pub struct DaemonClient {
    base_url: String,
    client: Client,
}

impl DaemonClient {
    /// Build a client; does not contact the daemon
    pub fn new(config: DaemonConfig) -> Result<Self> {
        let base_url = if config.bind_address.starts_with("http://")
            || config.bind_address.starts_with("https://")
        {
            config.bind_address.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", config.bind_address)
        };

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { base_url, client })
    }

    /// Create a client with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(DaemonConfig::default())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl LevelControl for DaemonClient {
    async fn fetch_status(&self) -> Result<Status, DaemonError> {
        let url = format!("{}/status", self.base_url);
        debug!(url = %url, "Fetching daemon status");

        let response = self.client.get(&url).send().await.map_err(|e| {
            let reason = describe_transport_error(&e);
            warn!(url = %url, "Status request failed: {}", reason);
            DaemonError::status_fetch(reason)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DaemonError::status_fetch(format!(
                "daemon returned {}",
                status
            )));
        }

        response
            .json::<Status>()
            .await
            .map_err(|e| DaemonError::status_fetch(describe_transport_error(&e)))
    }

    async fn push_level(&self, level: Level) -> Result<(), DaemonError> {
        let url = format!("{}/level", self.base_url);
        debug!(url = %url, level = level.get(), "Pushing level");

        let response = self
            .client
            .post(&url)
            .json(&LevelRequest { level: level.get() })
            .send()
            .await
            .map_err(|e| {
                let reason = describe_transport_error(&e);
                warn!(url = %url, "Level request failed: {}", reason);
                DaemonError::level_push(level.get(), reason)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DaemonError::level_push(
                level.get(),
                format!("daemon returned {}", status),
            ));
        }

        Ok(())
    }
}
