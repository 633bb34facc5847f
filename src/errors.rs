// Daemon error taxonomy and user-friendly messages
//
// Every daemon failure is one of two kinds: a failed status read or a
// failed level write. Front-ends catch both at the boundary of the user
// action that triggered them.

use thiserror::Error;

/// Failure talking to the taper daemon
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Daemon unreachable, non-2xx, or unreadable body on `GET /status`
    #[error("failed to fetch daemon status: {reason}")]
    StatusFetch { reason: String },

    /// Daemon unreachable or non-2xx on `POST /level`
    #[error("failed to push level {level} to daemon: {reason}")]
    LevelPush { level: u8, reason: String },
}

impl DaemonError {
    pub fn status_fetch(reason: impl Into<String>) -> Self {
        DaemonError::StatusFetch {
            reason: reason.into(),
        }
    }

    pub fn level_push(level: u8, reason: impl Into<String>) -> Self {
        DaemonError::LevelPush {
            level,
            reason: reason.into(),
        }
    }
}

/// Describe a reqwest failure by kind, for logs and error reasons
pub fn describe_transport_error(err: &reqwest::Error) -> String {
    let kind = if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connection"
    } else if err.is_decode() {
        "decode"
    } else if err.is_request() {
        "request"
    } else if err.is_body() {
        "body"
    } else {
        "other"
    };
    format!("{} error: {}", kind, err)
}

/// Format a connection failure with helpful suggestions
pub fn connection_refused_error(address: &str, config_path: Option<&str>) -> String {
    let config_hint = config_path.unwrap_or("~/.taper/remote.toml");
    format!(
        "Could not reach the taper daemon at {}\n\n\
        \x1b[1;33mPossible causes:\x1b[0m\n\
        • Daemon is not running\n\
        • Another process holds the API port\n\
        • Wrong daemon address\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Start the daemon:\n\
           \x1b[36mtaper\x1b[0m\n\n\
        2. Check the configured address:\n\
           \x1b[36m[client] daemon_address\x1b[0m in {}",
        address, config_hint
    )
}
