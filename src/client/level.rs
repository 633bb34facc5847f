// Level and status types
//
// Level is the bounded throttle setting owned by the daemon. Every value
// that is displayed or sent goes through `clamp` first.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Throttle level in the closed range [1, 10]
///
/// The only constructors clamp, so a `Level` is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Level(u8);

impl Level {
    pub const MIN: Level = Level(1);
    pub const MAX: Level = Level(10);
    /// Level assumed when the daemon reports none
    pub const DEFAULT: Level = Level(10);

    /// Numeric value of this level
    pub fn get(self) -> u8 {
        self.0
    }

    /// Apply an integer delta and clamp the result
    pub fn step(self, delta: i64) -> Level {
        clamp(i64::from(self.0) + delta)
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::DEFAULT
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Clamp any integer into [1, 10]
pub fn clamp(value: i64) -> Level {
    if value < i64::from(Level::MIN.0) {
        Level::MIN
    } else if value > i64::from(Level::MAX.0) {
        Level::MAX
    } else {
        Level(value as u8)
    }
}

/// Throttling profile the daemon applies for the current level
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level: i64,
    #[serde(default)]
    pub latency_ms: u64,
    /// 0 means unlimited
    #[serde(default)]
    pub download_bytes_per_sec: u64,
    /// 0 means unlimited
    #[serde(default)]
    pub upload_bytes_per_sec: u64,
}

impl Profile {
    /// One-line human readable summary
    pub fn summary(&self) -> String {
        format!(
            "{} ({} latency, down {}, up {})",
            if self.name.is_empty() { "unnamed" } else { &self.name },
            format_latency(self.latency_ms),
            format_rate(self.download_bytes_per_sec),
            format_rate(self.upload_bytes_per_sec),
        )
    }
}

fn format_latency(ms: u64) -> String {
    if ms == 0 {
        "no added".to_string()
    } else {
        format!("{}ms", ms)
    }
}

fn format_rate(bytes_per_sec: u64) -> String {
    match bytes_per_sec {
        0 => "unlimited".to_string(),
        b if b >= 1_000_000 => format!("{:.1} MB/s", b as f64 / 1_000_000.0),
        b if b >= 1_000 => format!("{} kB/s", b / 1_000),
        b => format!("{} B/s", b),
    }
}

/// Response body of `GET /status`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Status {
    /// Raw level as reported; interpreted by `effective_level`
    #[serde(default)]
    pub level: Option<serde_json::Value>,
    #[serde(default)]
    pub profile: Option<Profile>,
}

impl Status {
    /// Status reporting the given raw level and no profile
    pub fn with_level(level: i64) -> Self {
        Self {
            level: Some(serde_json::Value::from(level)),
            profile: None,
        }
    }

    /// Level to act on: a missing or falsy level counts as the default (10),
    /// any other number is truncated and clamped
    pub fn effective_level(&self) -> Level {
        let Some(number) = self.level.as_ref().filter(|v| v.is_number()) else {
            return Level::DEFAULT;
        };
        if let Some(value) = number.as_i64() {
            return if value == 0 { Level::DEFAULT } else { clamp(value) };
        }
        match number.as_f64() {
            Some(value) if value != 0.0 && !value.is_nan() => clamp(value.trunc() as i64),
            _ => Level::DEFAULT,
        }
    }
}
