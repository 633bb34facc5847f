// Badge sinks for the command handler
//
// The badge is the command handler's only visible surface: the current
// level as a decimal string, or "X" when the daemon could not be reached.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::BadgeConfig;

/// Badge text shown when the daemon is unreachable
pub const UNREACHABLE_BADGE: &str = "X";

/// Short persistent text indicator
pub trait Badge: Send + Sync {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// Prints the badge text on stdout, one line per update
#[derive(Debug, Default)]
pub struct StdoutBadge;

impl Badge for StdoutBadge {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", text).context("Failed to write badge to stdout")?;
        stdout.flush().context("Failed to flush stdout")
    }
}

/// Keeps the badge text in a file for status bars to poll
#[derive(Debug, Clone)]
pub struct FileBadge {
    path: PathBuf,
}

impl FileBadge {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling staging file: the badge's own name plus `.tmp`
    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Badge for FileBadge {
    fn set_text(&self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        // Readers never observe a half-written badge
        let tmp = self.tmp_path();
        fs::write(&tmp, format!("{}\n", text))
            .with_context(|| format!("Failed to write badge file: {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace badge file: {}", self.path.display()))
    }
}

/// Build the badge sink selected by configuration
pub fn badge_from_config(config: &BadgeConfig) -> Box<dyn Badge> {
    match &config.file {
        Some(path) => Box::new(FileBadge::new(path)),
        None => Box::new(StdoutBadge),
    }
}
