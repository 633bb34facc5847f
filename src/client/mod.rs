// HTTP client for daemon communication
//
// Shared by the command handler and the interactive panel: the level
// type and clamp, status decoding, and the two daemon calls.

mod daemon_client;
mod level;

pub use daemon_client::{DaemonClient, DaemonConfig, LevelControl};
pub use level::{clamp, Level, Profile, Status};
