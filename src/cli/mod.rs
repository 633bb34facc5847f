// CLI module
// Front-ends: the command handler (badge) and the interactive panel (TUI)

pub mod badge;
mod commands;
pub mod panel;
pub mod tui;

pub use badge::{badge_from_config, Badge, FileBadge, StdoutBadge, UNREACHABLE_BADGE};
pub use commands::{handle_step, handle_trigger, set_level, StepOutcome, Trigger};
pub use panel::{Panel, PanelAction, PanelState, NO_DAEMON_LABEL};
