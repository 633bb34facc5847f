// Interactive panel state machine
//
// Initializing -> Synced on a successful first status read, or
// Initializing -> Disconnected on failure. Disconnected is terminal for
// the panel's lifetime. While Synced, every control updates the local
// display first and then pushes; push failures are only logged.

use tracing::{info, warn};

use crate::client::{clamp, Level, LevelControl, Profile, Status};
use crate::errors::DaemonError;

/// Label shown when the initial status read failed
pub const NO_DAEMON_LABEL: &str = "No daemon";

const INITIALIZING_LABEL: &str = "…";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Initializing,
    Synced,
    Disconnected,
}

/// User input on one of the panel's controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    /// Slider dragged (or value typed) to a raw, unclamped value
    SliderMoved(i64),
    /// `+` button
    Increment,
    /// `-` button
    Decrement,
}

/// Local mirror of the daemon level for one panel instance
#[derive(Debug, Clone)]
pub struct Panel {
    state: PanelState,
    label: String,
    slider: Option<Level>,
    profile: Option<Profile>,
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel {
    /// A freshly opened panel waiting on its first status read
    pub fn new() -> Self {
        Self {
            state: PanelState::Initializing,
            label: INITIALIZING_LABEL.to_string(),
            slider: None,
            profile: None,
        }
    }

    /// Open a panel and perform the initial sync
    pub async fn open<C: LevelControl + ?Sized>(client: &C) -> Self {
        let mut panel = Self::new();
        panel.apply_status(client.fetch_status().await);
        panel
    }

    /// Resolve the initial status read; ignored outside Initializing
    pub fn apply_status(&mut self, result: Result<Status, DaemonError>) {
        if self.state != PanelState::Initializing {
            return;
        }

        match result {
            Ok(status) => {
                let level = status.effective_level();
                self.label = level.to_string();
                self.slider = Some(level);
                self.profile = status.profile;
                self.state = PanelState::Synced;
                info!(level = level.get(), "Panel synced");
            }
            Err(e) => {
                warn!("Failed to fetch status: {}", e);
                self.label = NO_DAEMON_LABEL.to_string();
                self.state = PanelState::Disconnected;
            }
        }
    }

    /// Apply a control input to the local display
    ///
    /// Returns the level to push, or None when the controls are inert.
    pub fn apply(&mut self, action: PanelAction) -> Option<Level> {
        if !self.controls_enabled() {
            return None;
        }

        let next = match action {
            PanelAction::SliderMoved(raw) => clamp(raw),
            PanelAction::Increment => self.slider_value().step(1),
            PanelAction::Decrement => self.slider_value().step(-1),
        };

        self.slider = Some(next);
        self.label = next.to_string();
        Some(next)
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Slider and buttons respond only while synced
    pub fn controls_enabled(&self) -> bool {
        self.state == PanelState::Synced
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Slider position, if the panel ever synced
    pub fn slider(&self) -> Option<Level> {
        self.slider
    }

    /// Profile reported at open, while the slider still sits on its level
    pub fn profile(&self) -> Option<&Profile> {
        let slider = i64::from(self.slider?.get());
        self.profile.as_ref().filter(|p| p.level == slider)
    }

    fn slider_value(&self) -> Level {
        self.slider.unwrap_or(Level::DEFAULT)
    }
}

/// Push a level and log, rather than surface, any failure
pub async fn push_logged<C: LevelControl + ?Sized>(client: &C, level: Level) {
    match client.push_level(level).await {
        Ok(()) => info!(level = level.get(), "Level pushed"),
        Err(e) => warn!("Failed to set level: {}", e),
    }
}
