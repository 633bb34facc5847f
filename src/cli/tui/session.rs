// Panel session - one open panel bound to a daemon client
//
// Owns the panel state machine, the free-form entry buffer and the
// in-flight pushes. Each control input issues its own push; pushes are
// not sequenced, so the daemon keeps whichever arrives last.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::debug;

use super::input_handler::PanelInput;
use crate::cli::panel::{push_logged, Panel, PanelAction};
use crate::client::{clamp, LevelControl, Status};
use crate::errors::DaemonError;

/// Longest free-form entry accepted
const MAX_ENTRY_LEN: usize = 3;

/// How long closing the panel waits for in-flight pushes
pub const PUSH_DRAIN_GRACE: Duration = Duration::from_secs(2);

pub struct PanelSession {
    panel: Panel,
    entry: String,
    client: Arc<dyn LevelControl>,
    pushes: JoinSet<()>,
}

impl PanelSession {
    pub fn new(client: Arc<dyn LevelControl>) -> Self {
        Self {
            panel: Panel::new(),
            entry: String::new(),
            client,
            pushes: JoinSet::new(),
        }
    }

    /// Open a session and wait for the initial status read
    pub async fn open(client: Arc<dyn LevelControl>) -> Self {
        Self {
            panel: Panel::open(&*client).await,
            entry: String::new(),
            client,
            pushes: JoinSet::new(),
        }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn apply_status(&mut self, result: Result<Status, DaemonError>) {
        self.panel.apply_status(result);
    }

    /// Handle one input; returns false when the panel should close
    ///
    /// Must be called from within a tokio runtime.
    pub fn handle(&mut self, input: PanelInput) -> bool {
        match input {
            PanelInput::Quit => return false,
            PanelInput::Control(action) => self.operate(action),
            PanelInput::Nudge(delta) => {
                if let Some(slider) = self.panel.slider() {
                    self.operate(PanelAction::SliderMoved(i64::from(slider.get()) + delta));
                }
            }
            PanelInput::EntryDigit(digit) => {
                if self.panel.controls_enabled() && self.entry.len() < MAX_ENTRY_LEN {
                    self.entry.push(digit);
                }
            }
            PanelInput::EntryBackspace => {
                self.entry.pop();
            }
            PanelInput::EntryClear => self.entry.clear(),
            PanelInput::EntrySubmit => {
                let entry = std::mem::take(&mut self.entry);
                match entry.parse::<i64>() {
                    Ok(raw) => self.operate(PanelAction::SliderMoved(raw)),
                    Err(_) => debug!(entry = %entry, "Discarding unparsable entry"),
                }
            }
        }
        true
    }

    fn operate(&mut self, action: PanelAction) {
        self.reap_finished();

        // Only a slider that actually moves writes; buttons always push
        if let PanelAction::SliderMoved(raw) = action {
            if self.panel.slider() == Some(clamp(raw)) {
                return;
            }
        }

        if let Some(level) = self.panel.apply(action) {
            let client = Arc::clone(&self.client);
            self.pushes.spawn(async move { push_logged(&*client, level).await });
        }
    }

    fn reap_finished(&mut self) {
        while self.pushes.try_join_next().is_some() {}
    }

    /// Number of pushes still in flight
    pub fn pending_pushes(&mut self) -> usize {
        self.reap_finished();
        self.pushes.len()
    }

    /// Wait for in-flight pushes, up to `grace`
    pub async fn drain(&mut self, grace: Duration) {
        let pushes = &mut self.pushes;
        let drained = tokio::time::timeout(grace, async {
            while pushes.join_next().await.is_some() {}
        })
        .await;
        if drained.is_err() {
            debug!(pending = self.pushes.len(), "Abandoning in-flight pushes");
            self.pushes.abort_all();
        }
    }
}
