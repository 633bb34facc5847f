// TUI Renderer - Ratatui-based interactive panel
//
// The panel is a small centered box: level label, a slider, two step
// buttons and a free-form entry. Terminal events are polled on a
// background task and merged with the initial status read on one channel.

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

use crate::cli::panel::Panel;
use crate::client::{LevelControl, Status};
use crate::errors::DaemonError;

mod async_input;
mod input_handler;
mod panel_widget;
mod session;

pub use async_input::spawn_input_task;
pub use input_handler::{translate_event, PanelInput};
pub use panel_widget::{PanelLayout, PanelWidget};
pub use session::{PanelSession, PUSH_DRAIN_GRACE};

/// TUI renderer for the panel
pub struct TuiRenderer {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    layout: PanelLayout,
    /// Whether the terminal is still in panel mode
    is_active: bool,
}

impl TuiRenderer {
    /// Enter raw mode and the alternate screen
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        Ok(Self {
            terminal,
            layout: PanelLayout::default(),
            is_active: true,
        })
    }

    /// Draw the panel and remember where its controls landed
    pub fn draw(&mut self, panel: &Panel, entry: &str) -> Result<()> {
        let mut layout = self.layout;
        self.terminal
            .draw(|frame| {
                let area = frame.area();
                layout = PanelLayout::new(area);
                frame.render_widget(PanelWidget::new(panel, entry), area);
            })
            .context("Failed to draw panel")?;
        self.layout = layout;
        Ok(())
    }

    /// Layout of the most recent draw
    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    /// Restore terminal state
    pub fn shutdown(mut self) -> Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> Result<()> {
        if self.is_active {
            self.is_active = false;
            disable_raw_mode().context("Failed to disable raw mode")?;
            execute!(
                self.terminal.backend_mut(),
                LeaveAlternateScreen,
                DisableMouseCapture
            )
            .context("Failed to leave alternate screen")?;
            self.terminal.show_cursor().context("Failed to show cursor")?;
        }
        Ok(())
    }
}

impl Drop for TuiRenderer {
    fn drop(&mut self) {
        // Ensure terminal is restored on drop
        let _ = self.restore();
    }
}

enum PanelEvent {
    Status(Result<Status, DaemonError>),
    Terminal(Event),
}

/// Open the interactive panel and run it until the user closes it
pub async fn run_panel(client: Arc<dyn LevelControl>) -> Result<()> {
    let mut renderer = TuiRenderer::new()?;
    let mut session = PanelSession::new(Arc::clone(&client));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let status_tx = tx.clone();
    tokio::spawn(async move {
        let _ = status_tx.send(PanelEvent::Status(client.fetch_status().await));
    });
    let input_task = spawn_input_task(tx, PanelEvent::Terminal);

    loop {
        renderer.draw(session.panel(), session.entry())?;

        let Some(event) = rx.recv().await else {
            break;
        };
        match event {
            PanelEvent::Status(result) => session.apply_status(result),
            PanelEvent::Terminal(event) => {
                let input = translate_event(&event, renderer.layout(), session.entry());
                if let Some(input) = input {
                    if !session.handle(input) {
                        break;
                    }
                }
            }
        }
    }

    drop(rx);
    renderer.shutdown()?;
    session.drain(PUSH_DRAIN_GRACE).await;
    let _ = input_task.await;
    info!("Panel closed");
    Ok(())
}
