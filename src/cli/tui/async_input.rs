// Async input handler for TUI - non-blocking terminal event polling

use crossterm::event::Event;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

/// Spawn a blocking task that polls terminal events and forwards them
///
/// Polls with a 100ms timeout so the task notices when the receiving side
/// has gone away and exits.
pub fn spawn_input_task<T, F>(tx: mpsc::UnboundedSender<T>, wrap: F) -> JoinHandle<()>
where
    T: Send + 'static,
    F: Fn(Event) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match crossterm::event::poll(Duration::from_millis(100)) {
                Ok(true) => match crossterm::event::read() {
                    Ok(event) => {
                        if tx.send(wrap(event)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    warn!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
        }
    })
}
