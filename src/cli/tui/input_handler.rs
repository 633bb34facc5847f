// TUI Input Handler - Maps terminal events onto panel controls
//
// Keyboard and mouse events are translated into `PanelInput` values;
// the event loop resolves them against the current panel state.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use super::panel_widget::PanelLayout;
use crate::cli::panel::PanelAction;
use crate::client::Level;

/// A user intent on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelInput {
    /// A control was operated
    Control(PanelAction),
    /// Move the slider by this many notches
    Nudge(i64),
    /// Digit typed into the free-form entry
    EntryDigit(char),
    EntryBackspace,
    EntrySubmit,
    EntryClear,
    Quit,
}

/// Translate a terminal event; None for events the panel ignores
pub fn translate_event(event: &Event, layout: &PanelLayout, entry: &str) -> Option<PanelInput> {
    match event {
        Event::Key(key) => translate_key(key, entry),
        Event::Mouse(mouse) => translate_mouse(mouse, layout),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent, entry: &str) -> Option<PanelInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Some(PanelInput::Quit),
        (KeyCode::Char('q'), _) => Some(PanelInput::Quit),
        (KeyCode::Esc, _) if entry.is_empty() => Some(PanelInput::Quit),
        (KeyCode::Esc, _) => Some(PanelInput::EntryClear),
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => Some(PanelInput::Nudge(-1)),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => Some(PanelInput::Nudge(1)),
        (KeyCode::Home, _) => Some(PanelInput::Control(PanelAction::SliderMoved(
            i64::from(Level::MIN.get()),
        ))),
        (KeyCode::End, _) => Some(PanelInput::Control(PanelAction::SliderMoved(
            i64::from(Level::MAX.get()),
        ))),
        (KeyCode::Char('-'), _) | (KeyCode::Down, _) => {
            Some(PanelInput::Control(PanelAction::Decrement))
        }
        (KeyCode::Char('+'), _) | (KeyCode::Char('='), _) | (KeyCode::Up, _) => {
            Some(PanelInput::Control(PanelAction::Increment))
        }
        (KeyCode::Char(c), _) if c.is_ascii_digit() => Some(PanelInput::EntryDigit(c)),
        (KeyCode::Backspace, _) => Some(PanelInput::EntryBackspace),
        (KeyCode::Enter, _) => Some(PanelInput::EntrySubmit),
        _ => None,
    }
}

fn translate_mouse(mouse: &MouseEvent, layout: &PanelLayout) -> Option<PanelInput> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(raw) = layout.slider_value_at(mouse.column, mouse.row) {
                return Some(PanelInput::Control(PanelAction::SliderMoved(raw)));
            }
            if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
                return None;
            }
            if layout.hits_minus(mouse.column, mouse.row) {
                Some(PanelInput::Control(PanelAction::Decrement))
            } else if layout.hits_plus(mouse.column, mouse.row) {
                Some(PanelInput::Control(PanelAction::Increment))
            } else {
                None
            }
        }
        MouseEventKind::ScrollUp => Some(PanelInput::Nudge(1)),
        MouseEventKind::ScrollDown => Some(PanelInput::Nudge(-1)),
        _ => None,
    }
}
