// Panel Widget - Renders the level label, slider and step buttons
//
// Layout is computed by `PanelLayout` so mouse clicks can be mapped back
// onto the same regions that were drawn.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

use crate::cli::panel::Panel;
use crate::client::Level;

const PANEL_WIDTH: u16 = 46;
const PANEL_HEIGHT: u16 = 11;
const MINUS_BUTTON: &str = "[ - ]";
const PLUS_BUTTON: &str = "[ + ]";

/// Screen regions of one rendered panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelLayout {
    pub frame: Rect,
    pub label: Rect,
    pub gauge: Rect,
    pub minus: Rect,
    pub plus: Rect,
    pub profile: Rect,
    pub entry: Rect,
    pub help: Rect,
}

impl PanelLayout {
    /// Center the panel inside `area`
    pub fn new(area: Rect) -> Self {
        let width = PANEL_WIDTH.min(area.width);
        let height = PANEL_HEIGHT.min(area.height);
        let frame = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };
        let inner = Block::default().borders(Borders::ALL).inner(frame);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Level label
                Constraint::Length(3), // Slider
                Constraint::Length(1), // Buttons
                Constraint::Length(1), // Profile
                Constraint::Length(1), // Entry
                Constraint::Length(1), // Key help
            ])
            .split(inner);

        let button_width = MINUS_BUTTON.len() as u16;
        let buttons = rows[2];
        let minus = Rect {
            width: button_width.min(buttons.width),
            ..buttons
        };
        let plus = Rect {
            x: buttons.x + buttons.width.saturating_sub(button_width),
            width: button_width.min(buttons.width),
            ..buttons
        };

        Self {
            frame,
            label: rows[0],
            gauge: rows[1],
            minus,
            plus,
            profile: rows[3],
            entry: rows[4],
            help: rows[5],
        }
    }

    /// Raw slider value under a clicked column, if the click hit the slider
    pub fn slider_value_at(&self, column: u16, row: u16) -> Option<i64> {
        let track = Block::default().borders(Borders::ALL).inner(self.gauge);
        if !contains(track, column, row) || track.width == 0 {
            return None;
        }
        let span = i64::from(Level::MAX.get() - Level::MIN.get());
        let offset = i64::from(column - track.x);
        let width = i64::from(track.width.saturating_sub(1).max(1));
        Some(i64::from(Level::MIN.get()) + (offset * span + width / 2) / width)
    }

    pub fn hits_minus(&self, column: u16, row: u16) -> bool {
        contains(self.minus, column, row)
    }

    pub fn hits_plus(&self, column: u16, row: u16) -> bool {
        contains(self.plus, column, row)
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Widget for rendering the panel
pub struct PanelWidget<'a> {
    panel: &'a Panel,
    entry: &'a str,
}

impl<'a> PanelWidget<'a> {
    pub fn new(panel: &'a Panel, entry: &'a str) -> Self {
        Self { panel, entry }
    }

    fn control_style(&self) -> Style {
        if self.panel.controls_enabled() {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    fn slider_ratio(&self) -> f64 {
        match self.panel.slider() {
            Some(level) if self.panel.controls_enabled() => {
                f64::from(level.get() - Level::MIN.get())
                    / f64::from(Level::MAX.get() - Level::MIN.get())
            }
            _ => 0.0,
        }
    }
}

impl<'a> Widget for PanelWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = PanelLayout::new(area);
        let enabled = self.panel.controls_enabled();

        Block::default()
            .borders(Borders::ALL)
            .title(" taper ")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(Color::Gray))
            .render(layout.frame, buf);

        let label_style = if enabled {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        Paragraph::new(Line::from(vec![
            Span::raw("Level: "),
            Span::styled(self.panel.label().to_string(), label_style),
        ]))
        .alignment(Alignment::Center)
        .render(layout.label, buf);

        let gauge_label = match self.panel.slider() {
            Some(level) if enabled => format!("{}/{}", level, Level::MAX),
            _ => "-".to_string(),
        };
        Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(self.control_style())
            .ratio(self.slider_ratio())
            .label(gauge_label)
            .render(layout.gauge, buf);

        Paragraph::new(Span::styled(MINUS_BUTTON, self.control_style())).render(layout.minus, buf);
        Paragraph::new(Span::styled(PLUS_BUTTON, self.control_style())).render(layout.plus, buf);

        if let Some(profile) = self.panel.profile() {
            Paragraph::new(Span::styled(
                profile.summary(),
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center)
            .render(layout.profile, buf);
        }

        if enabled && !self.entry.is_empty() {
            Paragraph::new(format!("Set: {}_", self.entry))
                .alignment(Alignment::Center)
                .render(layout.entry, buf);
        }

        let help = if enabled {
            "←/→ slide  -/+ step  0-9⏎ set  q quit"
        } else {
            "q quit"
        };
        Paragraph::new(Span::styled(help, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Center)
            .render(layout.help, buf);
    }
}
