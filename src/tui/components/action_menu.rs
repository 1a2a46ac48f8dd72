//! # Action Menu Component
//!
//! Overlay listing the keyboard move commands for the focused card or
//! column. Opened with Enter, dismissed with Esc. Disabled commands are
//! shown dimmed and cannot be chosen.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ActionMenuState` lives in `TuiState`
//! - `ActionMenu` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding};

use crate::core::gesture::{Command, MenuEntry};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Persistent state for the action menu overlay.
pub struct ActionMenuState {
    pub title: String,
    pub entries: Vec<MenuEntry>,
    pub selected: usize,
    pub list_state: ListState,
}

impl ActionMenuState {
    /// Starts on the first enabled entry.
    pub fn new(title: String, entries: Vec<MenuEntry>) -> Self {
        let selected = entries.iter().position(|entry| entry.enabled).unwrap_or(0);
        let mut list_state = ListState::default();
        if !entries.is_empty() {
            list_state.select(Some(selected));
        }
        Self {
            title,
            entries,
            selected,
            list_state,
        }
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        self.list_state.select(Some(index));
    }
}

/// Events emitted by the action menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    Choose(Command),
    Dismiss,
}

impl EventHandler for ActionMenuState {
    type Event = MenuEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<MenuEvent> {
        match event {
            TuiEvent::Escape => Some(MenuEvent::Dismiss),
            TuiEvent::CursorUp => {
                if !self.entries.is_empty() {
                    self.select(self.selected.saturating_sub(1));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.entries.is_empty() {
                    self.select((self.selected + 1).min(self.entries.len() - 1));
                }
                None
            }
            TuiEvent::Submit => self
                .entries
                .get(self.selected)
                .filter(|entry| entry.enabled)
                .map(|entry| MenuEvent::Choose(entry.command.clone())),
            _ => None,
        }
    }
}

/// Transient render wrapper for the action menu overlay.
pub struct ActionMenu<'a> {
    state: &'a mut ActionMenuState,
}

impl<'a> ActionMenu<'a> {
    pub fn new(state: &'a mut ActionMenuState) -> Self {
        Self { state }
    }
}

impl Component for ActionMenu<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 60, area);

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.state.title))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" ↑↓ Select  Enter Move  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        let items: Vec<ListItem> = self
            .state
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = match (entry.enabled, i == self.state.selected) {
                    (true, true) => Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                    (false, true) => Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::REVERSED),
                    (true, false) => Style::default().fg(Color::Gray),
                    (false, false) => Style::default().fg(Color::DarkGray),
                };
                ListItem::new(Line::styled(entry.label.clone(), style))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
