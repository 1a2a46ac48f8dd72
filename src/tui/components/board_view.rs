//! # BoardView Component
//!
//! Renders the board from a precomputed [`BoardLayout`]: one bordered column
//! per menu-card, one bordered card per person. Presentation state comes in
//! as props:
//!
//! - `focus`: cyan border on the focused column or card
//! - `flashed`: highlight after a move, for the configured flash duration
//! - `drag`: dimmed source, yellow border plus edge marker on the drop target

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::destination::Edge;
use crate::core::gesture::GestureKind;
use crate::core::state::{BoardState, Item};
use crate::tui::Focus;
use crate::tui::component::Component;
use crate::tui::drag::DragState;
use crate::tui::mount::Target;
use crate::tui::ui::{BoardLayout, Hit};

pub struct BoardView<'a> {
    pub state: &'a BoardState,
    pub layout: &'a BoardLayout,
    pub focus: Option<&'a Focus>,
    pub flashed: Option<&'a Target>,
    pub drag: Option<&'a DragState>,
}

/// Left and right borders consumed by a bordered card
const HORIZONTAL_OVERHEAD: u16 = 2;

/// Cuts `text` to at most `width` terminal cells, ending in `…` when cut.
fn fit_to_width(text: &str, width: u16) -> String {
    let width = width as usize;
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut fitted = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        fitted.push(c);
        used += w;
    }
    fitted.push('…');
    fitted
}

fn flash_style() -> Style {
    Style::default().bg(Color::Yellow).fg(Color::Black)
}

fn focus_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

fn drop_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

impl BoardView<'_> {
    fn is_flashed(&self, target: Target) -> bool {
        self.flashed == Some(&target)
    }

    fn active_drag(&self, kind: GestureKind) -> Option<&DragState> {
        self.drag.filter(|drag| drag.moved && drag.kind == kind)
    }

    fn column_border(&self, container_id: &str) -> Style {
        let dragging = self.active_drag(GestureKind::Container);
        if dragging.is_some_and(|drag| drag.source_id == container_id) {
            return Style::default().add_modifier(Modifier::DIM);
        }
        let hovered = dragging
            .and_then(|drag| drag.hover.as_ref())
            .is_some_and(|hit| hit.container_id() == container_id);
        // Card drags onto the column body target the column too
        let card_over_body = self
            .active_drag(GestureKind::Item)
            .and_then(|drag| drag.hover.as_ref())
            .is_some_and(|hit| match hit {
                Hit::Column { container_id: id } | Hit::Header { container_id: id } => {
                    id == container_id
                }
                Hit::Card { .. } => false,
            });

        if hovered || card_over_body {
            drop_style()
        } else if matches!(self.focus, Some(Focus::Column(id)) if id == container_id) {
            focus_style()
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    fn render_card(&self, frame: &mut Frame, item: &Item, area: Rect) {
        let mut block = Block::bordered();
        let mut border = Style::default().fg(Color::DarkGray);
        let mut body = Style::default();

        if matches!(self.focus, Some(Focus::Card(id)) if *id == item.id) {
            border = focus_style();
            block = block.title_bottom(Line::from(" ⏎ actions ").right_aligned());
        }
        if let Some(drag) = self.active_drag(GestureKind::Item) {
            if drag.source_id == item.id {
                body = body.add_modifier(Modifier::DIM);
                border = border.add_modifier(Modifier::DIM);
            } else if let Some(Hit::Card { item_id, edge, .. }) = &drag.hover
                && *item_id == item.id
            {
                border = drop_style();
                block = match edge {
                    Edge::Before => block.title_top(Line::from("▲ drop above")),
                    Edge::After => block.title_bottom(Line::from("▼ drop below")),
                };
            }
        }
        if self.is_flashed(Target::Card(item.id.clone())) {
            body = flash_style();
        }

        let inner = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let lines = vec![
            Line::styled(
                fit_to_width(&item.name, inner),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::styled(fit_to_width(&item.role, inner), Style::default().fg(Color::Gray)),
        ];
        let card = Paragraph::new(lines)
            .block(block.border_style(border))
            .style(body);
        frame.render_widget(card, area);
    }
}

impl Component for BoardView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.layout.columns.is_empty() {
            let empty = Paragraph::new("This board has no menu-cards.")
                .style(Style::default().fg(Color::DarkGray))
                .centered();
            frame.render_widget(empty, area);
            return;
        }

        for column in &self.layout.columns {
            let Ok(container) = self.state.container(&column.container_id) else {
                continue;
            };

            let mut block = Block::bordered()
                .title(format!(" {} ", container.title))
                .border_style(self.column_border(&container.id));
            let hidden = container.items.len().saturating_sub(column.cards.len());
            if hidden > 0 {
                block = block.title_bottom(Line::from(format!(" +{hidden} more ")).centered());
            }
            if self.is_flashed(Target::Column(container.id.clone())) {
                block = block.style(flash_style());
            }
            frame.render_widget(block, column.area);

            for card in &column.cards {
                if let Some(item) = container.items.iter().find(|item| item.id == card.item_id) {
                    self.render_card(frame, item, card.area);
                }
            }
        }
    }
}
