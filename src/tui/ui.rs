use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::core::destination::Edge;
use crate::core::state::BoardState;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ActionMenu, BoardView, StatusBar};

/// Rows taken by one card: border, name, role, border.
pub const CARD_HEIGHT: u16 = 4;

const HELP_TEXT: &str = " ←↑↓→ focus  Enter actions  drag cards or titles with the mouse  q quit ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLayout {
    pub item_id: String,
    pub area: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub container_id: String,
    pub area: Rect,
    /// Top border row carrying the title; the drag handle for the column.
    pub header: Rect,
    /// Cards that fit on screen, in list order.
    pub cards: Vec<CardLayout>,
}

/// Screen geometry of the last rendered frame. Drives hit testing and
/// decides which entities count as mounted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardLayout {
    pub columns: Vec<ColumnLayout>,
}

/// What sits under a screen position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    Header {
        container_id: String,
    },
    Card {
        container_id: String,
        item_id: String,
        /// Closest horizontal edge of the card.
        edge: Edge,
    },
    /// Inside a column but not on a card or its title.
    Column {
        container_id: String,
    },
}

impl Hit {
    pub fn container_id(&self) -> &str {
        match self {
            Hit::Header { container_id }
            | Hit::Card { container_id, .. }
            | Hit::Column { container_id } => container_id,
        }
    }
}

impl BoardLayout {
    /// Columns side by side, cards stacked inside each. Cards that would
    /// overflow the column are not laid out.
    pub fn compute(state: &BoardState, area: Rect) -> Self {
        let count = state.container_count();
        if count == 0 {
            return Self::default();
        }
        let areas = Layout::horizontal(vec![Constraint::Fill(1); count]).split(area);

        let columns = state
            .containers()
            .zip(areas.iter())
            .map(|(container, &column_area)| {
                let header = Rect { height: 1.min(column_area.height), ..column_area };
                let inner_x = column_area.x.saturating_add(1);
                let inner_width = column_area.width.saturating_sub(2);
                let bottom = column_area.bottom().saturating_sub(1);

                let mut cards = Vec::new();
                let mut y = column_area.y.saturating_add(1);
                for item in &container.items {
                    if y.saturating_add(CARD_HEIGHT) > bottom {
                        break;
                    }
                    cards.push(CardLayout {
                        item_id: item.id.clone(),
                        area: Rect::new(inner_x, y, inner_width, CARD_HEIGHT),
                    });
                    y += CARD_HEIGHT;
                }

                ColumnLayout {
                    container_id: container.id.clone(),
                    area: column_area,
                    header,
                    cards,
                }
            })
            .collect();

        Self { columns }
    }

    pub fn column(&self, container_id: &str) -> Option<&ColumnLayout> {
        self.columns.iter().find(|column| column.container_id == container_id)
    }

    /// Hit test: given a screen position, find the header, card or column under it.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<Hit> {
        let column = self.columns.iter().find(|column| contains(column.area, x, y))?;
        let container_id = column.container_id.clone();

        if contains(column.header, x, y) {
            return Some(Hit::Header { container_id });
        }
        if let Some(card) = column.cards.iter().find(|card| contains(card.area, x, y)) {
            return Some(Hit::Card {
                container_id,
                item_id: card.item_id.clone(),
                edge: vertical_edge(card.area, y),
            });
        }
        Some(Hit::Column { container_id })
    }
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.right() && y >= area.y && y < area.bottom()
}

/// Closest edge along the vertical axis: top half is `Before`.
pub fn vertical_edge(area: Rect, y: u16) -> Edge {
    if y < area.y + area.height / 2 {
        Edge::Before
    } else {
        Edge::After
    }
}

/// Closest edge along the horizontal axis: left half is `Before`.
pub fn horizontal_edge(area: Rect, x: u16) -> Edge {
    if x < area.x + area.width / 2 {
        Edge::Before
    } else {
        Edge::After
    }
}

pub fn draw_ui(frame: &mut Frame, tui: &mut TuiState, now: Instant) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [status_area, board_area, help_area] = layout.areas(frame.area());

    tui.layout = BoardLayout::compute(tui.store.state(), board_area);

    StatusBar::new(tui.store.state().revision(), tui.status_message.clone())
        .render(frame, status_area);

    let flashed = tui.flashed_target(now);
    BoardView {
        state: tui.store.state(),
        layout: &tui.layout,
        focus: tui.focus.as_ref(),
        flashed: flashed.as_ref(),
        drag: tui.drag.as_ref(),
    }
    .render(frame, board_area);

    frame.render_widget(
        Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)),
        help_area,
    );

    if let Some(menu) = tui.menu.as_mut() {
        ActionMenu::new(menu).render(frame, board_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{basic_board, wide_board};

    fn layout() -> BoardLayout {
        // three 20-wide columns, 22 rows tall
        BoardLayout::compute(&basic_board(), Rect::new(0, 1, 60, 22))
    }

    #[test]
    fn test_columns_follow_board_order() {
        let layout = layout();
        let ids: Vec<&str> = layout.columns.iter().map(|c| c.container_id.as_str()).collect();
        assert_eq!(ids, ["about", "services", "contact"]);
        assert_eq!(layout.columns[1].area.x, 20);
        assert_eq!(layout.columns[0].header, Rect::new(0, 1, 20, 1));
    }

    #[test]
    fn test_cards_stack_below_header() {
        let layout = layout();
        let about = layout.column("about").unwrap();
        assert_eq!(about.cards.len(), 2);
        assert_eq!(about.cards[0].area, Rect::new(1, 2, 18, CARD_HEIGHT));
        assert_eq!(about.cards[1].area.y, 2 + CARD_HEIGHT);
    }

    #[test]
    fn test_overflowing_cards_are_not_laid_out() {
        let layout = BoardLayout::compute(&wide_board(), Rect::new(0, 0, 60, 10));
        // 10 rows: header, two cards of 4, bottom border
        assert_eq!(layout.columns[0].cards.len(), 2);
    }

    #[test]
    fn test_hit_test_regions() {
        let layout = layout();
        assert_eq!(
            layout.hit_test(25, 1),
            Some(Hit::Header { container_id: "services".to_string() })
        );
        assert_eq!(
            layout.hit_test(5, 2),
            Some(Hit::Card {
                container_id: "about".to_string(),
                item_id: "id:1".to_string(),
                edge: Edge::Before,
            })
        );
        assert_eq!(
            layout.hit_test(5, 5),
            Some(Hit::Card {
                container_id: "about".to_string(),
                item_id: "id:1".to_string(),
                edge: Edge::After,
            })
        );
        assert_eq!(
            layout.hit_test(45, 20),
            Some(Hit::Column { container_id: "contact".to_string() })
        );
        assert_eq!(layout.hit_test(5, 0), None);
        assert_eq!(layout.hit_test(70, 5), None);
    }

    #[test]
    fn test_edges() {
        let area = Rect::new(10, 10, 20, 4);
        assert_eq!(vertical_edge(area, 11), Edge::Before);
        assert_eq!(vertical_edge(area, 12), Edge::After);
        assert_eq!(horizontal_edge(area, 19), Edge::Before);
        assert_eq!(horizontal_edge(area, 20), Edge::After);
    }

    #[test]
    fn test_empty_board_has_no_columns() {
        let layout = BoardLayout::compute(&BoardState::default(), Rect::new(0, 0, 80, 24));
        assert!(layout.columns.is_empty());
        assert_eq!(layout.hit_test(1, 1), None);
    }
}
