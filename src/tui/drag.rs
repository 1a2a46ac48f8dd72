//! # Drag Geometry
//!
//! Turns a mouse press, drag and release into a [`Gesture`] for the core.
//! A press only arms a drag; it becomes a drag on the first motion event, so
//! a plain click never produces a gesture.

use crate::core::destination::Axis;
use crate::core::gesture::{Gesture, GestureKind};
use crate::tui::ui::{BoardLayout, Hit, horizontal_edge};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    pub kind: GestureKind,
    pub source_id: String,
    pub source_container_id: Option<String>,
    /// False until the pointer moves with the button held.
    pub moved: bool,
    /// What the pointer is currently over, for the drop preview.
    pub hover: Option<Hit>,
}

impl DragState {
    /// Arms a drag for whatever was pressed. Only cards and column titles
    /// are draggable.
    pub fn press(hit: Option<Hit>) -> Option<Self> {
        match hit? {
            Hit::Header { container_id } => Some(Self {
                kind: GestureKind::Container,
                source_id: container_id,
                source_container_id: None,
                moved: false,
                hover: None,
            }),
            Hit::Card {
                container_id,
                item_id,
                ..
            } => Some(Self {
                kind: GestureKind::Item,
                source_id: item_id,
                source_container_id: Some(container_id),
                moved: false,
                hover: None,
            }),
            Hit::Column { .. } => None,
        }
    }

    pub fn motion(&mut self, hit: Option<Hit>) {
        self.moved = true;
        self.hover = hit;
    }

    /// Describes the drop at `(x, y)`. A release outside every column gives a
    /// gesture with no target, which the core discards.
    pub fn release(self, layout: &BoardLayout, x: u16, y: u16) -> Gesture {
        let hit = layout.hit_test(x, y);
        let target_container_id = hit.as_ref().map(|hit| hit.container_id().to_string());

        match self.kind {
            GestureKind::Container => {
                let edge = target_container_id
                    .as_deref()
                    .and_then(|id| layout.column(id))
                    .map(|column| horizontal_edge(column.area, x));
                Gesture {
                    kind: GestureKind::Container,
                    source_id: self.source_id,
                    source_container_id: None,
                    target_container_id,
                    target_item_id: None,
                    edge,
                    axis: Axis::Horizontal,
                }
            }
            GestureKind::Item => {
                let (target_item_id, edge) = match hit {
                    Some(Hit::Card { item_id, edge, .. }) => (Some(item_id), Some(edge)),
                    _ => (None, None),
                };
                Gesture {
                    kind: GestureKind::Item,
                    source_id: self.source_id,
                    source_container_id: self.source_container_id,
                    target_container_id,
                    target_item_id,
                    edge,
                    axis: Axis::Vertical,
                }
            }
        }
    }
}
