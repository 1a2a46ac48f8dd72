//! # Move Requests
//!
//! Every change to the board arrives as a `MoveRequest`. Pointer drops and
//! keyboard commands are both translated into one (see
//! [`gesture`](crate::core::gesture)); `update()` is the single entry point
//! that applies it.
//!
//! ```text
//! BoardState + MoveRequest  →  update()  →  (new BoardState, Operation)
//! ```
//!
//! No side effects here. Highlights, announcements and focus are decided
//! later, from the committed `Operation`.

use serde::{Deserialize, Serialize};

use crate::core::error::BoardError;
use crate::core::outcome::{self, Operation, Trigger};
use crate::core::state::BoardState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MoveRequest {
    ReorderContainer {
        start_index: usize,
        finish_index: usize,
        trigger: Trigger,
    },
    ReorderItem {
        container_id: String,
        start_index: usize,
        finish_index: usize,
        trigger: Trigger,
    },
    MoveItem {
        start_container_id: String,
        finish_container_id: String,
        start_item_index: usize,
        /// `None` moves the item to the front of the destination.
        finish_item_index: Option<usize>,
        trigger: Trigger,
    },
}

/// Applies a request. `Ok(None)` means the request was valid but changes
/// nothing and commits nothing.
pub fn update(
    state: &BoardState,
    request: &MoveRequest,
) -> Result<Option<(BoardState, Operation)>, BoardError> {
    match request {
        MoveRequest::ReorderContainer {
            start_index,
            finish_index,
            trigger,
        } => outcome::reorder_container(state, *start_index, *finish_index, *trigger).map(Some),
        MoveRequest::ReorderItem {
            container_id,
            start_index,
            finish_index,
            trigger,
        } => outcome::reorder_item(state, container_id, *start_index, *finish_index, *trigger)
            .map(Some),
        MoveRequest::MoveItem {
            start_container_id,
            finish_container_id,
            start_item_index,
            finish_item_index,
            trigger,
        } => outcome::move_item(
            state,
            start_container_id,
            finish_container_id,
            *start_item_index,
            *finish_item_index,
            *trigger,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::outcome::Outcome;
    use crate::test_support::{basic_board, item_ids};

    #[test]
    fn test_update_dispatches_each_kind() {
        let board = basic_board();

        let request = MoveRequest::ReorderContainer {
            start_index: 2,
            finish_index: 0,
            trigger: Trigger::Keyboard,
        };
        let (next, op) = update(&board, &request).unwrap().unwrap();
        assert_eq!(next.ordered_container_ids(), ["contact", "about", "services"]);
        assert!(matches!(op.outcome, Outcome::ContainerReorder { .. }));

        let request = MoveRequest::ReorderItem {
            container_id: "services".to_string(),
            start_index: 1,
            finish_index: 0,
            trigger: Trigger::Pointer,
        };
        let (next, _) = update(&next, &request).unwrap().unwrap();
        assert_eq!(item_ids(&next, "services"), ["id:6", "id:5"]);

        let request = MoveRequest::MoveItem {
            start_container_id: "services".to_string(),
            finish_container_id: "about".to_string(),
            start_item_index: 0,
            finish_item_index: None,
            trigger: Trigger::Pointer,
        };
        let (next, op) = update(&next, &request).unwrap().unwrap();
        assert_eq!(item_ids(&next, "about"), ["id:6", "id:1", "id:2"]);
        assert_eq!(op.revision, 3);
    }

    #[test]
    fn test_update_failure_commits_nothing() {
        let board = basic_board();
        let request = MoveRequest::ReorderItem {
            container_id: "about".to_string(),
            start_index: 5,
            finish_index: 0,
            trigger: Trigger::Pointer,
        };
        assert!(update(&board, &request).is_err());
        assert!(board.last_operation().is_none());
    }

    #[test]
    fn test_request_round_trips_through_json() {
        let request = MoveRequest::MoveItem {
            start_container_id: "about".to_string(),
            finish_container_id: "contact".to_string(),
            start_item_index: 1,
            finish_item_index: None,
            trigger: Trigger::Keyboard,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"kind\":\"move-item\""));
        let parsed: MoveRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
    }
}
