//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::seed;
use crate::core::state::{BoardState, Item};

/// About / Services / Contact. About holds id:1 and id:2, Contact id:3 and
/// id:4, Services id:5 and id:6.
pub fn basic_board() -> BoardState {
    seed::basic_board()
}

/// Three containers `card-0..card-2` of four items each (id:1 to id:12).
pub fn wide_board() -> BoardState {
    seed::generated_board(3, 4)
}

/// The seed person at `position`.
pub fn item(position: usize) -> Item {
    seed::person_from_position(position)
}

/// Item ids of a container, in order.
pub fn item_ids(state: &BoardState, container_id: &str) -> Vec<String> {
    state
        .container(container_id)
        .map(|container| container.items.iter().map(|item| item.id.clone()).collect())
        .unwrap_or_default()
}
