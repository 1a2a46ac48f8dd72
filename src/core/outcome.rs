//! # Outcome Builder
//!
//! The only code that produces new board states. Each transition takes the
//! current state by reference, validates the request against it, and returns
//! a fresh state with `last_operation` set, together with the committed
//! [`Operation`]. Validation happens before any copying, so a failure
//! leaves nothing half-applied.
//!
//! Indices passed in are final indices: the removal correction from
//! [`resolve_index`](crate::core::destination::resolve_index) has already been
//! applied by whoever built the request.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::error::{BoardError, check_index};
use crate::core::state::{BoardState, Container};

/// The gesture modality that produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Pointer,
    Keyboard,
}

/// What moved, and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Outcome {
    ContainerReorder {
        container_id: String,
        start_index: usize,
        finish_index: usize,
    },
    ItemReorder {
        container_id: String,
        start_index: usize,
        finish_index: usize,
    },
    ItemMove {
        finish_container_id: String,
        start_item_index: usize,
        finish_item_index: usize,
    },
}

/// A committed transition. `revision` increases by one on every commit and
/// is how observers tell a new operation from one they have already seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub revision: u64,
    pub trigger: Trigger,
    pub outcome: Outcome,
}

/// Removes the element at `start_index` and reinserts it at `finish_index`.
fn reorder<T: Clone>(list: &[T], start_index: usize, finish_index: usize) -> Vec<T> {
    let mut result = list.to_vec();
    let moved = result.remove(start_index);
    result.insert(finish_index, moved);
    result
}

fn commit(state: BoardState, trigger: Trigger, outcome: Outcome) -> (BoardState, Operation) {
    let operation = Operation {
        revision: state.revision() + 1,
        trigger,
        outcome,
    };
    debug!("Committing operation: {:?}", operation);
    (state.with_operation(operation.clone()), operation)
}

/// Moves the container at `start_index` to `finish_index` in board order.
pub fn reorder_container(
    state: &BoardState,
    start_index: usize,
    finish_index: usize,
    trigger: Trigger,
) -> Result<(BoardState, Operation), BoardError> {
    let ids = state.ordered_container_ids();
    check_index(start_index, ids.len())?;
    check_index(finish_index, ids.len())?;

    let container_id = ids[start_index].clone();
    let next = state.with_order(reorder(ids, start_index, finish_index));

    Ok(commit(
        next,
        trigger,
        Outcome::ContainerReorder {
            container_id,
            start_index,
            finish_index,
        },
    ))
}

/// Moves an item within one container's list.
pub fn reorder_item(
    state: &BoardState,
    container_id: &str,
    start_index: usize,
    finish_index: usize,
    trigger: Trigger,
) -> Result<(BoardState, Operation), BoardError> {
    let container = state.container(container_id)?;
    check_index(start_index, container.items.len())?;
    check_index(finish_index, container.items.len())?;

    let updated = Container {
        items: reorder(&container.items, start_index, finish_index),
        ..container.clone()
    };
    let next = state.clone().with_container(updated);

    Ok(commit(
        next,
        trigger,
        Outcome::ItemReorder {
            container_id: container_id.to_string(),
            start_index,
            finish_index,
        },
    ))
}

/// Moves an item from one container into another.
///
/// `finish_item_index` defaults to `0`: an item moved without an explicit
/// destination goes to the front. Returns `Ok(None)` without committing when
/// both ids name the same container; same-list moves are `reorder_item`'s job.
pub fn move_item(
    state: &BoardState,
    start_container_id: &str,
    finish_container_id: &str,
    start_item_index: usize,
    finish_item_index: Option<usize>,
    trigger: Trigger,
) -> Result<Option<(BoardState, Operation)>, BoardError> {
    if start_container_id == finish_container_id {
        debug!(
            "Ignoring cross-container move within {}",
            start_container_id
        );
        return Ok(None);
    }

    let source = state.container(start_container_id)?;
    let destination = state.container(finish_container_id)?;
    let item = source.item_at(start_item_index)?.clone();

    let finish_item_index = finish_item_index.unwrap_or(0);
    // Inserting at the end of the destination list is allowed.
    check_index(finish_item_index, destination.items.len() + 1)?;

    let mut source_items = source.items.clone();
    source_items.remove(start_item_index);
    let mut destination_items = destination.items.clone();
    destination_items.insert(finish_item_index, item);

    let updated_source = Container {
        items: source_items,
        ..source.clone()
    };
    let updated_destination = Container {
        items: destination_items,
        ..destination.clone()
    };
    let next = state
        .clone()
        .with_container(updated_source)
        .with_container(updated_destination);

    Ok(Some(commit(
        next,
        trigger,
        Outcome::ItemMove {
            finish_container_id: finish_container_id.to_string(),
            start_item_index,
            finish_item_index,
        },
    )))
}
