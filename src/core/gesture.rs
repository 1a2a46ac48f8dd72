//! # Gestures
//!
//! Translates raw input into [`MoveRequest`]s. Two sources feed the core:
//!
//! - **Pointer drops**: the drag-geometry collaborator reports what was
//!   dragged, what it landed on, and which edge of the target was closest.
//!   [`resolve_drop`] decides which of the three request kinds that is.
//! - **Keyboard commands**: the action menus offer move up/down/top/bottom,
//!   move to another container, and move left/right for containers.
//!   Commands that make no sense at the current position are disabled and
//!   produce no request; they never reach the resolver.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::action::MoveRequest;
use crate::core::destination::{Axis, Edge, insertion_index, resolve_index};
use crate::core::error::BoardError;
use crate::core::outcome::Trigger;
use crate::core::state::{BoardState, Container};

// ============================================================================
// Pointer drops
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureKind {
    Container,
    Item,
}

/// A finished drag, as reported by the geometry collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gesture {
    pub kind: GestureKind,
    /// Id of the dragged container or item.
    pub source_id: String,
    /// Container the dragged item started in. Looked up when absent.
    #[serde(default)]
    pub source_container_id: Option<String>,
    /// Container under the pointer at drop time; `None` when the drop missed.
    #[serde(default)]
    pub target_container_id: Option<String>,
    /// Item under the pointer at drop time, for item-relative drops.
    #[serde(default)]
    pub target_item_id: Option<String>,
    #[serde(default)]
    pub edge: Option<Edge>,
    pub axis: Axis,
}

/// Resolves a pointer drop into a request. `Ok(None)` means the drop landed
/// nowhere and is discarded.
pub fn resolve_drop(
    state: &BoardState,
    gesture: &Gesture,
) -> Result<Option<MoveRequest>, BoardError> {
    let Some(target_container_id) = gesture.target_container_id.as_deref() else {
        debug!("Discarding drop of {} with no target", gesture.source_id);
        return Ok(None);
    };

    let request = match gesture.kind {
        GestureKind::Container => {
            let start_index = state.position_of_container(&gesture.source_id)?;
            let target_index = state.position_of_container(target_container_id)?;
            MoveRequest::ReorderContainer {
                start_index,
                finish_index: resolve_index(start_index, target_index, gesture.edge, gesture.axis),
                trigger: Trigger::Pointer,
            }
        }
        GestureKind::Item => resolve_item_drop(state, gesture, target_container_id)?,
    };

    debug!("Resolved drop {:?} into {:?}", gesture, request);
    Ok(Some(request))
}

fn resolve_item_drop(
    state: &BoardState,
    gesture: &Gesture,
    target_container_id: &str,
) -> Result<MoveRequest, BoardError> {
    let (source, item_index) = source_of(state, gesture)?;
    let destination = state.container(target_container_id)?;
    let same_container = source.id == destination.id;

    let request = match gesture.target_item_id.as_deref() {
        // Dropped on the container itself, not relative to a card.
        None if same_container => MoveRequest::ReorderItem {
            container_id: source.id.clone(),
            start_index: item_index,
            finish_index: resolve_index(item_index, source.items.len() - 1, None, gesture.axis),
            trigger: Trigger::Pointer,
        },
        None => MoveRequest::MoveItem {
            start_container_id: source.id.clone(),
            finish_container_id: destination.id.clone(),
            start_item_index: item_index,
            finish_item_index: None,
            trigger: Trigger::Pointer,
        },
        Some(target_item_id) => {
            let target_index = destination
                .position_of(target_item_id)
                .ok_or_else(|| BoardError::UnknownItem(target_item_id.to_string()))?;
            if same_container {
                MoveRequest::ReorderItem {
                    container_id: source.id.clone(),
                    start_index: item_index,
                    finish_index: resolve_index(
                        item_index,
                        target_index,
                        gesture.edge,
                        gesture.axis,
                    ),
                    trigger: Trigger::Pointer,
                }
            } else {
                MoveRequest::MoveItem {
                    start_container_id: source.id.clone(),
                    finish_container_id: destination.id.clone(),
                    start_item_index: item_index,
                    finish_item_index: Some(insertion_index(target_index, gesture.edge)),
                    trigger: Trigger::Pointer,
                }
            }
        }
    };
    Ok(request)
}

fn source_of<'a>(
    state: &'a BoardState,
    gesture: &Gesture,
) -> Result<(&'a Container, usize), BoardError> {
    match gesture.source_container_id.as_deref() {
        Some(container_id) => {
            let container = state.container(container_id)?;
            let index = container
                .position_of(&gesture.source_id)
                .ok_or_else(|| BoardError::UnknownItem(gesture.source_id.clone()))?;
            Ok((container, index))
        }
        None => state.locate_item(&gesture.source_id),
    }
}

// ============================================================================
// Keyboard commands
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemCommand {
    MoveToTop,
    MoveUp,
    MoveDown,
    MoveToBottom,
    /// Move to the front of another container.
    MoveTo(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerCommand {
    MoveLeft,
    MoveRight,
}

/// Request for a keyboard command on an item, or `None` when the command is
/// disabled at the item's current position.
pub fn item_command(
    state: &BoardState,
    item_id: &str,
    command: &ItemCommand,
) -> Result<Option<MoveRequest>, BoardError> {
    let (container, start_index) = state.locate_item(item_id)?;
    let last = container.items.len() - 1;

    let reorder = |finish_index: usize| MoveRequest::ReorderItem {
        container_id: container.id.clone(),
        start_index,
        finish_index,
        trigger: Trigger::Keyboard,
    };

    let request = match command {
        ItemCommand::MoveToTop | ItemCommand::MoveUp if start_index == 0 => None,
        ItemCommand::MoveDown | ItemCommand::MoveToBottom if start_index == last => None,
        ItemCommand::MoveToTop => Some(reorder(0)),
        ItemCommand::MoveUp => Some(reorder(start_index - 1)),
        ItemCommand::MoveDown => Some(reorder(start_index + 1)),
        ItemCommand::MoveToBottom => Some(reorder(last)),
        ItemCommand::MoveTo(finish_container_id) => {
            state.container(finish_container_id)?;
            if *finish_container_id == container.id {
                None
            } else {
                Some(MoveRequest::MoveItem {
                    start_container_id: container.id.clone(),
                    finish_container_id: finish_container_id.clone(),
                    start_item_index: start_index,
                    finish_item_index: None,
                    trigger: Trigger::Keyboard,
                })
            }
        }
    };
    Ok(request)
}

/// Request for a keyboard command on a container, or `None` when disabled.
pub fn container_command(
    state: &BoardState,
    container_id: &str,
    command: ContainerCommand,
) -> Result<Option<MoveRequest>, BoardError> {
    let start_index = state.position_of_container(container_id)?;
    let finish_index = match command {
        ContainerCommand::MoveLeft => start_index.checked_sub(1),
        ContainerCommand::MoveRight => {
            Some(start_index + 1).filter(|index| *index < state.container_count())
        }
    };
    Ok(finish_index.map(|finish_index| MoveRequest::ReorderContainer {
        start_index,
        finish_index,
        trigger: Trigger::Keyboard,
    }))
}

/// Containers offered as "move to" destinations for items in `container_id`.
pub fn move_targets<'a>(state: &'a BoardState, container_id: &str) -> Vec<&'a Container> {
    state
        .containers()
        .filter(|container| container.id != container_id)
        .collect()
}

// ============================================================================
// Action menus
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Item {
        item_id: String,
        command: ItemCommand,
    },
    Container {
        container_id: String,
        command: ContainerCommand,
    },
}

/// One row of an action menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub command: Command,
    pub enabled: bool,
}

/// Action menu for an item: the four reorder commands, then one entry per
/// other container.
pub fn item_menu(state: &BoardState, item_id: &str) -> Result<Vec<MenuEntry>, BoardError> {
    let (container, _) = state.locate_item(item_id)?;

    let mut commands: Vec<(String, ItemCommand)> = vec![
        ("Move to top".to_string(), ItemCommand::MoveToTop),
        ("Move up".to_string(), ItemCommand::MoveUp),
        ("Move down".to_string(), ItemCommand::MoveDown),
        ("Move to bottom".to_string(), ItemCommand::MoveToBottom),
    ];
    commands.extend(move_targets(state, &container.id).into_iter().map(|target| {
        (
            format!("Move to {}", target.title),
            ItemCommand::MoveTo(target.id.clone()),
        )
    }));

    commands
        .into_iter()
        .map(|(label, command)| -> Result<MenuEntry, BoardError> {
            let enabled = item_command(state, item_id, &command)?.is_some();
            Ok(MenuEntry {
                label,
                command: Command::Item {
                    item_id: item_id.to_string(),
                    command,
                },
                enabled,
            })
        })
        .collect()
}

/// Action menu for a container: move left and move right.
pub fn container_menu(
    state: &BoardState,
    container_id: &str,
) -> Result<Vec<MenuEntry>, BoardError> {
    [
        ("Move left", ContainerCommand::MoveLeft),
        ("Move right", ContainerCommand::MoveRight),
    ]
    .into_iter()
    .map(|(label, command)| -> Result<MenuEntry, BoardError> {
        let enabled = container_command(state, container_id, command)?.is_some();
        Ok(MenuEntry {
            label: label.to_string(),
            command: Command::Container {
                container_id: container_id.to_string(),
                command,
            },
            enabled,
        })
    })
    .collect()
}

/// Request for a menu command, or `None` when it is disabled.
pub fn command_request(
    state: &BoardState,
    command: &Command,
) -> Result<Option<MoveRequest>, BoardError> {
    match command {
        Command::Item { item_id, command } => item_command(state, item_id, command),
        Command::Container {
            container_id,
            command,
        } => container_command(state, container_id, *command),
    }
}
