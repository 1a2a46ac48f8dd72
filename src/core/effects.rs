//! # Effect Dispatcher
//!
//! Reacts to committed operations. Given the state a commit produced, the
//! dispatcher decides which side effects the rendering side should perform:
//!
//! | Outcome            | Highlight | Announce        | Restore focus   |
//! |--------------------|-----------|-----------------|-----------------|
//! | `ContainerReorder` | always    | always          | never           |
//! | `ItemReorder`      | always    | keyboard only   | never           |
//! | `ItemMove`         | always    | keyboard only   | keyboard only   |
//!
//! Focus is restored after a keyboard cross-container move because the card
//! remounts in its new container and loses focus.
//!
//! Handles come from the [`IdentityRegistry`]. A missing handle (the entity is
//! mid-remount) skips the highlight or focus request; it is not an error.
//! The dispatcher remembers the last revision it handled, so seeing the same
//! committed state twice fires nothing the second time.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::error::BoardError;
use crate::core::outcome::{Operation, Outcome, Trigger};
use crate::core::registry::{Handle, IdentityRegistry};
use crate::core::state::BoardState;

/// A request to one of the rendering-side collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "lowercase")]
pub enum Effect {
    /// Flash the given visual entity.
    Highlight { handle: Handle },
    /// Deliver text to the assistive-technology channel.
    Announce { text: String },
    /// Move input focus to the given entity.
    Focus { handle: Handle },
}

#[derive(Debug, Default)]
pub struct EffectDispatcher {
    last_revision: Option<u64>,
}

impl EffectDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revision of the last operation this dispatcher reacted to.
    pub fn last_revision(&self) -> Option<u64> {
        self.last_revision
    }

    /// Effects for the operation committed in `state`. Empty when there is
    /// no operation or it has already been dispatched.
    pub fn dispatch(&mut self, state: &BoardState, registry: &IdentityRegistry) -> Vec<Effect> {
        let Some(operation) = state.last_operation() else {
            return Vec::new();
        };
        if self
            .last_revision
            .is_some_and(|seen| seen >= operation.revision)
        {
            debug!("Operation {} already dispatched", operation.revision);
            return Vec::new();
        }
        self.last_revision = Some(operation.revision);

        match effects_for(state, operation, registry) {
            Ok(effects) => {
                debug!(
                    "Dispatching {} effect(s) for operation {}",
                    effects.len(),
                    operation.revision
                );
                effects
            }
            Err(e) => {
                warn!("Skipping effects for operation {}: {}", operation.revision, e);
                Vec::new()
            }
        }
    }
}

/// Computes effects for one operation. Fails only when the committed state
/// does not contain what the operation says moved.
pub fn effects_for(
    state: &BoardState,
    operation: &Operation,
    registry: &IdentityRegistry,
) -> Result<Vec<Effect>, BoardError> {
    let mut effects = Vec::new();
    let keyboard = operation.trigger == Trigger::Keyboard;

    match &operation.outcome {
        Outcome::ContainerReorder {
            start_index,
            finish_index,
            ..
        } => {
            let ids = state.ordered_container_ids();
            let moved_id = ids.get(*finish_index).ok_or(BoardError::IndexOutOfRange {
                index: *finish_index,
                len: ids.len(),
            })?;
            let container = state.container(moved_id)?;

            if let Some(entry) = skip_missing(registry.container(&container.id)) {
                effects.push(Effect::Highlight {
                    handle: entry.element,
                });
            }
            effects.push(Effect::Announce {
                text: format!(
                    "You've moved {} from position {} to position {} of {}.",
                    container.title,
                    start_index + 1,
                    finish_index + 1,
                    ids.len()
                ),
            });
        }
        Outcome::ItemReorder {
            container_id,
            start_index,
            finish_index,
        } => {
            let container = state.container(container_id)?;
            let item = container.item_at(*finish_index)?;

            if let Some(entry) = skip_missing(registry.item(&item.id)) {
                effects.push(Effect::Highlight {
                    handle: entry.element,
                });
            }
            if keyboard {
                effects.push(Effect::Announce {
                    text: format!(
                        "You've moved {} from position {} to position {} of {} in the {} menu-card.",
                        item.name,
                        start_index + 1,
                        finish_index + 1,
                        container.items.len(),
                        container.title
                    ),
                });
            }
        }
        Outcome::ItemMove {
            finish_container_id,
            start_item_index,
            finish_item_index,
        } => {
            let destination = state.container(finish_container_id)?;
            let item = destination.item_at(*finish_item_index)?;
            let entry = skip_missing(registry.item(&item.id));

            if let Some(entry) = entry {
                effects.push(Effect::Highlight {
                    handle: entry.element,
                });
            }
            if keyboard {
                effects.push(Effect::Announce {
                    text: format!(
                        "You've moved {} from position {} to position {} in the {} menu-card.",
                        item.name,
                        start_item_index + 1,
                        finish_item_index + 1,
                        destination.title
                    ),
                });
                if let Some(entry) = entry {
                    effects.push(Effect::Focus {
                        handle: entry.action_trigger,
                    });
                }
            }
        }
    }

    Ok(effects)
}

/// Treats `NotRegistered` as "skip this effect".
fn skip_missing<T>(lookup: Result<T, BoardError>) -> Option<T> {
    match lookup {
        Ok(entry) => Some(entry),
        Err(e) => {
            warn!("Effect skipped: {}", e);
            None
        }
    }
}
