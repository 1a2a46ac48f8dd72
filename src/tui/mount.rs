//! # Mounted Entities
//!
//! Tracks which columns and cards are on screen, mints their handles, and
//! holds their registry [`Registration`]s. After each frame the visible set
//! is diffed against the mounted set: newcomers register, leavers drop their
//! guard.
//!
//! Cards are keyed by `(container, item)`, so a card that changes container
//! is a different mount: it registers again with fresh handles and the old
//! mount is released afterwards.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::core::registry::{ContainerEntry, Handle, IdentityRegistry, ItemEntry, Registration};
use crate::tui::ui::BoardLayout;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MountKey {
    Column(String),
    Card { container_id: String, item_id: String },
}

/// What a handle points at on screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Column(String),
    Card(String),
    /// The control that opens a card's action menu.
    CardTrigger(String),
}

#[derive(Debug)]
struct Mounted {
    handles: Vec<Handle>,
    // Held for its Drop
    _registration: Registration,
}

#[derive(Debug, Default)]
pub struct Mounts {
    next_handle: u64,
    mounted: HashMap<MountKey, Mounted>,
    targets: HashMap<Handle, Target>,
}

impl Mounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible entities of a rendered frame.
    pub fn visible(layout: &BoardLayout) -> Vec<MountKey> {
        let mut keys = Vec::new();
        for column in &layout.columns {
            keys.push(MountKey::Column(column.container_id.clone()));
            keys.extend(column.cards.iter().map(|card| MountKey::Card {
                container_id: column.container_id.clone(),
                item_id: card.item_id.clone(),
            }));
        }
        keys
    }

    /// Brings the mounted set in line with `visible`. Mounts first, then
    /// unmounts. Returns `(mounted, unmounted)` counts.
    pub fn sync(&mut self, registry: &IdentityRegistry, visible: Vec<MountKey>) -> (usize, usize) {
        let wanted: HashSet<MountKey> = visible.iter().cloned().collect();

        let mut mounted = 0;
        for key in visible {
            if !self.mounted.contains_key(&key) {
                let entity = self.mount(registry, &key);
                self.mounted.insert(key, entity);
                mounted += 1;
            }
        }

        let leaving: Vec<MountKey> = self
            .mounted
            .keys()
            .filter(|key| !wanted.contains(*key))
            .cloned()
            .collect();
        for key in &leaving {
            if let Some(entity) = self.mounted.remove(key) {
                for handle in &entity.handles {
                    self.targets.remove(handle);
                }
            }
        }

        if mounted > 0 || !leaving.is_empty() {
            debug!("Mounted {} and unmounted {} entities", mounted, leaving.len());
        }
        (mounted, leaving.len())
    }

    fn mount(&mut self, registry: &IdentityRegistry, key: &MountKey) -> Mounted {
        match key {
            MountKey::Column(container_id) => {
                let element = self.mint(Target::Column(container_id.clone()));
                Mounted {
                    handles: vec![element],
                    _registration: registry
                        .register_container(container_id, ContainerEntry { element }),
                }
            }
            MountKey::Card { item_id, .. } => {
                let element = self.mint(Target::Card(item_id.clone()));
                let action_trigger = self.mint(Target::CardTrigger(item_id.clone()));
                Mounted {
                    handles: vec![element, action_trigger],
                    _registration: registry.register_item(
                        item_id,
                        ItemEntry {
                            element,
                            action_trigger,
                        },
                    ),
                }
            }
        }
    }

    fn mint(&mut self, target: Target) -> Handle {
        self.next_handle += 1;
        let handle = Handle(self.next_handle);
        self.targets.insert(handle, target);
        handle
    }

    /// Target of a live handle. Handles of unmounted entities resolve to nothing.
    pub fn target(&self, handle: Handle) -> Option<&Target> {
        self.targets.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }
}
