//! # Identity Registry
//!
//! Maps item and container ids to the opaque [`Handle`]s of whatever visual
//! entity currently represents them. Effects (highlight, focus) look handles
//! up here; business state never does.
//!
//! Registration is scoped: [`register_item`](IdentityRegistry::register_item)
//! returns a [`Registration`] guard, and dropping the guard releases the
//! entry. Every registration carries a generation number, so a guard released
//! late (after the entity was remounted and registered again) cannot evict
//! the newer entry. Each guard also only ever touches the map of its own kind.
//!
//! The registry is owned by one board session and shared by cheap clones.
//! The event loop is single-threaded, so the maps live in `Rc<RefCell<_>>`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::error::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Item,
    Container,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Item => write!(f, "item"),
            EntityKind::Container => write!(f, "container"),
        }
    }
}

/// Opaque reference to a visual entity. Minted by the rendering side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Handle(pub u64);

/// What a mounted item card exposes: the card itself, and the control that
/// opens its action menu (where focus goes back to after a move).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemEntry {
    pub element: Handle,
    pub action_trigger: Handle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerEntry {
    pub element: Handle,
}

#[derive(Debug)]
struct Slot<E> {
    entry: E,
    generation: u64,
}

#[derive(Debug, Default)]
struct Inner {
    items: HashMap<String, Slot<ItemEntry>>,
    containers: HashMap<String, Slot<ContainerEntry>>,
    next_generation: u64,
}

impl Inner {
    fn next_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    fn remove(&mut self, kind: EntityKind, id: &str, generation: u64) -> bool {
        let current = match kind {
            EntityKind::Item => self.items.get(id).map(|slot| slot.generation),
            EntityKind::Container => self.containers.get(id).map(|slot| slot.generation),
        };
        if current != Some(generation) {
            return false;
        }
        match kind {
            EntityKind::Item => self.items.remove(id).is_some(),
            EntityKind::Container => self.containers.remove(id).is_some(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IdentityRegistry {
    inner: Rc<RefCell<Inner>>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an item card. The last registration for an id wins.
    pub fn register_item(&self, id: &str, entry: ItemEntry) -> Registration {
        let mut inner = self.inner.borrow_mut();
        let generation = inner.next_generation();
        inner
            .items
            .insert(id.to_string(), Slot { entry, generation });
        debug!("Registered item {} (generation {})", id, generation);
        self.guard(EntityKind::Item, id, generation)
    }

    /// Registers a container column. The last registration for an id wins.
    pub fn register_container(&self, id: &str, entry: ContainerEntry) -> Registration {
        let mut inner = self.inner.borrow_mut();
        let generation = inner.next_generation();
        inner
            .containers
            .insert(id.to_string(), Slot { entry, generation });
        debug!("Registered container {} (generation {})", id, generation);
        self.guard(EntityKind::Container, id, generation)
    }

    pub fn item(&self, id: &str) -> Result<ItemEntry, BoardError> {
        self.inner
            .borrow()
            .items
            .get(id)
            .map(|slot| slot.entry)
            .ok_or_else(|| not_registered(EntityKind::Item, id))
    }

    pub fn container(&self, id: &str) -> Result<ContainerEntry, BoardError> {
        self.inner
            .borrow()
            .containers
            .get(id)
            .map(|slot| slot.entry)
            .ok_or_else(|| not_registered(EntityKind::Container, id))
    }

    /// Element handle for any entity kind.
    pub fn lookup(&self, kind: EntityKind, id: &str) -> Result<Handle, BoardError> {
        match kind {
            EntityKind::Item => self.item(id).map(|entry| entry.element),
            EntityKind::Container => self.container(id).map(|entry| entry.element),
        }
    }

    pub fn is_registered(&self, kind: EntityKind, id: &str) -> bool {
        self.lookup(kind, id).is_ok()
    }

    /// Number of live registrations across both kinds.
    pub fn len(&self) -> usize {
        let inner = self.inner.borrow();
        inner.items.len() + inner.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn guard(&self, kind: EntityKind, id: &str, generation: u64) -> Registration {
        Registration {
            registry: Rc::downgrade(&self.inner),
            kind,
            id: id.to_string(),
            generation,
            released: false,
        }
    }
}

fn not_registered(kind: EntityKind, id: &str) -> BoardError {
    BoardError::NotRegistered {
        kind,
        id: id.to_string(),
    }
}

/// Keeps one registry entry alive. Dropping it unregisters the entry unless a
/// newer registration for the same id has replaced it in the meantime.
#[must_use = "dropping a Registration unregisters it immediately"]
#[derive(Debug)]
pub struct Registration {
    registry: Weak<RefCell<Inner>>,
    kind: EntityKind,
    id: String,
    generation: u64,
    released: bool,
}

impl Registration {
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Releases now. Returns whether this registration was still the current
    /// one and got removed.
    pub fn release(mut self) -> bool {
        self.unregister()
    }

    fn unregister(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;

        let Some(shared) = self.registry.upgrade() else {
            return false;
        };
        let Ok(mut inner) = shared.try_borrow_mut() else {
            warn!(
                "Registry busy, leaving {} {} registered",
                self.kind, self.id
            );
            return false;
        };
        let removed = inner.remove(self.kind, &self.id, self.generation);
        if removed {
            debug!("Unregistered {} {} (generation {})", self.kind, self.id, self.generation);
        } else {
            debug!(
                "Stale release of {} {} (generation {}) ignored",
                self.kind, self.id, self.generation
            );
        }
        removed
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.unregister();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_entry(n: u64) -> ItemEntry {
        ItemEntry {
            element: Handle(n),
            action_trigger: Handle(n + 100),
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = IdentityRegistry::new();
        let _card = registry.register_item("id:1", item_entry(1));
        let _column = registry.register_container("about", ContainerEntry { element: Handle(7) });

        assert_eq!(registry.item("id:1"), Ok(item_entry(1)));
        assert_eq!(registry.lookup(EntityKind::Container, "about"), Ok(Handle(7)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_lookup_after_release_fails() {
        let registry = IdentityRegistry::new();
        let registration = registry.register_item("id:1", item_entry(1));
        assert!(registration.release());

        assert_eq!(
            registry.lookup(EntityKind::Item, "id:1"),
            Err(BoardError::NotRegistered {
                kind: EntityKind::Item,
                id: "id:1".to_string(),
            })
        );
    }

    #[test]
    fn test_drop_releases() {
        let registry = IdentityRegistry::new();
        {
            let _registration =
                registry.register_container("about", ContainerEntry { element: Handle(1) });
            assert!(registry.is_registered(EntityKind::Container, "about"));
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_last_registration_wins() {
        let registry = IdentityRegistry::new();
        let _first = registry.register_item("id:1", item_entry(1));
        let _second = registry.register_item("id:1", item_entry(2));
        assert_eq!(registry.item("id:1"), Ok(item_entry(2)));
    }

    #[test]
    fn test_stale_release_keeps_newer_registration() {
        let registry = IdentityRegistry::new();
        let old = registry.register_item("id:1", item_entry(1));
        let new = registry.register_item("id:1", item_entry(2));
        assert!(new.generation() > old.generation());

        // old card unmounts after the new one mounted
        assert!(!old.release());
        assert_eq!(registry.item("id:1"), Ok(item_entry(2)));

        drop(new);
        assert!(!registry.is_registered(EntityKind::Item, "id:1"));
    }

    #[test]
    fn test_container_release_leaves_item_with_same_id() {
        let registry = IdentityRegistry::new();
        let _item = registry.register_item("shared", item_entry(1));
        let column = registry.register_container("shared", ContainerEntry { element: Handle(9) });

        assert!(column.release());
        assert_eq!(registry.item("shared"), Ok(item_entry(1)));
        assert!(registry.container("shared").is_err());
    }

    #[test]
    fn test_release_after_registry_dropped() {
        let registry = IdentityRegistry::new();
        let registration = registry.register_item("id:1", item_entry(1));
        drop(registry);
        assert_eq!(registration.id(), "id:1");
        assert_eq!(registration.kind(), EntityKind::Item);
        assert!(!registration.release());
    }
}
