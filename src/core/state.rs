//! # Board State
//!
//! The single source of truth for the board. A `BoardState` is an immutable
//! value: transitions in [`outcome`](crate::core::outcome) build a new value
//! and leave the old one untouched.
//!
//! ```text
//! BoardState
//! ├── containers_by_id: HashMap<id, Arc<Container>>   // keyed lookup
//! ├── ordered_container_ids: Vec<id>                  // board order
//! └── last_operation: Option<Operation>               // history of one
//! ```
//!
//! Containers are shared behind `Arc`. A transition only allocates a new
//! `Container` for the lists it actually changes, so unchanged containers are
//! shared between the old and new state while changed ones never are.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::error::BoardError;
use crate::core::outcome::Operation;

/// A card on the board. Identity is `id`, which never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub role: String,
}

/// A menu-card: a titled, ordered list of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Container {
    /// Position of the item with `item_id`, if this container holds it.
    pub fn position_of(&self, item_id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == item_id)
    }

    /// Item at `index`, or `UnknownItem` naming the empty slot.
    pub fn item_at(&self, index: usize) -> Result<&Item, BoardError> {
        self.items
            .get(index)
            .ok_or_else(|| BoardError::UnknownItem(format!("{}[{index}]", self.id)))
    }
}

/// Two seed containers shared an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateContainer(pub String);

impl fmt::Display for DuplicateContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duplicate container id: {}", self.0)
    }
}

impl std::error::Error for DuplicateContainer {}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoardState {
    containers_by_id: HashMap<String, Arc<Container>>,
    ordered_container_ids: Vec<String>,
    last_operation: Option<Operation>,
}

impl BoardState {
    /// Builds a board from containers in display order.
    pub fn new(containers: Vec<Container>) -> Result<Self, DuplicateContainer> {
        let mut containers_by_id = HashMap::with_capacity(containers.len());
        let mut ordered_container_ids = Vec::with_capacity(containers.len());

        for container in containers {
            if containers_by_id.contains_key(&container.id) {
                return Err(DuplicateContainer(container.id));
            }
            ordered_container_ids.push(container.id.clone());
            containers_by_id.insert(container.id.clone(), Arc::new(container));
        }

        Ok(Self {
            containers_by_id,
            ordered_container_ids,
            last_operation: None,
        })
    }

    pub fn container(&self, id: &str) -> Result<&Container, BoardError> {
        self.containers_by_id
            .get(id)
            .map(Arc::as_ref)
            .ok_or_else(|| BoardError::UnknownContainer(id.to_string()))
    }

    /// Shared pointer to a container; lets callers check structural sharing.
    pub fn container_arc(&self, id: &str) -> Option<&Arc<Container>> {
        self.containers_by_id.get(id)
    }

    /// Containers in board order.
    pub fn containers(&self) -> impl Iterator<Item = &Container> + '_ {
        self.ordered_container_ids
            .iter()
            .filter_map(|id| self.containers_by_id.get(id).map(Arc::as_ref))
    }

    pub fn ordered_container_ids(&self) -> &[String] {
        &self.ordered_container_ids
    }

    pub fn container_count(&self) -> usize {
        self.ordered_container_ids.len()
    }

    /// Board position of a container.
    pub fn position_of_container(&self, id: &str) -> Result<usize, BoardError> {
        self.ordered_container_ids
            .iter()
            .position(|candidate| candidate == id)
            .ok_or_else(|| BoardError::UnknownContainer(id.to_string()))
    }

    /// Finds the container currently holding `item_id` and the item's index in it.
    pub fn locate_item(&self, item_id: &str) -> Result<(&Container, usize), BoardError> {
        self.containers()
            .find_map(|container| container.position_of(item_id).map(|index| (container, index)))
            .ok_or_else(|| BoardError::UnknownItem(item_id.to_string()))
    }

    /// Total number of items across all containers.
    pub fn item_count(&self) -> usize {
        self.containers_by_id.values().map(|c| c.items.len()).sum()
    }

    pub fn last_operation(&self) -> Option<&Operation> {
        self.last_operation.as_ref()
    }

    /// Revision of the most recent commit; `0` before any commit.
    pub fn revision(&self) -> u64 {
        self.last_operation.as_ref().map_or(0, |op| op.revision)
    }

    /// Checks the structural invariants: order and key set agree, and every
    /// item id appears exactly once on the board.
    pub fn is_consistent(&self) -> bool {
        let ordered: HashSet<&String> = self.ordered_container_ids.iter().collect();
        if ordered.len() != self.ordered_container_ids.len()
            || ordered.len() != self.containers_by_id.len()
            || !self.containers_by_id.keys().all(|id| ordered.contains(id))
        {
            return false;
        }

        let mut seen = HashSet::new();
        self.containers_by_id
            .values()
            .flat_map(|c| c.items.iter())
            .all(|item| seen.insert(item.id.as_str()))
    }

    // ------------------------------------------------------------------------
    // Copy-on-write builders used by transitions
    // ------------------------------------------------------------------------

    pub(crate) fn with_order(&self, ordered_container_ids: Vec<String>) -> Self {
        Self {
            containers_by_id: self.containers_by_id.clone(),
            ordered_container_ids,
            last_operation: self.last_operation.clone(),
        }
    }

    /// Replaces the container with the same id by a freshly allocated one.
    pub(crate) fn with_container(mut self, container: Container) -> Self {
        self.containers_by_id
            .insert(container.id.clone(), Arc::new(container));
        self
    }

    pub(crate) fn with_operation(mut self, operation: Operation) -> Self {
        self.last_operation = Some(operation);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{basic_board, item};

    #[test]
    fn test_new_preserves_order() {
        let board = basic_board();
        assert_eq!(board.ordered_container_ids(), ["about", "services", "contact"]);
        assert_eq!(board.container_count(), 3);
        assert!(board.last_operation().is_none());
        assert_eq!(board.revision(), 0);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_new_rejects_duplicate_container() {
        let result = BoardState::new(vec![
            Container {
                id: "a".into(),
                title: "A".into(),
                items: vec![],
            },
            Container {
                id: "a".into(),
                title: "Again".into(),
                items: vec![],
            },
        ]);
        assert_eq!(result, Err(DuplicateContainer("a".to_string())));
    }

    #[test]
    fn test_unknown_container_lookup() {
        let board = basic_board();
        assert_eq!(
            board.container("missing").map(|c| c.id.clone()),
            Err(BoardError::UnknownContainer("missing".to_string()))
        );
        assert!(board.position_of_container("missing").is_err());
    }

    #[test]
    fn test_locate_item() {
        let board = basic_board();
        let (container, index) = board.locate_item("id:4").expect("seeded item");
        assert_eq!(container.id, "contact");
        assert_eq!(index, 1);
        assert_eq!(
            board.locate_item("id:99").map(|(c, i)| (c.id.clone(), i)),
            Err(BoardError::UnknownItem("id:99".to_string()))
        );
    }

    #[test]
    fn test_item_at_reports_slot() {
        let board = basic_board();
        let about = board.container("about").unwrap();
        assert_eq!(about.item_at(0).unwrap().id, "id:1");
        assert_eq!(
            about.item_at(5),
            Err(BoardError::UnknownItem("about[5]".to_string()))
        );
    }

    #[test]
    fn test_is_consistent_detects_duplicate_item() {
        let board = basic_board();
        let mut contact = board.container("contact").unwrap().clone();
        contact.items.push(item(1));
        let broken = board.clone().with_container(contact);
        assert!(!broken.is_consistent());
    }

    #[test]
    fn test_with_container_shares_untouched() {
        let board = basic_board();
        let mut about = board.container("about").unwrap().clone();
        about.items.reverse();
        let next = board.clone().with_container(about);

        assert!(Arc::ptr_eq(
            board.container_arc("services").unwrap(),
            next.container_arc("services").unwrap()
        ));
        assert!(!Arc::ptr_eq(
            board.container_arc("about").unwrap(),
            next.container_arc("about").unwrap()
        ));
        assert_eq!(board.container("about").unwrap().items[0].id, "id:1");
    }
}
