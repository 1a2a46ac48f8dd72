//! # Seed Data
//!
//! Initial boards. Three sources:
//!
//! - `basic`: three menu-cards (About, Services, Contact), two people each
//! - `generated`: `n` cards of `m` people from a deterministic generator
//! - a JSON file: `{ "containers": [ { "id", "title", "items": [...] } ] }`
//!
//! Item ids are `id:{position}` where position counts up from 1 across the
//! whole board, so ids are unique whatever the source.

use std::fmt;
use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::core::state::{BoardState, Container, DuplicateContainer, Item};

const NAMES: &[&str] = &[
    "Zoe", "Alexander", "Aliza", "Alvin", "Angie", "Arjun", "Blair", "Claudia", "Colin", "Ed",
    "Effie", "Eliot",
];

const ROLES: &[&str] = &[
    "Engineer",
    "Senior Engineer",
    "Principal Engineer",
    "Engineering Manager",
    "Designer",
];

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum SeedError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(DuplicateContainer),
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedError::Io(e) => write!(f, "seed I/O error: {e}"),
            SeedError::Parse(e) => write!(f, "seed parse error: {e}"),
            SeedError::Invalid(e) => write!(f, "invalid seed: {e}"),
        }
    }
}

impl std::error::Error for SeedError {}

impl From<DuplicateContainer> for SeedError {
    fn from(e: DuplicateContainer) -> Self {
        SeedError::Invalid(e)
    }
}

// ============================================================================
// Generators
// ============================================================================

/// The person at a board-wide position. Names and roles cycle.
pub fn person_from_position(position: usize) -> Item {
    Item {
        id: format!("id:{position}"),
        name: NAMES[position % NAMES.len()].to_string(),
        role: ROLES[position % ROLES.len()].to_string(),
    }
}

/// About, Services and Contact with two people each, in that board order.
pub fn basic_board() -> BoardState {
    let about = container("about", "About", vec![person_from_position(1), person_from_position(2)]);
    let contact = container(
        "contact",
        "Contact",
        vec![person_from_position(3), person_from_position(4)],
    );
    let services = container(
        "services",
        "Services",
        vec![person_from_position(5), person_from_position(6)],
    );

    // ids are literals above and distinct
    BoardState::new(vec![about, services, contact]).unwrap_or_default()
}

/// `containers` cards `card-0..` of `items_per_container` people each.
pub fn generated_board(containers: usize, items_per_container: usize) -> BoardState {
    let mut position = 0;
    let cards = (0..containers)
        .map(|i| {
            let items = (0..items_per_container)
                .map(|_| {
                    position += 1;
                    person_from_position(position)
                })
                .collect();
            container(&format!("card-{i}"), &format!("Menu card {i}"), items)
        })
        .collect();

    // card-{i} ids are distinct by construction
    BoardState::new(cards).unwrap_or_default()
}

fn container(id: &str, title: &str, items: Vec<Item>) -> Container {
    Container {
        id: id.to_string(),
        title: title.to_string(),
        items,
    }
}

// ============================================================================
// JSON Seeds
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub containers: Vec<Container>,
}

impl SeedData {
    pub fn into_board(self) -> Result<BoardState, SeedError> {
        Ok(BoardState::new(self.containers)?)
    }
}

/// Parses a board from JSON text.
pub fn parse_seed(json: &str) -> Result<BoardState, SeedError> {
    let data: SeedData = serde_json::from_str(json).map_err(SeedError::Parse)?;
    data.into_board()
}

/// Reads and parses a JSON seed file.
pub fn load_seed_file(path: &Path) -> Result<BoardState, SeedError> {
    let contents = fs::read_to_string(path).map_err(SeedError::Io)?;
    let board = parse_seed(&contents)?;
    info!(
        "Loaded seed from {} ({} containers, {} items)",
        path.display(),
        board.container_count(),
        board.item_count()
    );
    Ok(board)
}

/// Builds the board named by a `board.seed` setting: `"basic"`,
/// `"generated"`, or anything else as a path to a JSON seed file.
pub fn board_from_setting(
    seed: &str,
    containers: usize,
    items_per_container: usize,
) -> Result<BoardState, SeedError> {
    match seed {
        "basic" => {
            info!("Using basic seed");
            Ok(basic_board())
        }
        "generated" => {
            info!(
                "Using generated seed ({} x {})",
                containers, items_per_container
            );
            Ok(generated_board(containers, items_per_container))
        }
        path => load_seed_file(Path::new(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_board_shape() {
        let board = basic_board();
        assert_eq!(board.ordered_container_ids(), ["about", "services", "contact"]);
        assert_eq!(board.item_count(), 6);
        assert_eq!(board.container("services").unwrap().title, "Services");
        assert!(board.is_consistent());
        assert!(board.last_operation().is_none());
    }

    #[test]
    fn test_person_generator_is_deterministic() {
        let first = person_from_position(1);
        assert_eq!(first.id, "id:1");
        assert_eq!(first.name, "Alexander");
        assert_eq!(first.role, "Senior Engineer");
        assert_eq!(person_from_position(13).name, person_from_position(1).name);
        assert_eq!(person_from_position(7), person_from_position(7));
    }

    #[test]
    fn test_generated_board_ids_are_unique() {
        let board = generated_board(3, 4);
        assert_eq!(board.ordered_container_ids(), ["card-0", "card-1", "card-2"]);
        assert_eq!(board.container("card-2").unwrap().title, "Menu card 2");
        assert_eq!(board.container("card-1").unwrap().items[0].id, "id:5");
        assert_eq!(board.item_count(), 12);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_generated_board_can_be_empty() {
        let board = generated_board(0, 5);
        assert_eq!(board.container_count(), 0);
        let board = generated_board(2, 0);
        assert_eq!(board.item_count(), 0);
    }

    #[test]
    fn test_parse_seed_keeps_array_order() {
        let json = r#"{
            "containers": [
                { "id": "b", "title": "Bee", "items": [ { "id": "x", "name": "X", "role": "R" } ] },
                { "id": "a", "title": "Ay" }
            ]
        }"#;
        let board = parse_seed(json).unwrap();
        assert_eq!(board.ordered_container_ids(), ["b", "a"]);
        assert!(board.container("a").unwrap().items.is_empty());
    }

    #[test]
    fn test_parse_seed_rejects_duplicates() {
        let json = r#"{ "containers": [ { "id": "a", "title": "1" }, { "id": "a", "title": "2" } ] }"#;
        let err = parse_seed(json).unwrap_err();
        assert!(matches!(err, SeedError::Invalid(DuplicateContainer(ref id)) if id == "a"));
        assert_eq!(err.to_string(), "invalid seed: duplicate container id: a");
    }

    #[test]
    fn test_parse_seed_rejects_malformed_json() {
        assert!(matches!(parse_seed("{ nope"), Err(SeedError::Parse(_))));
    }

    #[test]
    fn test_missing_seed_file_is_io_error() {
        let result = board_from_setting("/definitely/not/here.json", 1, 1);
        assert!(matches!(result, Err(SeedError::Io(_))));
    }

    #[test]
    fn test_board_from_setting_named_seeds() {
        assert_eq!(board_from_setting("basic", 9, 9).unwrap().container_count(), 3);
        assert_eq!(board_from_setting("generated", 2, 3).unwrap().item_count(), 6);
    }
}
