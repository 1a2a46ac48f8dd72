//! # Board Errors
//!
//! Every failure in the core is local and recoverable. A failed transition
//! leaves the board untouched and commits nothing, so callers can treat any
//! `BoardError` as "no-op" after logging it.

use std::fmt;

use crate::core::registry::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// An index fell outside the list it addresses.
    IndexOutOfRange { index: usize, len: usize },
    /// No container with this id exists on the board.
    UnknownContainer(String),
    /// No item with this id (or at this position) exists.
    UnknownItem(String),
    /// The identity registry holds no handle for this entity right now.
    /// Expected during remounts; effect dispatch skips instead of failing.
    NotRegistered { kind: EntityKind, id: String },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for list of length {len}")
            }
            BoardError::UnknownContainer(id) => write!(f, "unknown container: {id}"),
            BoardError::UnknownItem(id) => write!(f, "unknown item: {id}"),
            BoardError::NotRegistered { kind, id } => {
                write!(f, "no {kind} registered for id {id}")
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// Checks `index` addresses an existing element of a list of length `len`.
pub(crate) fn check_index(index: usize, len: usize) -> Result<(), BoardError> {
    if index < len {
        Ok(())
    } else {
        Err(BoardError::IndexOutOfRange { index, len })
    }
}
