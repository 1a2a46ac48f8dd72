//! # Destination Resolver
//!
//! Turns a drop position (target index plus closest-edge hint) into the index
//! the dragged element should occupy after the move.
//!
//! ```text
//! list:   [A] [B] [C] [D]          drag A, drop on C's "after" edge
//! raw:                 ^ 3         target 2 + 1
//! final:           ^ 2             A leaves first, so everything shifts down
//! result: [B] [C] [A] [D]
//! ```

use serde::{Deserialize, Serialize};

/// Which side of the drop target the pointer was closest to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Before,
    After,
}

/// The axis the geometry collaborator measured the edge on. Columns of
/// containers are laid out horizontally, items within a container vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Insertion index relative to a target, before accounting for the removal
/// of the dragged element. Use this directly when source and destination are
/// different lists.
pub fn insertion_index(target_index: usize, edge: Option<Edge>) -> usize {
    match edge {
        Some(Edge::After) => target_index + 1,
        Some(Edge::Before) | None => target_index,
    }
}

/// Final index for a move within one list.
///
/// With no edge hint the element takes the target's place, whatever
/// `start_index` is. Otherwise the raw insertion index is shifted down by one
/// when the element is moving forward past its own old slot.
/// `_axis` only tells the caller how the edge was measured.
pub fn resolve_index(
    start_index: usize,
    target_index: usize,
    edge: Option<Edge>,
    _axis: Axis,
) -> usize {
    if edge.is_none() {
        return target_index;
    }
    let destination = insertion_index(target_index, edge);
    if start_index < destination {
        destination - 1
    } else {
        destination
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_edge_returns_target() {
        for start in 0..6 {
            assert_eq!(resolve_index(start, 3, None, Axis::Vertical), 3);
        }
    }

    #[test]
    fn test_moving_forward() {
        // A B C D: A onto C
        assert_eq!(resolve_index(0, 2, Some(Edge::Before), Axis::Vertical), 1);
        assert_eq!(resolve_index(0, 2, Some(Edge::After), Axis::Vertical), 2);
    }

    #[test]
    fn test_moving_backward() {
        // A B C D: D onto B
        assert_eq!(resolve_index(3, 1, Some(Edge::Before), Axis::Horizontal), 1);
        assert_eq!(resolve_index(3, 1, Some(Edge::After), Axis::Horizontal), 2);
    }

    #[test]
    fn test_neighbour_edges_are_no_ops() {
        // C dropped after B, or before D, stays at 2
        assert_eq!(resolve_index(2, 1, Some(Edge::After), Axis::Vertical), 2);
        assert_eq!(resolve_index(2, 3, Some(Edge::Before), Axis::Vertical), 2);
        // dropped onto itself
        assert_eq!(resolve_index(2, 2, Some(Edge::Before), Axis::Vertical), 2);
        assert_eq!(resolve_index(2, 2, Some(Edge::After), Axis::Vertical), 2);
    }

    #[test]
    fn test_after_never_resolves_before_before() {
        for start in 0..5 {
            for target in 0..5 {
                let after = resolve_index(start, target, Some(Edge::After), Axis::Vertical);
                let before = resolve_index(start, target, Some(Edge::Before), Axis::Vertical);
                assert!(after >= before, "start={start} target={target}");
            }
        }
    }

    #[test]
    fn test_axis_does_not_change_arithmetic() {
        for edge in [None, Some(Edge::Before), Some(Edge::After)] {
            assert_eq!(
                resolve_index(1, 3, edge, Axis::Horizontal),
                resolve_index(1, 3, edge, Axis::Vertical)
            );
        }
    }

    #[test]
    fn test_insertion_index_has_no_removal_correction() {
        assert_eq!(insertion_index(0, Some(Edge::Before)), 0);
        assert_eq!(insertion_index(0, Some(Edge::After)), 1);
        assert_eq!(insertion_index(4, None), 4);
    }

    #[test]
    fn test_edge_serde_names() {
        assert_eq!(serde_json::to_string(&Edge::Before).unwrap(), "\"before\"");
        let axis: Axis = serde_json::from_str("\"horizontal\"").unwrap();
        assert_eq!(axis, Axis::Horizontal);
    }
}
