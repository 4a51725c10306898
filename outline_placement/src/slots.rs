// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop slot enumeration.
//!
//! A drop position `p` is an insertion index into the tree's display order: "between row
//! `p - 1` and row `p`".

use alloc::vec::Vec;

use outline_tree::{NodeId, Tree, TreeError};

/// Every position where a family could land at `level`.
///
/// For level `L` these are the positions after the family of every node at `L`, the
/// positions directly after every node at `L - 1` (that is, first-child slots), and
/// position 0 when `L` is 0. Sorted and deduplicated.
pub fn drop_positions_for_level<T>(tree: &Tree<T>, level: usize) -> Vec<usize> {
    let mut positions = Vec::new();
    if level == 0 {
        positions.push(0);
    }
    for (index, node) in tree.iter().enumerate() {
        if level > 0 && node.level() == level - 1 {
            positions.push(index + 1);
        } else if node.level() == level {
            positions.push(tree.family_range_at(index).end);
        }
    }
    positions.sort_unstable();
    positions.dedup();
    positions
}

/// Positions that would drop `dragged` into its own family at `level`.
///
/// These are the positions after every member of the family. When `level` is shallower
/// than the dragged node, one trailing position per level of difference is released: the
/// end of the family is a legal spot for a shallower sibling.
pub fn invalid_drop_positions<T>(
    tree: &Tree<T>,
    dragged: NodeId,
    level: usize,
) -> Result<Vec<usize>, TreeError> {
    let range = tree.family_range(dragged)?;
    let node_level = tree.level(dragged)?;
    let mut positions: Vec<usize> = (range.start + 1..=range.end).collect();
    for _ in level..node_level {
        positions.pop();
    }
    Ok(positions)
}

/// [`drop_positions_for_level`] minus [`invalid_drop_positions`].
pub fn valid_drop_positions<T>(
    tree: &Tree<T>,
    dragged: NodeId,
    level: usize,
) -> Result<Vec<usize>, TreeError> {
    let invalid = invalid_drop_positions(tree, dragged, level)?;
    let mut positions = drop_positions_for_level(tree, level);
    positions.retain(|p| !invalid.contains(p));
    Ok(positions)
}

/// The first candidate at or after the hovered row's index.
pub fn select_candidate(positions: &[usize], hovered_index: usize) -> Option<usize> {
    positions.iter().copied().find(|&p| p >= hovered_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use outline_tree::Node;

    // 0 A
    // 1   B
    // 2     C
    // 3   D
    // 4 E
    fn sample() -> Tree<()> {
        Tree::from_nodes([
            Node::new(NodeId(1), None, 0, ()),
            Node::new(NodeId(2), Some(NodeId(1)), 1, ()),
            Node::new(NodeId(3), Some(NodeId(2)), 2, ()),
            Node::new(NodeId(4), Some(NodeId(1)), 1, ()),
            Node::new(NodeId(5), None, 0, ()),
        ])
        .unwrap()
    }

    #[test]
    fn positions_per_level() {
        let tree = sample();
        assert_eq!(drop_positions_for_level(&tree, 0), [0, 4, 5]);
        assert_eq!(drop_positions_for_level(&tree, 1), [1, 3, 4, 5]);
        assert_eq!(drop_positions_for_level(&tree, 2), [2, 3, 4]);
        assert_eq!(drop_positions_for_level(&tree, 3), [3]);
    }

    #[test]
    fn invalid_positions_release_trailing_slots() {
        let tree = sample();
        assert_eq!(invalid_drop_positions(&tree, NodeId(2), 1).unwrap(), [2, 3]);
        assert_eq!(invalid_drop_positions(&tree, NodeId(2), 0).unwrap(), [2]);
        assert_eq!(invalid_drop_positions(&tree, NodeId(2), 2).unwrap(), [2, 3]);
        assert_eq!(invalid_drop_positions(&tree, NodeId(5), 0).unwrap(), [5]);
    }

    #[test]
    fn valid_positions_exclude_own_family() {
        let tree = sample();
        assert_eq!(valid_drop_positions(&tree, NodeId(2), 1).unwrap(), [1, 4, 5]);
        assert_eq!(valid_drop_positions(&tree, NodeId(2), 2).unwrap(), [4]);
    }

    #[test]
    fn candidate_is_first_at_or_after_hovered() {
        assert_eq!(select_candidate(&[0, 4, 5], 0), Some(0));
        assert_eq!(select_candidate(&[0, 4, 5], 1), Some(4));
        assert_eq!(select_candidate(&[0, 4, 5], 5), Some(5));
        assert_eq!(select_candidate(&[0, 4], 5), None);
    }

    #[test]
    fn unknown_dragged_node() {
        let tree = sample();
        assert_eq!(
            invalid_drop_positions(&tree, NodeId(9), 0),
            Err(TreeError::NotAMember(NodeId(9)))
        );
    }
}
