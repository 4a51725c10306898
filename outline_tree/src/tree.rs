// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered node storage and structural validation.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::error::{MalformedKind, MalformedNodeError, TreeError};
use crate::types::{Node, NodeFlags, NodeId};

/// An outline tree stored as one pre-order sequence.
///
/// Every node is immediately followed by its descendants, so a node's *family* is a
/// contiguous index range starting at the node itself.
#[derive(Clone)]
pub struct Tree<T> {
    pub(crate) nodes: Vec<Node<T>>,
    pub(crate) positions: HashMap<NodeId, usize>,
    /// One past the largest id ever held, or `None` once `u32::MAX` has been used.
    pub(crate) next_id: Option<u32>,
}

impl<T> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roots = self.nodes.iter().filter(|n| n.parent.is_none()).count();
        f.debug_struct("Tree")
            .field("len", &self.nodes.len())
            .field("roots", &roots)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            positions: HashMap::new(),
            next_id: Some(1),
        }
    }

    /// Build a tree from nodes given in display order.
    ///
    /// Validates that ids are unique, that every parent is an earlier node, that levels match
    /// parents, and that families are contiguous. `HAS_CHILDREN` is re-derived from the
    /// structure; expanded/collapsed bits are kept only on nodes with children (a node with
    /// both set is treated as expanded).
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node<T>>) -> Result<Self, MalformedNodeError> {
        let nodes: Vec<Node<T>> = nodes.into_iter().collect();
        let mut positions: HashMap<NodeId, usize> = HashMap::with_capacity(nodes.len());
        // Ids of the current ancestor chain, deepest last.
        let mut open: SmallVec<[NodeId; 16]> = SmallVec::new();

        for (index, node) in nodes.iter().enumerate() {
            if positions.insert(node.id, index).is_some() {
                return Err(MalformedNodeError::new(
                    MalformedKind::DuplicateId,
                    Some(node.id),
                ));
            }
            match node.parent {
                None => {
                    if node.level != 0 {
                        return Err(MalformedNodeError::new(
                            MalformedKind::LevelMismatch,
                            Some(node.id),
                        ));
                    }
                    open.clear();
                }
                Some(parent) => {
                    let Some(&parent_index) = positions.get(&parent).filter(|&&p| p < index)
                    else {
                        return Err(MalformedNodeError::new(
                            MalformedKind::UnknownParent,
                            Some(node.id),
                        ));
                    };
                    if node.level != nodes[parent_index].level + 1 {
                        return Err(MalformedNodeError::new(
                            MalformedKind::LevelMismatch,
                            Some(node.id),
                        ));
                    }
                    // The parent must still be on the open chain; otherwise another family
                    // started in between.
                    let Some(depth) = open.iter().rposition(|&id| id == parent) else {
                        return Err(MalformedNodeError::new(
                            MalformedKind::NotContiguous,
                            Some(node.id),
                        ));
                    };
                    open.truncate(depth + 1);
                }
            }
            open.push(node.id);
        }

        let next_id = nodes
            .iter()
            .map(|n| n.id.0)
            .max()
            .map_or(Some(1), |max| max.checked_add(1));
        let mut tree = Self {
            nodes,
            positions,
            next_id,
        };
        for index in 0..tree.nodes.len() {
            tree.normalize_flags(index);
        }
        Ok(tree)
    }

    /// Check every structural invariant.
    ///
    /// Mutations maintain these, so this is meant for tests and debug verification.
    pub fn check_invariants(&self) -> Result<(), MalformedNodeError> {
        let mut open: SmallVec<[NodeId; 16]> = SmallVec::new();
        for (index, node) in self.nodes.iter().enumerate() {
            if self.positions.get(&node.id) != Some(&index) {
                return Err(MalformedNodeError::new(
                    MalformedKind::DuplicateId,
                    Some(node.id),
                ));
            }
            match node.parent {
                None => {
                    if node.level != 0 {
                        return Err(MalformedNodeError::new(
                            MalformedKind::LevelMismatch,
                            Some(node.id),
                        ));
                    }
                    open.clear();
                }
                Some(parent) => {
                    let Some(depth) = open.iter().rposition(|&id| id == parent) else {
                        return Err(MalformedNodeError::new(
                            MalformedKind::NotContiguous,
                            Some(node.id),
                        ));
                    };
                    if node.level != depth + 1 {
                        return Err(MalformedNodeError::new(
                            MalformedKind::LevelMismatch,
                            Some(node.id),
                        ));
                    }
                    open.truncate(depth + 1);
                }
            }
            open.push(node.id);

            let has_children = self.child_follows(index);
            let flags = node.flags;
            let consistent = if has_children {
                flags.contains(NodeFlags::HAS_CHILDREN)
                    && flags.contains(NodeFlags::EXPANDED) != flags.contains(NodeFlags::COLLAPSED)
            } else {
                flags.is_empty()
            };
            if !consistent {
                return Err(MalformedNodeError::new(
                    MalformedKind::FlagMismatch,
                    Some(node.id),
                ));
            }
        }
        if self.positions.len() != self.nodes.len() {
            return Err(MalformedNodeError::new(MalformedKind::DuplicateId, None));
        }
        Ok(())
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in display order.
    pub fn nodes(&self) -> &[Node<T>] {
        &self.nodes
    }

    /// Iterate nodes in display order.
    pub fn iter(&self) -> core::slice::Iter<'_, Node<T>> {
        self.nodes.iter()
    }

    /// Look up a node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.positions.get(&id).map(|&i| &self.nodes[i])
    }

    /// The node at a display index.
    pub fn node_at(&self, index: usize) -> Option<&Node<T>> {
        self.nodes.get(index)
    }

    /// Display index of a node.
    pub fn index_of(&self, id: NodeId) -> Result<usize, TreeError> {
        self.positions
            .get(&id)
            .copied()
            .ok_or(TreeError::NotAMember(id))
    }

    /// Whether `id` belongs to this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Mutable access to a node's payload. Structure is not reachable through this.
    pub fn payload_mut(&mut self, id: NodeId) -> Option<&mut T> {
        let index = *self.positions.get(&id)?;
        Some(&mut self.nodes[index].payload)
    }

    /// Level of a node.
    pub fn level(&self, id: NodeId) -> Result<usize, TreeError> {
        self.get(id).map(Node::level).ok_or(TreeError::NotAMember(id))
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        self.get(id).map(Node::parent).ok_or(TreeError::NotAMember(id))
    }

    /// Root nodes in display order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|n| n.parent.is_none())
            .map(|n| n.id)
    }

    /// Whether the node at `index` is directly followed by one of its children.
    pub(crate) fn child_follows(&self, index: usize) -> bool {
        let id = self.nodes[index].id;
        self.nodes
            .get(index + 1)
            .is_some_and(|next| next.parent == Some(id))
    }

    /// Re-derive the flags of the node at `index` from the structure.
    ///
    /// Parents keep their expanded/collapsed state (defaulting to expanded); leaves end up
    /// with no flags.
    pub(crate) fn normalize_flags(&mut self, index: usize) {
        let has_children = self.child_follows(index);
        let flags = &mut self.nodes[index].flags;
        if !has_children {
            *flags = NodeFlags::empty();
        } else if flags.contains(NodeFlags::EXPANDED) || !flags.contains(NodeFlags::COLLAPSED) {
            *flags = NodeFlags::HAS_CHILDREN | NodeFlags::EXPANDED;
        } else {
            *flags = NodeFlags::HAS_CHILDREN | NodeFlags::COLLAPSED;
        }
    }

    /// Rebuild the id → position map from `start` onward.
    pub(crate) fn reindex_from(&mut self, start: usize) {
        for (index, node) in self.nodes.iter().enumerate().skip(start) {
            self.positions.insert(node.id, index);
        }
    }

    /// Hand out a fresh id, larger than every id the tree has held.
    pub(crate) fn allocate_id(&mut self) -> Result<NodeId, TreeError> {
        let id = self.next_id.ok_or(TreeError::IdsExhausted)?;
        self.next_id = id.checked_add(1);
        Ok(NodeId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(id: u32, parent: Option<u32>, level: usize) -> Node<()> {
        Node::new(NodeId(id), parent.map(NodeId), level, ())
    }

    #[test]
    fn builds_and_derives_flags() {
        let tree = Tree::from_nodes([n(1, None, 0), n(2, Some(1), 1), n(3, None, 0)]).unwrap();
        assert_eq!(tree.len(), 3);
        let root = tree.get(NodeId(1)).unwrap();
        assert!(root.has_children());
        assert!(root.is_expanded(), "parents default to expanded");
        assert_eq!(tree.get(NodeId(3)).unwrap().flags(), NodeFlags::empty());
        assert_eq!(tree.roots().collect::<Vec<_>>(), [NodeId(1), NodeId(3)]);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn stale_flags_are_dropped() {
        let leaf = n(1, None, 0).with_flags(NodeFlags::HAS_CHILDREN | NodeFlags::COLLAPSED);
        let tree = Tree::from_nodes([leaf]).unwrap();
        assert_eq!(tree.get(NodeId(1)).unwrap().flags(), NodeFlags::empty());
    }

    #[test]
    fn collapsed_state_is_kept() {
        let root = n(1, None, 0).with_flags(NodeFlags::COLLAPSED);
        let tree = Tree::from_nodes([root, n(2, Some(1), 1)]).unwrap();
        assert!(tree.get(NodeId(1)).unwrap().is_collapsed());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Tree::from_nodes([n(1, None, 0), n(1, None, 0)]).unwrap_err();
        assert_eq!(err.kind, MalformedKind::DuplicateId);
    }

    #[test]
    fn rejects_forward_parent() {
        let err = Tree::from_nodes([n(2, Some(1), 1), n(1, None, 0)]).unwrap_err();
        assert_eq!(err.kind, MalformedKind::UnknownParent);
        assert_eq!(err.node, Some(NodeId(2)));
    }

    #[test]
    fn rejects_level_mismatch() {
        let err = Tree::from_nodes([n(1, None, 0), n(2, Some(1), 2)]).unwrap_err();
        assert_eq!(err.kind, MalformedKind::LevelMismatch);
    }

    #[test]
    fn rejects_interrupted_family() {
        // 3 is a root that sits between 1 and its child 4.
        let err = Tree::from_nodes([n(1, None, 0), n(2, Some(1), 1), n(3, None, 0), n(4, Some(1), 1)])
            .unwrap_err();
        assert_eq!(err.kind, MalformedKind::NotContiguous);
        assert_eq!(err.node, Some(NodeId(4)));
    }

    #[test]
    fn next_id_exceeds_max() {
        let mut tree = Tree::from_nodes([n(4, None, 0), n(9, None, 0)]).unwrap();
        assert_eq!(tree.allocate_id(), Ok(NodeId(10)));
        assert_eq!(tree.allocate_id(), Ok(NodeId(11)));
    }

    #[test]
    fn max_id_exhausts_allocation() {
        let mut tree = Tree::from_nodes([n(u32::MAX - 1, None, 0)]).unwrap();
        assert_eq!(tree.allocate_id(), Ok(NodeId(u32::MAX)));
        assert_eq!(tree.allocate_id(), Err(TreeError::IdsExhausted));

        let mut tree = Tree::from_nodes([n(u32::MAX, None, 0)]).unwrap();
        assert_eq!(tree.allocate_id(), Err(TreeError::IdsExhausted));
    }

    #[test]
    fn lookups_report_missing_members() {
        let tree = Tree::from_nodes([n(1, None, 0)]).unwrap();
        assert_eq!(tree.index_of(NodeId(5)), Err(TreeError::NotAMember(NodeId(5))));
        assert_eq!(tree.level(NodeId(1)), Ok(0));
        assert_eq!(tree.parent(NodeId(1)), Ok(None));
        assert!(!tree.contains(NodeId(2)));
    }

    #[test]
    fn empty_tree_is_valid() {
        let tree: Tree<()> = Tree::new();
        assert!(tree.is_empty());
        tree.check_invariants().unwrap();
    }
}
