// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Family resolution: a node together with all of its descendants.

use core::ops::Range;

use smallvec::SmallVec;

use crate::error::TreeError;
use crate::tree::Tree;
use crate::types::{Node, NodeId};

impl<T> Tree<T> {
    /// Index range covered by `id`'s family, starting at `id` itself.
    pub fn family_range(&self, id: NodeId) -> Result<Range<usize>, TreeError> {
        let index = self.index_of(id)?;
        Ok(self.family_range_at(index))
    }

    /// Family range of the node at display index `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn family_range_at(&self, index: usize) -> Range<usize> {
        if !self.child_follows(index) {
            return index..index + 1;
        }
        let root_level = self.nodes[index].level;
        let end = self.nodes[index + 1..]
            .iter()
            .position(|n| n.level <= root_level)
            .map_or(self.nodes.len(), |offset| index + 1 + offset);
        index..end
    }

    /// The node and all of its descendants, in display order.
    pub fn family_of(&self, id: NodeId) -> Result<&[Node<T>], TreeError> {
        let range = self.family_range(id)?;
        Ok(&self.nodes[range])
    }

    /// Whether `candidate` is `root` or one of its descendants.
    pub fn is_in_family(&self, root: NodeId, candidate: NodeId) -> Result<bool, TreeError> {
        let range = self.family_range(root)?;
        let index = self.index_of(candidate)?;
        Ok(range.contains(&index))
    }

    /// Direct children of `id`, in display order.
    pub fn children_of(&self, id: NodeId) -> Result<impl Iterator<Item = NodeId> + '_, TreeError> {
        let range = self.family_range(id)?;
        Ok(self.nodes[range.start + 1..range.end]
            .iter()
            .filter(move |n| n.parent == Some(id))
            .map(|n| n.id))
    }

    /// First child of `id`, if any.
    pub fn first_child(&self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        let index = self.index_of(id)?;
        Ok(self
            .child_follows(index)
            .then(|| self.nodes[index + 1].id))
    }

    /// Last node of `id`'s family (`id` itself for a leaf).
    pub fn last_descendant(&self, id: NodeId) -> Result<NodeId, TreeError> {
        let range = self.family_range(id)?;
        Ok(self.nodes[range.end - 1].id)
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors_of(&self, id: NodeId) -> Result<SmallVec<[NodeId; 8]>, TreeError> {
        let mut out = SmallVec::new();
        let mut current = self.parent(id)?;
        while let Some(parent) = current {
            out.push(parent);
            current = self.get(parent).and_then(Node::parent);
        }
        Ok(out)
    }

    /// `id` itself or its ancestor at `level`, if `level` is not deeper than `id`.
    pub fn ancestor_at_level(&self, id: NodeId, level: usize) -> Result<Option<NodeId>, TreeError> {
        let mut current = self.get(id).ok_or(TreeError::NotAMember(id))?;
        if level > current.level {
            return Ok(None);
        }
        while current.level > level {
            let Some(parent) = current.parent.and_then(|p| self.get(p)) else {
                return Ok(None);
            };
            current = parent;
        }
        Ok(Some(current.id))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::{Node, NodeId, Tree, TreeError};

    // A(1) ─ B(2) ─ C(3)
    //      └ D(4)
    // E(5)
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

    fn ids(nodes: &[Node<()>]) -> Vec<u32> {
        nodes.iter().map(|n| n.id().get()).collect()
    }

    #[test]
    fn family_of_root_and_inner() {
        let tree = sample();
        assert_eq!(ids(tree.family_of(NodeId(1)).unwrap()), [1, 2, 3, 4]);
        assert_eq!(ids(tree.family_of(NodeId(2)).unwrap()), [2, 3]);
        assert_eq!(ids(tree.family_of(NodeId(5)).unwrap()), [5]);
    }

    #[test]
    fn family_of_leaf_with_deeper_rows_elsewhere() {
        let tree = sample();
        assert_eq!(tree.family_range(NodeId(4)).unwrap(), 3..4);
        assert_eq!(tree.family_range(NodeId(3)).unwrap(), 2..3);
    }

    #[test]
    fn family_of_unknown_node() {
        let tree = sample();
        assert_eq!(
            tree.family_of(NodeId(42)).unwrap_err(),
            TreeError::NotAMember(NodeId(42))
        );
    }

    #[test]
    fn membership_and_children() {
        let tree = sample();
        assert!(tree.is_in_family(NodeId(1), NodeId(3)).unwrap());
        assert!(!tree.is_in_family(NodeId(2), NodeId(4)).unwrap());
        let children: Vec<_> = tree.children_of(NodeId(1)).unwrap().collect();
        assert_eq!(children, [NodeId(2), NodeId(4)]);
        assert_eq!(tree.first_child(NodeId(1)).unwrap(), Some(NodeId(2)));
        assert_eq!(tree.first_child(NodeId(4)).unwrap(), None);
        assert_eq!(tree.last_descendant(NodeId(1)).unwrap(), NodeId(4));
    }

    #[test]
    fn ancestor_chain() {
        let tree = sample();
        assert_eq!(
            tree.ancestors_of(NodeId(3)).unwrap().as_slice(),
            [NodeId(2), NodeId(1)]
        );
        assert_eq!(tree.ancestor_at_level(NodeId(3), 0).unwrap(), Some(NodeId(1)));
        assert_eq!(tree.ancestor_at_level(NodeId(3), 2).unwrap(), Some(NodeId(3)));
        assert_eq!(tree.ancestor_at_level(NodeId(2), 2).unwrap(), None);
    }
}
