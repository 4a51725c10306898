// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural mutations: adding, removing, and moving families.

use alloc::vec::Vec;

use crate::error::TreeError;
use crate::tree::Tree;
use crate::types::{Node, NodeFlags, NodeId};

/// Where a moved family lands relative to a target node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DropAction {
    /// Become the last child of the target.
    Append(NodeId),
    /// Become the target's preceding sibling.
    InsertBefore(NodeId),
    /// Become the target's following sibling, after the target's whole family.
    InsertAfter(NodeId),
}

impl DropAction {
    /// The node the action is relative to.
    pub const fn target(self) -> NodeId {
        match self {
            Self::Append(id) | Self::InsertBefore(id) | Self::InsertAfter(id) => id,
        }
    }
}

impl<T> Tree<T> {
    /// Create a node with a freshly allocated id.
    ///
    /// With a parent, the node becomes the parent's first child and the parent is marked as
    /// having children and expanded. Without one, the node becomes a root placed first or
    /// last depending on `insert_at_front`.
    pub fn add_node(
        &mut self,
        parent: Option<NodeId>,
        payload: T,
        insert_at_front: bool,
    ) -> Result<NodeId, TreeError> {
        let (at, level) = match parent {
            Some(p) => {
                let index = self.index_of(p)?;
                (index + 1, self.nodes[index].level + 1)
            }
            None if insert_at_front => (0, 0),
            None => (self.nodes.len(), 0),
        };
        let id = self.allocate_id()?;
        self.nodes.insert(at, Node::new(id, parent, level, payload));
        self.reindex_from(at);
        if let Some(p) = parent {
            self.mark_expanded_parent(p);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(node = id.get(), parent = ?parent.map(NodeId::get), "outline node added");
        Ok(id)
    }

    /// Remove a node together with its family.
    ///
    /// Returns the removed nodes in display order. If the parent is left without children
    /// it loses its `HAS_CHILDREN` and expanded/collapsed flags.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Vec<Node<T>>, TreeError> {
        let range = self.family_range(id)?;
        let start = range.start;
        let parent = self.nodes[start].parent;
        let removed: Vec<Node<T>> = self.nodes.drain(range).collect();
        for node in &removed {
            self.positions.remove(&node.id);
        }
        self.reindex_from(start);
        if let Some(&parent_index) = parent.and_then(|p| self.positions.get(&p)) {
            self.normalize_flags(parent_index);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(node = id.get(), removed = removed.len(), "outline family removed");
        Ok(removed)
    }

    /// Move `node`'s family to become the last child of `target`.
    pub fn append_family(&mut self, node: NodeId, target: NodeId) -> Result<(), TreeError> {
        self.move_family(node, DropAction::Append(target))
    }

    /// Move `node`'s family to directly before `target`, as its sibling.
    pub fn insert_family_before(&mut self, node: NodeId, target: NodeId) -> Result<(), TreeError> {
        self.move_family(node, DropAction::InsertBefore(target))
    }

    /// Move `node`'s family to directly after `target`'s family, as its sibling.
    pub fn insert_family_after(&mut self, node: NodeId, target: NodeId) -> Result<(), TreeError> {
        self.move_family(node, DropAction::InsertAfter(target))
    }

    /// Move `node`'s family according to `action`.
    ///
    /// The family keeps its internal shape: every member is re-leveled by the same offset as
    /// the family root. The old parent loses `HAS_CHILDREN` if this was its last child, and
    /// the new parent gains it and is expanded.
    ///
    /// Fails with [`TreeError::InvalidDrop`] when the target is inside the moved family, in
    /// which case the tree is left untouched.
    pub fn move_family(&mut self, node: NodeId, action: DropAction) -> Result<(), TreeError> {
        let target = action.target();
        let range = self.family_range(node)?;
        if range.contains(&self.index_of(target)?) {
            return Err(TreeError::InvalidDrop { node, target });
        }

        let start = range.start;
        let old_parent = self.nodes[start].parent;
        let old_level = self.nodes[start].level;
        let mut family: Vec<Node<T>> = self.nodes.drain(range).collect();
        for member in &family {
            self.positions.remove(&member.id);
        }
        self.reindex_from(start);
        if let Some(&parent_index) = old_parent.and_then(|p| self.positions.get(&p)) {
            self.normalize_flags(parent_index);
        }

        let target_index = self.index_of(target)?;
        let target_node = &self.nodes[target_index];
        let (at, new_parent, new_level) = match action {
            DropAction::Append(_) => (
                self.family_range_at(target_index).end,
                Some(target),
                target_node.level + 1,
            ),
            DropAction::InsertBefore(_) => (target_index, target_node.parent, target_node.level),
            DropAction::InsertAfter(_) => (
                self.family_range_at(target_index).end,
                target_node.parent,
                target_node.level,
            ),
        };

        family[0].parent = new_parent;
        for member in &mut family {
            member.level = new_level + (member.level - old_level);
        }
        self.nodes.splice(at..at, family);
        self.reindex_from(at.min(start));
        if let Some(p) = new_parent {
            self.mark_expanded_parent(p);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(node = node.get(), ?action, "outline family moved");
        Ok(())
    }

    fn mark_expanded_parent(&mut self, parent: NodeId) {
        if let Some(&index) = self.positions.get(&parent) {
            self.nodes[index].flags = NodeFlags::HAS_CHILDREN | NodeFlags::EXPANDED;
        }
    }
}
