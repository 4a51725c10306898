// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the outline tree: node identifiers, flags, and node records.

use core::fmt;

/// Identifier of a node within a [`Tree`](crate::Tree).
///
/// Ids are plain integers chosen by the host for existing rows and allocated by
/// [`Tree::add_node`](crate::Tree::add_node) for new ones. Allocation always
/// yields an id greater than any id the tree has held.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

bitflags::bitflags! {
    /// Derived per-node state.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        /// At least one node references this node as its parent.
        const HAS_CHILDREN = 0b0000_0001;
        /// Descendants are shown (only meaningful with `HAS_CHILDREN`).
        const EXPANDED     = 0b0000_0010;
        /// Descendants are hidden (only meaningful with `HAS_CHILDREN`).
        const COLLAPSED    = 0b0000_0100;
    }
}

/// One row of the outline.
///
/// `parent` and `level` are only changed through [`Tree`](crate::Tree) operations once a node
/// belongs to a tree. Before that, [`codec::set_parent`](crate::codec::set_parent) and
/// [`codec::set_level`](crate::codec::set_level) rewrite them on a detached record.
#[derive(Clone, Debug, PartialEq)]
pub struct Node<T> {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) level: usize,
    pub(crate) flags: NodeFlags,
    pub(crate) payload: T,
}

impl<T> Node<T> {
    /// Create a detached node record with empty flags.
    pub fn new(id: NodeId, parent: Option<NodeId>, level: usize, payload: T) -> Self {
        Self {
            id,
            parent,
            level,
            flags: NodeFlags::empty(),
            payload,
        }
    }

    /// Replace the flags of a detached record.
    ///
    /// [`Tree::from_nodes`](crate::Tree::from_nodes) re-derives `HAS_CHILDREN` and only keeps
    /// the expanded/collapsed bits of nodes that actually have children.
    #[must_use]
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// The node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The parent id, or `None` for a root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Zero-based depth.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Derived state flags.
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Whether any node references this one as parent.
    pub fn has_children(&self) -> bool {
        self.flags.contains(NodeFlags::HAS_CHILDREN)
    }

    /// Whether this node has children and shows them.
    pub fn is_expanded(&self) -> bool {
        self.has_children() && !self.flags.contains(NodeFlags::COLLAPSED)
    }

    /// Whether this node has children and hides them.
    pub fn is_collapsed(&self) -> bool {
        self.has_children() && self.flags.contains(NodeFlags::COLLAPSED)
    }

    /// Host payload.
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Mutable host payload.
    pub fn payload_mut(&mut self) -> &mut T {
        &mut self.payload
    }

    /// Consume the record and return its payload.
    pub fn into_payload(self) -> T {
        self.payload
    }
}
