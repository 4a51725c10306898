// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications queued for the host.

use alloc::vec::Vec;

use outline_tree::{DropAction, NodeId};

/// Something the host may want to react to, drained with
/// [`Outliner::take_events`](crate::Outliner::take_events).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutlineEvent {
    /// The outliner was attached to a set of rows.
    Init,
    /// The outliner was detached.
    Destroy,
    /// A node was created.
    NodeAdded {
        /// The new node.
        id: NodeId,
        /// Its parent, `None` for a root.
        parent: Option<NodeId>,
    },
    /// A node was removed together with its family.
    NodeRemoved {
        /// The node that was asked to be removed.
        id: NodeId,
        /// Every removed node in display order, `id` first.
        removed: Vec<NodeId>,
    },
    /// A dropped family became the last child of `target`.
    Appended {
        /// Root of the moved family.
        node: NodeId,
        /// The new parent.
        target: NodeId,
    },
    /// A dropped family was placed before `target`.
    InsertedBefore {
        /// Root of the moved family.
        node: NodeId,
        /// The new following sibling.
        target: NodeId,
    },
    /// A dropped family was placed after `target`'s family.
    InsertedAfter {
        /// Root of the moved family.
        node: NodeId,
        /// The new preceding sibling.
        target: NodeId,
    },
    /// A drop into the dragged family itself was refused; the tree is unchanged.
    DropRejected {
        /// Root of the dragged family.
        node: NodeId,
        /// The refused target.
        target: NodeId,
    },
}

impl OutlineEvent {
    /// The event announcing a committed drop.
    pub fn committed(node: NodeId, action: DropAction) -> Self {
        match action {
            DropAction::Append(target) => Self::Appended { node, target },
            DropAction::InsertBefore(target) => Self::InsertedBefore { node, target },
            DropAction::InsertAfter(target) => Self::InsertedAfter { node, target },
        }
    }
}
