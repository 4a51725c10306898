// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outline Tree: an ordered, pre-order tree for outline tables.
//!
//! Outline Tree is the model behind a tree table: a hierarchy rendered as a flat run of rows
//! where every node is immediately followed by its descendants.
//!
//! - Stores nodes as a single ordered sequence in display order, with an id → position map
//!   for constant-time lookups.
//! - Treats a node plus its descendants (a *family*) as a contiguous index range, so moving
//!   or removing a subtree is a range operation.
//! - Keeps derived state (`level`, [`NodeFlags::HAS_CHILDREN`], expanded/collapsed) consistent
//!   after every structural change.
//!
//! ## Row markers
//!
//! Hosts that render rows as markup usually encode the tree in class names, for example
//! `child-of-row3 level2 has-children`. The [`codec`] module decodes those markers into typed
//! [`Node`] records (and encodes them back) using a configurable [`MarkerScheme`]. Once a
//! [`Tree`] is built, relationships live in typed fields and never need to be parsed again.
//!
//! ## API overview
//!
//! - [`Tree`]: ordered container; see [`Tree::from_nodes`] and [`Tree::check_invariants`].
//! - [`Node`]: one row: id, parent, level, [`NodeFlags`], and an opaque payload.
//! - [`NodeId`]: stable identifier of a node.
//! - [`DropAction`]: where a moved family lands relative to a target node.
//! - [`TreeError`] and [`MalformedNodeError`]: failures of tree operations and marker decoding.
//!
//! Key operations:
//! - [`Tree::family_of`] / [`Tree::family_range`]: a node and all of its descendants.
//! - [`Tree::add_node`] / [`Tree::remove_node`]: create and destroy nodes.
//! - [`Tree::append_family`], [`Tree::insert_family_before`], [`Tree::insert_family_after`]:
//!   move a family, rejecting drops into its own descendants.
//! - [`Tree::toggle`], [`Tree::expand`], [`Tree::collapse`], [`Tree::visible_indices`]:
//!   expand/collapse state and the resulting visible rows.
//!
//! ## Example
//!
//! ```rust
//! use outline_tree::{Node, NodeId, Tree};
//!
//! let mut tree = Tree::from_nodes([
//!     Node::new(NodeId(1), None, 0, "fruit"),
//!     Node::new(NodeId(2), Some(NodeId(1)), 1, "apple"),
//!     Node::new(NodeId(3), None, 0, "vegetables"),
//! ])
//! .unwrap();
//!
//! // Move "fruit" (and "apple" with it) under "vegetables".
//! tree.append_family(NodeId(1), NodeId(3)).unwrap();
//! assert_eq!(tree.level(NodeId(2)).unwrap(), 2);
//! assert!(tree.get(NodeId(3)).unwrap().has_children());
//!
//! // A family can never be dropped into itself.
//! assert!(tree.append_family(NodeId(3), NodeId(2)).is_err());
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` debug events when mutations are committed.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod codec;
mod error;
mod family;
mod mutate;
mod tree;
mod types;
mod visibility;

pub use codec::{MarkerScheme, RowMarkers};
pub use error::{MalformedKind, MalformedNodeError, TreeError};
pub use mutate::DropAction;
pub use tree::Tree;
pub use types::{Node, NodeFlags, NodeId};
