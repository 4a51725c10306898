// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outline Placement: where a dragged family lands in an outline table.
//!
//! While a row is dragged, the host keeps feeding pointer positions. This crate turns each
//! position into a [`Placement`]: a drop position in the tree's display order, the level
//! the family would take, and the [`DropAction`](outline_tree::DropAction) that realizes it.
//!
//! The pipeline for one pointer sample:
//!
//! 1. [`hovered_row`]: the visible row under the pointer, or the nearest one within
//!    `tolerance`.
//! 2. [`detect_level`]: the pointer's indentation column, at most one level deeper than the
//!    hovered row.
//! 3. [`drop_positions_for_level`] minus [`invalid_drop_positions`]: every slot a family
//!    could use at that level, without those inside the dragged family.
//! 4. [`select_candidate`]: the first remaining slot at or after the hovered row.
//! 5. [`resolve_action`]: append, insert-before, or insert-after against the tree.
//!
//! [`compute_placement`] runs the whole pipeline. [`Throttle`] decides which samples are
//! worth running it for, and [`DropIndicator`] says where to draw the drop line.
//!
//! Geometry comes from a [`RowLayout`]: the visible rows with their heights, stacked from a
//! table origin. Hosts rebuild it after structural changes and feed measured heights back
//! with [`RowLayout::set_height`].
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use outline_placement::{PlacementParams, RowLayout, compute_placement};
//! use outline_tree::{DropAction, Node, NodeId, Tree};
//!
//! let tree = Tree::from_nodes([
//!     Node::new(NodeId(1), None, 0, ()),
//!     Node::new(NodeId(2), None, 0, ()),
//! ])
//! .unwrap();
//!
//! let mut layout = RowLayout::new();
//! layout.rebuild(&tree, &|_| 20.0);
//! layout.set_frame(Point::ZERO, 300.0);
//!
//! // Drag row 1 over row 2, one column in: it becomes row 2's child.
//! let placement = compute_placement(
//!     &tree,
//!     &mut layout,
//!     Point::new(25.0, 30.0),
//!     NodeId(1),
//!     &PlacementParams::default(),
//! )
//! .unwrap()
//! .unwrap();
//! assert_eq!(placement.action, DropAction::Append(NodeId(2)));
//! ```
//!
//! ## Features
//!
//! - `std` (default) / `libm`: forwarded to `kurbo`; enable exactly one.
//! - `tracing`: emit `tracing` trace events for resolved placements.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod indicator;
mod layout;
mod placement;
mod slots;
mod throttle;

pub use indicator::DropIndicator;
pub use layout::{LayoutRow, RowLayout};
pub use placement::{
    Placement, PlacementParams, compute_placement, detect_level, hovered_row, indentation,
    resolve_action,
};
pub use slots::{
    drop_positions_for_level, invalid_drop_positions, select_candidate, valid_drop_positions,
};
pub use throttle::Throttle;
