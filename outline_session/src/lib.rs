// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outline Session: the controller behind a drag-and-drop outline table.
//!
//! An [`Outliner`] owns an [`outline_tree::Tree`], the [`outline_placement::RowLayout`] of its
//! visible rows, and at most one [`DragSession`]. Hosts drive it with explicit calls and
//! read back what to draw:
//!
//! - Lifecycle: [`Outliner::attach`] / [`Outliner::attach_markup`], [`Outliner::destroy`],
//!   [`Outliner::update_settings`].
//! - Structure: [`Outliner::add_node`], [`Outliner::remove_node`],
//!   [`Outliner::toggle_node`], [`Outliner::expand_node`], [`Outliner::collapse_node`].
//! - Geometry: [`Outliner::set_table_frame`], [`Outliner::set_row_height`],
//!   [`Outliner::set_base_indent`].
//! - Dragging: [`Outliner::drag_start`], [`Outliner::drag_move`], [`Outliner::drag_end`],
//!   [`Outliner::drag_cancel`].
//! - Rendering: [`Outliner::drop_indicator`], [`Outliner::indentation_of`],
//!   [`Outliner::row_class`], [`Outliner::render_row`].
//!
//! Changes the host should react to are queued as [`OutlineEvent`]s and drained with
//! [`Outliner::take_events`]. There is no internal clock: every pointer sample carries a
//! host timestamp in milliseconds, which the [`Config::poll_interval_ms`] throttle uses.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use outline_session::{Config, DropOutcome, OutlineEvent, Outliner};
//! use outline_tree::{DropAction, NodeId};
//!
//! let mut outliner = Outliner::new(Config::default());
//! outliner
//!     .attach_markup([
//!         ("row1", "level0", "inbox"),
//!         ("row2", "level0", "archive"),
//!     ])
//!     .unwrap();
//! outliner.set_table_frame(Point::ZERO, 300.0).unwrap();
//!
//! // Drag "inbox" over "archive", one column in, and drop it there.
//! outliner.drag_start(NodeId(1), Point::new(5.0, 10.0), 0).unwrap();
//! outliner.drag_move(Point::new(25.0, 30.0), 40).unwrap();
//! let outcome = outliner.drag_end().unwrap();
//! assert_eq!(outcome, DropOutcome::Committed(DropAction::Append(NodeId(2))));
//! assert_eq!(outliner.row_class(NodeId(1)).unwrap(), "child-of-row2 level1");
//!
//! let events = outliner.take_events();
//! assert_eq!(
//!     events.last(),
//!     Some(&OutlineEvent::Appended { node: NodeId(1), target: NodeId(2) })
//! );
//! ```
//!
//! ## Features
//!
//! - `std` (default) / `libm`: forwarded to `kurbo` through `outline_placement`.
//! - `tracing`: emit `tracing` debug events for attach/destroy, drag sessions, and drops.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod drag;
mod error;
mod event;
mod outliner;
mod template;

pub use config::Config;
pub use drag::{DragSession, DropOutcome};
pub use error::{InitError, OutlineError};
pub use event::OutlineEvent;
pub use outliner::Outliner;
pub use template::RowTemplate;
