// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session state.

use kurbo::Point;
use outline_placement::{DropIndicator, Placement, Throttle};
use outline_tree::{DropAction, NodeId};

/// One drag gesture, from pointer down on a row to drop or cancel.
///
/// The session records where the drag started, the latest pointer sample, and the placement
/// and indicator computed for the last admitted sample.
#[derive(Clone, Debug)]
pub struct DragSession {
    node: NodeId,
    origin: Point,
    pointer: Point,
    started_at: u64,
    placement: Option<Placement>,
    indicator: Option<DropIndicator>,
    throttle: Throttle,
}

impl DragSession {
    pub(crate) fn new(node: NodeId, pointer: Point, now_ms: u64, interval_ms: u64) -> Self {
        Self {
            node,
            origin: pointer,
            pointer,
            started_at: now_ms,
            placement: None,
            indicator: None,
            throttle: Throttle::new(interval_ms),
        }
    }

    /// Root of the dragged family.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Pointer position when the drag started.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Latest pointer sample, admitted or not.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Time the drag started.
    pub fn started_at(&self) -> u64 {
        self.started_at
    }

    /// Placement for the last admitted sample.
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Indicator for the last admitted sample.
    pub fn indicator(&self) -> Option<DropIndicator> {
        self.indicator
    }

    /// Record a pointer sample; returns whether it should be processed.
    pub(crate) fn sample(&mut self, pointer: Point, now_ms: u64) -> bool {
        self.pointer = pointer;
        self.throttle.admit(pointer, now_ms)
    }

    pub(crate) fn set_target(
        &mut self,
        placement: Option<Placement>,
        indicator: Option<DropIndicator>,
    ) {
        self.placement = placement;
        self.indicator = indicator;
    }

    /// Forget the target after the rows changed under the drag.
    pub(crate) fn invalidate(&mut self, interval_ms: u64) {
        self.placement = None;
        self.indicator = None;
        self.throttle.reset();
        self.throttle.interval_ms = interval_ms;
    }
}

/// What happened when a drag ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// The family moved.
    Committed(DropAction),
    /// The target was inside the dragged family; nothing moved.
    Rejected {
        /// Root of the dragged family.
        node: NodeId,
        /// The refused target.
        target: NodeId,
    },
    /// There was no drag or no placement when the drag ended.
    NoTarget,
}
