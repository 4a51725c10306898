// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop indicator geometry.

use kurbo::{Point, Rect};

use crate::layout::RowLayout;
use crate::placement::{Placement, PlacementParams};

/// Where to draw the line showing a pending drop.
///
/// The indicator has two parts laid out left to right: a *column* part covering the
/// indentation of the target level, and a *row* part spanning the rest of the table.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DropIndicator {
    /// Top edge, centered on the boundary between the rows around the drop position.
    pub top: f64,
    /// Left edge (the table's left edge).
    pub left: f64,
    /// Full width (the table width).
    pub width: f64,
    /// Width of the column part.
    pub column_width: f64,
    /// Indicator thickness.
    pub height: f64,
    /// Target level.
    pub level: usize,
}

impl DropIndicator {
    /// Place the indicator for `placement`.
    ///
    /// The boundary is the bottom of the last visible row at or before the drop position, or
    /// the top of the first row for position 0. Returns `None` for an empty layout.
    pub fn for_placement(
        layout: &mut RowLayout,
        placement: &Placement,
        params: &PlacementParams,
        height: f64,
    ) -> Option<Self> {
        let edge = match placement.index.checked_sub(1) {
            None => layout.row_rect(0)?.y0,
            Some(before) => match layout.last_slot_through(before) {
                Some(slot) => layout.row_rect(slot)?.y1,
                None => layout.row_rect(0)?.y0,
            },
        };
        let width = layout.width();
        Some(Self {
            top: edge - height / 2.0,
            left: layout.origin().x,
            width,
            column_width: (params.base_indent + params.indent_unit * placement.level as f64)
                .min(width),
            height,
            level: placement.level,
        })
    }

    /// Width of the row part.
    pub fn row_width(&self) -> f64 {
        (self.width - self.column_width).max(0.0)
    }

    /// Rectangle of the column part.
    pub fn column_rect(&self) -> Rect {
        Rect::from_origin_size(
            Point::new(self.left, self.top),
            (self.column_width, self.height),
        )
    }

    /// Rectangle of the row part.
    pub fn row_rect(&self) -> Rect {
        Rect::from_origin_size(
            Point::new(self.left + self.column_width, self.top),
            (self.row_width(), self.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outline_tree::{DropAction, Node, NodeId, Tree};

    fn layout(collapsed: bool) -> RowLayout {
        let mut tree = Tree::from_nodes([
            Node::new(NodeId(1), None, 0, ()),
            Node::new(NodeId(2), Some(NodeId(1)), 1, ()),
            Node::new(NodeId(3), None, 0, ()),
        ])
        .unwrap();
        if collapsed {
            tree.collapse(NodeId(1)).unwrap();
        }
        let mut layout = RowLayout::new();
        layout.rebuild(&tree, &|_| 20.0);
        layout.set_frame(Point::new(10.0, 100.0), 200.0);
        layout
    }

    fn placement(index: usize, level: usize) -> Placement {
        Placement {
            index,
            level,
            action: DropAction::InsertBefore(NodeId(1)),
        }
    }

    #[test]
    fn sits_on_row_boundary() {
        let mut layout = layout(false);
        let params = PlacementParams::default();
        let indicator =
            DropIndicator::for_placement(&mut layout, &placement(2, 1), &params, 2.0).unwrap();
        assert_eq!(indicator.top, 139.0);
        assert_eq!(indicator.left, 10.0);
        assert_eq!(indicator.column_width, 20.0);
        assert_eq!(indicator.row_width(), 180.0);
        assert_eq!(indicator.row_rect(), Rect::new(30.0, 139.0, 210.0, 141.0));
    }

    #[test]
    fn first_position_uses_top_edge() {
        let mut layout = layout(false);
        let params = PlacementParams {
            base_indent: 16.0,
            ..PlacementParams::default()
        };
        let indicator =
            DropIndicator::for_placement(&mut layout, &placement(0, 0), &params, 2.0).unwrap();
        assert_eq!(indicator.top, 99.0);
        assert_eq!(indicator.column_width, 16.0);
        assert_eq!(indicator.column_rect(), Rect::new(10.0, 99.0, 26.0, 101.0));
    }

    #[test]
    fn hidden_rows_collapse_onto_visible_parent() {
        let mut layout = layout(true);
        let params = PlacementParams::default();
        // Position 2 follows the hidden row 1; the boundary is the bottom of row 0.
        let indicator =
            DropIndicator::for_placement(&mut layout, &placement(2, 0), &params, 2.0).unwrap();
        assert_eq!(indicator.top, 119.0);
    }

    #[test]
    fn empty_layout_has_no_indicator() {
        let mut layout = RowLayout::new();
        assert_eq!(
            DropIndicator::for_placement(
                &mut layout,
                &placement(0, 0),
                &PlacementParams::default(),
                2.0
            ),
            None
        );
    }
}
