// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row layout table: visible rows with lazily accumulated heights.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use outline_tree::{Node, NodeId, Tree};

/// One visible row in a [`RowLayout`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutRow {
    /// Display index of the row in the tree (hidden rows included).
    pub index: usize,
    /// The row's node.
    pub id: NodeId,
    /// The row's level.
    pub level: usize,
}

/// Geometry of the visible rows of an outline table.
///
/// Rows are stacked top to bottom starting at `origin`, all spanning the table width. A
/// *slot* is a position in the visible sequence; each slot maps back to a tree index through
/// [`LayoutRow::index`].
///
/// Heights are kept per slot and their prefix sums are recomputed lazily from the first
/// changed slot, so a host measuring rows one at a time pays only for what it queries.
#[derive(Clone, Debug)]
pub struct RowLayout {
    rows: Vec<LayoutRow>,
    heights: Vec<f64>,
    tops: Vec<f64>,
    dirty_from: Option<usize>,
    origin: Point,
    width: f64,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl RowLayout {
    /// Create an empty layout at the origin with zero width.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            heights: Vec::new(),
            tops: Vec::new(),
            dirty_from: None,
            origin: Point::ZERO,
            width: 0.0,
        }
    }

    /// Rebuild the table from the tree's visible rows.
    ///
    /// `height_of` is asked for every visible row. Negative and non-finite heights count as
    /// zero.
    pub fn rebuild<T>(&mut self, tree: &Tree<T>, height_of: &dyn Fn(&Node<T>) -> f64) {
        self.rows.clear();
        self.heights.clear();
        for index in tree.visible_indices() {
            let node = &tree.nodes()[index];
            self.rows.push(LayoutRow {
                index,
                id: node.id(),
                level: node.level(),
            });
            self.heights.push(extent(height_of(node)));
        }
        self.tops.resize(self.rows.len(), 0.0);
        self.dirty_from = Some(0);
    }

    /// Place the table: top-left corner and width.
    pub fn set_frame(&mut self, origin: Point, width: f64) {
        self.origin = origin;
        self.width = width.max(0.0);
    }

    /// Top-left corner of the table.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Table width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Update the height of one slot.
    pub fn set_height(&mut self, slot: usize, height: f64) {
        let Some(entry) = self.heights.get_mut(slot) else {
            return;
        };
        *entry = extent(height);
        self.dirty_from = Some(self.dirty_from.map_or(slot, |d| d.min(slot)));
    }

    /// Number of visible rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows are visible.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Visible rows in order.
    pub fn rows(&self) -> &[LayoutRow] {
        &self.rows
    }

    /// The row in `slot`.
    pub fn row(&self, slot: usize) -> Option<&LayoutRow> {
        self.rows.get(slot)
    }

    /// Slot of the visible row with tree index `index`.
    pub fn slot_of_index(&self, index: usize) -> Option<usize> {
        self.rows.binary_search_by_key(&index, |row| row.index).ok()
    }

    /// Slot of the visible row for `id`.
    pub fn slot_of(&self, id: NodeId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    /// Last visible slot whose tree index is at most `index`.
    pub fn last_slot_through(&self, index: usize) -> Option<usize> {
        self.rows
            .partition_point(|row| row.index <= index)
            .checked_sub(1)
    }

    fn ensure_tops_through(&mut self, through: usize) {
        let len = self.heights.len();
        if len == 0 || through >= len {
            return;
        }
        let dirty_from = match self.dirty_from {
            Some(d) if d <= through => d,
            _ => return,
        };
        let mut pos = if dirty_from == 0 {
            0.0
        } else {
            self.tops[dirty_from - 1] + self.heights[dirty_from - 1]
        };
        for i in dirty_from..len {
            self.tops[i] = pos;
            pos += self.heights[i];
        }
        self.dirty_from = None;
    }

    /// Rectangle of `slot` in table coordinates.
    pub fn row_rect(&mut self, slot: usize) -> Option<Rect> {
        let height = *self.heights.get(slot)?;
        self.ensure_tops_through(slot);
        let y0 = self.origin.y + self.tops[slot];
        Some(Rect::new(
            self.origin.x,
            y0,
            self.origin.x + self.width,
            y0 + height,
        ))
    }

    /// Sum of all visible row heights.
    pub fn total_height(&mut self) -> f64 {
        let Some(last) = self.heights.len().checked_sub(1) else {
            return 0.0;
        };
        self.ensure_tops_through(last);
        self.tops[last] + self.heights[last]
    }

    /// Slot at vertical position `y`, clamped to the first/last row.
    ///
    /// Returns `None` only when there are no rows.
    pub fn slot_at_y(&mut self, y: f64) -> Option<usize> {
        let last = self.heights.len().checked_sub(1)?;
        self.ensure_tops_through(last);
        let target = (y - self.origin.y).max(0.0);
        // Last row whose top is at or above the target.
        Some(
            self.tops
                .partition_point(|&top| top <= target)
                .saturating_sub(1),
        )
    }

    /// Slot whose rectangle contains `point`.
    pub fn hit(&mut self, point: Point) -> Option<usize> {
        let slot = self.slot_at_y(point.y)?;
        self.row_rect(slot)?.contains(point).then_some(slot)
    }

    /// The slot nearest to `point` and the distance from `point` to its rectangle.
    ///
    /// The distance is zero when the point is inside the row.
    pub fn nearest(&mut self, point: Point) -> Option<(usize, f64)> {
        let slot = self.slot_at_y(point.y)?;
        let rect = self.row_rect(slot)?;
        let dx = (rect.x0 - point.x).max(point.x - rect.x1).max(0.0);
        let dy = (rect.y0 - point.y).max(point.y - rect.y1).max(0.0);
        Some((slot, Vec2::new(dx, dy).hypot()))
    }
}

fn extent(height: f64) -> f64 {
    if height.is_finite() {
        height.max(0.0)
    } else {
        0.0
    }
}
