// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolving a pointer position into a drop placement.

use kurbo::Point;
use outline_tree::{DropAction, NodeId, Tree, TreeError};

use crate::layout::RowLayout;
use crate::slots::{select_candidate, valid_drop_positions};

/// Geometry parameters for placement.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementParams {
    /// Horizontal distance between two levels.
    pub indent_unit: f64,
    /// Distance from the table's left edge to the level-0 column.
    pub base_indent: f64,
    /// How far outside every row the pointer may be and still hover the nearest one.
    pub tolerance: f64,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            indent_unit: 20.0,
            base_indent: 0.0,
            tolerance: 1.0,
        }
    }
}

/// Where a dragged family would land if released now.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Drop position in the tree's display order.
    pub index: usize,
    /// Level the family root would take.
    pub level: usize,
    /// The structural change that realizes the placement.
    pub action: DropAction,
}

/// Left margin of a row's expand/collapse icon at `level`.
pub fn indentation(level: usize, indent_unit: f64) -> f64 {
    indent_unit * level as f64
}

/// Slot of the row under `pointer`.
///
/// Falls back to the nearest row when the pointer is at most `tolerance` away from it.
pub fn hovered_row(layout: &mut RowLayout, pointer: Point, tolerance: f64) -> Option<usize> {
    if let Some(slot) = layout.hit(pointer) {
        return Some(slot);
    }
    layout
        .nearest(pointer)
        .filter(|&(_, distance)| distance <= tolerance)
        .map(|(slot, _)| slot)
}

/// Level the pointer's column asks for.
///
/// Columns are `indent_unit` wide and start `base_indent` right of `table_left`. The result
/// never exceeds one level deeper than the hovered row, and is 0 when nothing is hovered.
pub fn detect_level(
    x: f64,
    table_left: f64,
    params: &PlacementParams,
    hovered_level: Option<usize>,
) -> usize {
    let Some(hovered_level) = hovered_level else {
        return 0;
    };
    let relative = x - table_left - params.base_indent;
    if relative <= 0.0 || params.indent_unit <= 0.0 || relative.is_nan() {
        return 0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Columns are counted whole; `as` truncates toward zero and saturates."
    )]
    let column = (relative / params.indent_unit) as usize;
    column.min(hovered_level + 1)
}

/// Turn a drop position and level into a [`DropAction`] against the current tree.
///
/// - Position 0 inserts before the first row.
/// - When the row before the position sits one level up, the family becomes that row's first
///   child: appended to a childless row, or inserted before its existing first child.
/// - Otherwise the family follows the ancestor (or self) of that row at `level`.
///
/// Actions that would target `dragged` itself are rewritten to the equivalent action on its
/// next sibling (or parent). Returns `None` when the position has no meaningful action.
pub fn resolve_action<T>(
    tree: &Tree<T>,
    index: usize,
    level: usize,
    dragged: NodeId,
) -> Result<Option<DropAction>, TreeError> {
    if index == 0 {
        let Some(first) = tree.node_at(0) else {
            return Ok(None);
        };
        return avoid_self(tree, DropAction::InsertBefore(first.id()), dragged);
    }
    let Some(prev) = tree.node_at(index - 1) else {
        return Ok(None);
    };
    if level > 0 && prev.level() == level - 1 {
        return match tree.first_child(prev.id())? {
            None => Ok(Some(DropAction::Append(prev.id()))),
            Some(first) => avoid_self(tree, DropAction::InsertBefore(first), dragged),
        };
    }
    Ok(tree
        .ancestor_at_level(prev.id(), level)?
        .map(DropAction::InsertAfter))
}

fn avoid_self<T>(
    tree: &Tree<T>,
    action: DropAction,
    dragged: NodeId,
) -> Result<Option<DropAction>, TreeError> {
    if action != DropAction::InsertBefore(dragged) {
        return Ok(Some(action));
    }
    let parent = tree.parent(dragged)?;
    let end = tree.family_range(dragged)?.end;
    if let Some(next) = tree.node_at(end).filter(|n| n.parent() == parent) {
        return Ok(Some(DropAction::InsertBefore(next.id())));
    }
    Ok(parent.map(DropAction::Append))
}

/// Compute the placement for `dragged` with the pointer at `pointer`.
///
/// Returns `Ok(None)` when no row is hovered (or close enough) or when no valid drop
/// position remains at or after the hovered row.
pub fn compute_placement<T>(
    tree: &Tree<T>,
    layout: &mut RowLayout,
    pointer: Point,
    dragged: NodeId,
    params: &PlacementParams,
) -> Result<Option<Placement>, TreeError> {
    tree.index_of(dragged)?;
    let Some(slot) = hovered_row(layout, pointer, params.tolerance) else {
        return Ok(None);
    };
    let Some(&row) = layout.row(slot) else {
        return Ok(None);
    };
    let level = detect_level(pointer.x, layout.origin().x, params, Some(row.level));
    let positions = valid_drop_positions(tree, dragged, level)?;
    let Some(index) = select_candidate(&positions, row.index) else {
        return Ok(None);
    };
    let Some(action) = resolve_action(tree, index, level, dragged)? else {
        return Ok(None);
    };

    #[cfg(feature = "tracing")]
    tracing::trace!(
        dragged = dragged.get(),
        hovered = row.id.get(),
        index,
        level,
        ?action,
        "placement resolved"
    );
    Ok(Some(Placement {
        index,
        level,
        action,
    }))
}
