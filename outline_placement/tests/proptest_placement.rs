// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based tests for `outline_placement`.
//!
//! For any tree shape, collapsed state, dragged node, and pointer position:
//!
//! 1. A resolved placement never targets the dragged family.
//! 2. Committing it lands the family at the placement's index and level.
//! 3. The drop indicator stays inside the table horizontally.

use kurbo::Point;
use outline_placement::{DropIndicator, PlacementParams, RowLayout, compute_placement};
use outline_tree::{NodeId, Tree};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

const ROW_HEIGHT: f64 = 20.0;
const TABLE_WIDTH: f64 = 400.0;

/// Grow a tree from a list of parent picks; `None` adds a root.
fn grow(parents: &[Option<usize>], collapse: &[usize]) -> Tree<()> {
    let mut tree = Tree::new();
    for parent in parents {
        let parent = parent
            .filter(|_| !tree.is_empty())
            .map(|slot| tree.nodes()[slot % tree.len()].id());
        tree.add_node(parent, (), false).unwrap();
    }
    for slot in collapse {
        let id = tree.nodes()[slot % tree.len()].id();
        tree.collapse(id).unwrap();
    }
    tree
}

fn shape() -> impl Strategy<Value = (Vec<Option<usize>>, Vec<usize>)> {
    (
        prop::collection::vec(prop::option::weighted(0.7, 0usize..32), 1..24),
        prop::collection::vec(0usize..32, 0..4),
    )
}

fn layout_for(tree: &Tree<()>) -> RowLayout {
    let mut layout = RowLayout::new();
    layout.rebuild(tree, &|_| ROW_HEIGHT);
    layout.set_frame(Point::new(10.0, 50.0), TABLE_WIDTH);
    layout
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn committed_placement_matches_prediction(
        (parents, collapse) in shape(),
        dragged in 0usize..32,
        x in 0.0f64..160.0,
        y in 30.0f64..600.0,
    ) {
        let mut tree = grow(&parents, &collapse);
        let mut layout = layout_for(&tree);
        let dragged: NodeId = tree.nodes()[dragged % tree.len()].id();
        let params = PlacementParams::default();

        let Some(placement) =
            compute_placement(&tree, &mut layout, Point::new(x, y), dragged, &params).unwrap()
        else {
            return Ok(());
        };

        let family = tree.family_range(dragged).unwrap();
        prop_assert!(!tree.is_in_family(dragged, placement.action.target()).unwrap());
        let expected_index = if placement.index > family.start {
            placement.index - family.len()
        } else {
            placement.index
        };

        tree.move_family(dragged, placement.action).unwrap();
        prop_assert_eq!(tree.check_invariants(), Ok(()));
        prop_assert_eq!(tree.level(dragged).unwrap(), placement.level);
        prop_assert_eq!(tree.index_of(dragged).unwrap(), expected_index);
    }

    #[test]
    fn indicator_stays_in_table(
        (parents, collapse) in shape(),
        dragged in 0usize..32,
        x in 0.0f64..160.0,
        y in 30.0f64..600.0,
    ) {
        let tree = grow(&parents, &collapse);
        let mut layout = layout_for(&tree);
        let dragged = tree.nodes()[dragged % tree.len()].id();
        let params = PlacementParams::default();

        if let Some(placement) =
            compute_placement(&tree, &mut layout, Point::new(x, y), dragged, &params).unwrap()
        {
            let indicator = DropIndicator::for_placement(&mut layout, &placement, &params, 2.0)
                .unwrap();
            prop_assert_eq!(indicator.left, 10.0);
            prop_assert!(indicator.column_width <= TABLE_WIDTH);
            prop_assert!(indicator.top >= 49.0);
            prop_assert!(indicator.top <= 50.0 + layout.total_height());
        }
    }
}
