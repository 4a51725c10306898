// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based tests for `outline_session`.
//!
//! Random drag gestures over random outlines:
//!
//! 1. The tree stays structurally valid after every gesture.
//! 2. Drops computed from fresh samples are never rejected.
//! 3. Every committed drop queues exactly one matching event.
//! 4. Toggling a node twice restores the visible rows.

use kurbo::Point;
use outline_session::{Config, DropOutcome, OutlineEvent, Outliner};
use outline_tree::{Node, NodeId};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct Gesture {
    node: usize,
    moves: Vec<(f64, f64)>,
    cancel: bool,
}

fn gesture() -> impl Strategy<Value = Gesture> {
    (
        0usize..32,
        prop::collection::vec((0.0f64..120.0, -5.0f64..500.0), 1..6),
        prop::bool::weighted(0.1),
    )
        .prop_map(|(node, moves, cancel)| Gesture {
            node,
            moves,
            cancel,
        })
}

fn outliner(parents: &[Option<usize>]) -> Outliner<()> {
    let mut outliner = Outliner::new(Config {
        initially_hidden: false,
        ..Config::default()
    });
    outliner.attach([Node::new(NodeId(1), None, 0, ())]).unwrap();
    outliner.set_table_frame(Point::ZERO, 300.0).unwrap();
    for parent in parents {
        let parent = parent.map(|slot| {
            let tree = outliner.tree().unwrap();
            tree.nodes()[slot % tree.len()].id()
        });
        outliner.add_node(parent, ()).unwrap();
    }
    outliner.take_events();
    outliner
}

fn pick(outliner: &Outliner<()>, slot: usize) -> NodeId {
    let tree = outliner.tree().unwrap();
    tree.nodes()[slot % tree.len()].id()
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn gestures_keep_tree_valid(
        parents in prop::collection::vec(prop::option::weighted(0.7, 0usize..32), 0..16),
        gestures in prop::collection::vec(gesture(), 1..8),
    ) {
        let mut outliner = outliner(&parents);
        let mut now = 0;
        for gesture in gestures {
            let node = pick(&outliner, gesture.node);
            outliner.drag_start(node, Point::new(1.0, 1.0), now).unwrap();
            for (x, y) in gesture.moves {
                now += 40;
                outliner.drag_move(Point::new(x, y), now).unwrap();
            }
            let placement = outliner.placement();

            if gesture.cancel {
                prop_assert!(outliner.drag_cancel().unwrap());
                prop_assert!(outliner.take_events().is_empty());
                continue;
            }

            let outcome = outliner.drag_end().unwrap();
            let events = outliner.take_events();
            match (placement, outcome) {
                (Some(placement), DropOutcome::Committed(action)) => {
                    prop_assert_eq!(placement.action, action);
                    prop_assert_eq!(events, vec![OutlineEvent::committed(node, action)]);
                    prop_assert_eq!(
                        outliner.tree().unwrap().level(node).unwrap(),
                        placement.level
                    );
                }
                (None, DropOutcome::NoTarget) => prop_assert!(events.is_empty()),
                (placement, outcome) => {
                    prop_assert!(false, "placement {placement:?} ended as {outcome:?}");
                }
            }
            prop_assert!(outliner.drag_session().is_none());
            prop_assert_eq!(outliner.tree().unwrap().check_invariants(), Ok(()));
        }
    }

    #[test]
    fn toggle_twice_restores_visible_rows(
        parents in prop::collection::vec(prop::option::weighted(0.8, 0usize..32), 1..16),
        slot in 0usize..32,
    ) {
        let mut outliner = outliner(&parents);
        let before = outliner.visible_rows().unwrap().to_vec();
        let node = pick(&outliner, slot);
        let changed = outliner.toggle_node(node).unwrap();
        prop_assert_eq!(outliner.toggle_node(node).unwrap(), changed);
        prop_assert_eq!(outliner.visible_rows().unwrap(), before.as_slice());
    }
}
