// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for `outline_tree`.
//!
//! For any sequence of adds, removes, moves, and toggles:
//!
//! 1. Structural invariants hold (levels, contiguous families, derived flags).
//! 2. Rejected moves leave the tree untouched.
//! 3. A committed move keeps the moved family's shape.

use outline_tree::{DropAction, Node, NodeId, Tree, TreeError};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
enum Op {
    Add { parent: Option<usize>, front: bool },
    Remove(usize),
    Move { node: usize, target: usize, kind: u8 },
    Toggle(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (prop::option::of(0usize..64), any::<bool>())
            .prop_map(|(parent, front)| Op::Add { parent, front }),
        1 => (0usize..64).prop_map(Op::Remove),
        4 => (0usize..64, 0usize..64, 0u8..3)
            .prop_map(|(node, target, kind)| Op::Move { node, target, kind }),
        1 => (0usize..64).prop_map(Op::Toggle),
    ]
}

fn pick(tree: &Tree<u32>, slot: usize) -> Option<NodeId> {
    (!tree.is_empty()).then(|| tree.nodes()[slot % tree.len()].id())
}

fn action(kind: u8, target: NodeId) -> DropAction {
    match kind {
        0 => DropAction::Append(target),
        1 => DropAction::InsertBefore(target),
        _ => DropAction::InsertAfter(target),
    }
}

/// Family shape as (relative level, id) pairs.
fn shape(tree: &Tree<u32>, root: NodeId) -> Vec<(usize, NodeId)> {
    let family = tree.family_of(root).unwrap();
    let base = family[0].level();
    family.iter().map(|n| (n.level() - base, n.id())).collect()
}

fn seed() -> Tree<u32> {
    Tree::from_nodes([
        Node::new(NodeId(1), None, 0, 1),
        Node::new(NodeId(2), Some(NodeId(1)), 1, 2),
        Node::new(NodeId(3), None, 0, 3),
    ])
    .unwrap()
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn invariants_hold_after_any_sequence(ops in prop::collection::vec(op(), 1..60)) {
        let mut tree = seed();
        let mut payload = 100;
        for op in ops {
            match op {
                Op::Add { parent, front } => {
                    let parent = parent.and_then(|slot| pick(&tree, slot));
                    payload += 1;
                    tree.add_node(parent, payload, front).unwrap();
                }
                Op::Remove(slot) => {
                    if let Some(id) = pick(&tree, slot) {
                        tree.remove_node(id).unwrap();
                    }
                }
                Op::Move { node, target, kind } => {
                    let (Some(node), Some(target)) = (pick(&tree, node), pick(&tree, target)) else {
                        continue;
                    };
                    let before = tree.clone();
                    let family = shape(&tree, node);
                    match tree.move_family(node, action(kind, target)) {
                        Ok(()) => prop_assert_eq!(shape(&tree, node), family),
                        Err(TreeError::InvalidDrop { .. }) => {
                            prop_assert!(before.is_in_family(node, target).unwrap());
                            prop_assert_eq!(tree.nodes(), before.nodes());
                        }
                        Err(other) => prop_assert!(false, "unexpected error {other}"),
                    }
                }
                Op::Toggle(slot) => {
                    if let Some(id) = pick(&tree, slot) {
                        tree.toggle(id).unwrap();
                    }
                }
            }
            prop_assert_eq!(tree.check_invariants(), Ok(()));
        }
    }

    #[test]
    fn visible_rows_follow_collapsed_ancestors(ops in prop::collection::vec(op(), 1..40)) {
        let mut tree = seed();
        for op in ops {
            match op {
                Op::Add { parent, front } => {
                    let parent = parent.and_then(|slot| pick(&tree, slot));
                    tree.add_node(parent, 0, front).unwrap();
                }
                Op::Toggle(slot) => {
                    if let Some(id) = pick(&tree, slot) {
                        tree.toggle(id).unwrap();
                    }
                }
                _ => {}
            }
        }
        let visible = tree.visible_ids();
        for node in tree.iter() {
            prop_assert_eq!(
                visible.contains(&node.id()),
                tree.is_visible(node.id()).unwrap()
            );
        }
    }
}
