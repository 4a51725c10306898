// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expanded/collapsed state and the rows it leaves visible.

use alloc::vec::Vec;

use crate::error::TreeError;
use crate::tree::Tree;
use crate::types::{NodeFlags, NodeId};

impl<T> Tree<T> {
    /// Set every parent to collapsed (`initially_hidden`) or expanded.
    pub fn apply_initial_state(&mut self, initially_hidden: bool) {
        let state = if initially_hidden {
            NodeFlags::COLLAPSED
        } else {
            NodeFlags::EXPANDED
        };
        for node in &mut self.nodes {
            if node.has_children() {
                node.flags = NodeFlags::HAS_CHILDREN | state;
            }
        }
    }

    /// Flip a parent between expanded and collapsed.
    ///
    /// Returns whether anything changed; leaves have nothing to toggle.
    pub fn toggle(&mut self, id: NodeId) -> Result<bool, TreeError> {
        let index = self.index_of(id)?;
        let node = &mut self.nodes[index];
        if !node.has_children() {
            return Ok(false);
        }
        node.flags.toggle(NodeFlags::EXPANDED | NodeFlags::COLLAPSED);
        Ok(true)
    }

    /// Expand a parent. Returns whether the state changed.
    pub fn expand(&mut self, id: NodeId) -> Result<bool, TreeError> {
        self.set_collapsed(id, false)
    }

    /// Collapse a parent. Returns whether the state changed.
    pub fn collapse(&mut self, id: NodeId) -> Result<bool, TreeError> {
        self.set_collapsed(id, true)
    }

    fn set_collapsed(&mut self, id: NodeId, collapsed: bool) -> Result<bool, TreeError> {
        let index = self.index_of(id)?;
        let node = &mut self.nodes[index];
        if !node.has_children() || node.is_collapsed() == collapsed {
            return Ok(false);
        }
        node.flags.toggle(NodeFlags::EXPANDED | NodeFlags::COLLAPSED);
        Ok(true)
    }

    /// Whether no ancestor of `id` is collapsed.
    pub fn is_visible(&self, id: NodeId) -> Result<bool, TreeError> {
        let mut current = self.parent(id)?;
        while let Some(parent) = current {
            let Some(node) = self.get(parent) else {
                break;
            };
            if node.is_collapsed() {
                return Ok(false);
            }
            current = node.parent;
        }
        Ok(true)
    }

    /// Display indices of visible rows, in order.
    pub fn visible_indices(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.nodes.len());
        // Rows deeper than this level are inside a collapsed family.
        let mut hidden_below: Option<usize> = None;
        for (index, node) in self.nodes.iter().enumerate() {
            if let Some(level) = hidden_below {
                if node.level > level {
                    continue;
                }
                hidden_below = None;
            }
            out.push(index);
            if node.is_collapsed() {
                hidden_below = Some(node.level);
            }
        }
        out
    }

    /// Ids of visible rows, in order.
    pub fn visible_ids(&self) -> Vec<NodeId> {
        self.visible_indices()
            .into_iter()
            .map(|i| self.nodes[i].id)
            .collect()
    }
}
