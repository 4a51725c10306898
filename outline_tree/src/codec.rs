// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row marker codec: class-name markers ↔ typed node fields.
//!
//! Hosts that render an outline as table rows typically encode the tree in the row's `id`
//! and `class` attributes:
//!
//! ```text
//! <tr id="row7" class="child-of-row3 level2 has-children collapsed">
//! ```
//!
//! A [`MarkerScheme`] names those conventions. It decodes a row into [`RowMarkers`] (and then
//! a [`Node`]), and rewrites or produces class strings after the tree changes so the host can
//! update its markup. Tokens the scheme does not own (styling classes and so on) are left
//! untouched by the rewriting helpers.
//!
//! The typed counterparts [`set_parent`] and [`set_level`] rewrite a detached [`Node`]
//! record. Like their string versions they only touch the one field: levels of descendants
//! and the `HAS_CHILDREN` flag of ancestors are the caller's business.

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use crate::error::{MalformedKind, MalformedNodeError};
use crate::types::{Node, NodeFlags, NodeId};

/// Class-name conventions used to encode the tree on host rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerScheme {
    /// Prefix of row ids; the remainder is the numeric [`NodeId`]. Default `row`.
    pub id_prefix: String,
    /// Prefix of the parent marker, followed by the parent's row id. Default `child-of-`.
    pub child_of_prefix: String,
    /// Prefix of the level marker, followed by the level. Default `level`.
    pub level_prefix: String,
    /// Class present on rows that have children. Default `has-children`.
    pub has_children_class: String,
    /// Class present on expanded parents. Default `expanded`.
    pub expanded_class: String,
    /// Class present on collapsed parents. Default `collapsed`.
    pub collapsed_class: String,
}

impl Default for MarkerScheme {
    fn default() -> Self {
        Self {
            id_prefix: "row".to_string(),
            child_of_prefix: "child-of-".to_string(),
            level_prefix: "level".to_string(),
            has_children_class: "has-children".to_string(),
            expanded_class: "expanded".to_string(),
            collapsed_class: "collapsed".to_string(),
        }
    }
}

/// Structural markers decoded from one host row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowMarkers {
    /// The row's id.
    pub id: NodeId,
    /// The referenced parent, `None` for a root.
    pub parent: Option<NodeId>,
    /// The encoded level.
    pub level: usize,
    /// Encoded `has-children`/`expanded`/`collapsed` classes.
    pub flags: NodeFlags,
}

impl RowMarkers {
    /// Combine the markers with a payload into a detached [`Node`].
    pub fn into_node<T>(self, payload: T) -> Node<T> {
        Node::new(self.id, self.parent, self.level, payload).with_flags(self.flags)
    }
}

impl MarkerScheme {
    /// Parse a row id attribute such as `row12`.
    pub fn parse_id(&self, id_attr: &str) -> Result<NodeId, MalformedNodeError> {
        id_attr
            .trim()
            .strip_prefix(self.id_prefix.as_str())
            .and_then(|digits| digits.parse::<u32>().ok())
            .map(NodeId)
            .ok_or(MalformedNodeError::new(MalformedKind::BadId, None))
    }

    /// Format a row id attribute for `id`.
    pub fn format_id(&self, id: NodeId) -> String {
        format!("{}{}", self.id_prefix, id.0)
    }

    /// Read the level marker from a class string.
    pub fn level_of(&self, class: &str) -> Result<usize, MalformedNodeError> {
        let mut seen_marker = false;
        for token in class.split_ascii_whitespace() {
            if let Some(rest) = token.strip_prefix(self.level_prefix.as_str()) {
                if let Ok(level) = rest.parse::<usize>() {
                    return Ok(level);
                }
                seen_marker = true;
            }
        }
        let kind = if seen_marker {
            MalformedKind::BadLevel
        } else {
            MalformedKind::MissingLevel
        };
        Err(MalformedNodeError::new(kind, None))
    }

    /// Read the parent marker from a class string.
    ///
    /// Returns `Ok(None)` when there is no parent marker (a root) and an error when a marker
    /// is present but does not name a parseable row id.
    pub fn parent_of(&self, class: &str) -> Result<Option<NodeId>, MalformedNodeError> {
        let Some(reference) = class
            .split_ascii_whitespace()
            .find_map(|token| token.strip_prefix(self.child_of_prefix.as_str()))
        else {
            return Ok(None);
        };
        self.parse_id(reference)
            .map(Some)
            .map_err(|_| MalformedNodeError::new(MalformedKind::BadParent, None))
    }

    /// Whether `class` contains the token `name`.
    pub fn has_class(class: &str, name: &str) -> bool {
        class.split_ascii_whitespace().any(|token| token == name)
    }

    /// Rewrite the parent marker, keeping every other token.
    pub fn set_parent(&self, class: &str, parent: Option<NodeId>) -> String {
        let marker = parent.map(|p| format!("{}{}", self.child_of_prefix, self.format_id(p)));
        rewrite(
            class,
            |token| token.starts_with(self.child_of_prefix.as_str()),
            marker.as_deref(),
        )
    }

    /// Rewrite the level marker, keeping every other token.
    pub fn set_level(&self, class: &str, level: usize) -> String {
        let marker = format!("{}{}", self.level_prefix, level);
        rewrite(
            class,
            |token| {
                token
                    .strip_prefix(self.level_prefix.as_str())
                    .is_some_and(|rest| rest.parse::<usize>().is_ok())
            },
            Some(&marker),
        )
    }

    /// Add or remove a plain class token.
    pub fn set_class(class: &str, name: &str, present: bool) -> String {
        rewrite(class, |token| token == name, present.then_some(name))
    }

    /// Decode a row from its id attribute and class string.
    pub fn decode(&self, id_attr: &str, class: &str) -> Result<RowMarkers, MalformedNodeError> {
        let id = self.parse_id(id_attr)?;
        let with_id = |mut err: MalformedNodeError| {
            err.node = Some(id);
            err
        };
        let parent = self.parent_of(class).map_err(with_id)?;
        let level = self.level_of(class).map_err(with_id)?;

        let mut flags = NodeFlags::empty();
        for token in class.split_ascii_whitespace() {
            if token == self.has_children_class {
                flags |= NodeFlags::HAS_CHILDREN;
            } else if token == self.expanded_class {
                flags |= NodeFlags::EXPANDED;
            } else if token == self.collapsed_class {
                flags |= NodeFlags::COLLAPSED;
            }
        }

        Ok(RowMarkers {
            id,
            parent,
            level,
            flags,
        })
    }

    /// Produce the canonical marker classes for a node.
    pub fn encode<T>(&self, node: &Node<T>) -> String {
        let mut tokens: Vec<String> = Vec::with_capacity(4);
        if let Some(parent) = node.parent {
            tokens.push(format!("{}{}", self.child_of_prefix, self.format_id(parent)));
        }
        tokens.push(format!("{}{}", self.level_prefix, node.level));
        if node.has_children() {
            tokens.push(self.has_children_class.clone());
            if node.is_collapsed() {
                tokens.push(self.collapsed_class.clone());
            } else {
                tokens.push(self.expanded_class.clone());
            }
        }
        tokens.join(" ")
    }

    /// Bring an existing host class string in line with `node`, keeping foreign tokens.
    pub fn reconcile<T>(&self, class: &str, node: &Node<T>) -> String {
        let class = self.set_parent(class, node.parent);
        let class = self.set_level(&class, node.level);
        let class = Self::set_class(&class, &self.has_children_class, node.has_children());
        let class = Self::set_class(&class, &self.expanded_class, node.is_expanded());
        Self::set_class(&class, &self.collapsed_class, node.is_collapsed())
    }
}

/// Read a detached node's level.
pub fn level_of<T>(node: &Node<T>) -> usize {
    node.level
}

/// Read a detached node's parent.
pub fn parent_of<T>(node: &Node<T>) -> Option<NodeId> {
    node.parent
}

/// Rewrite a detached node's parent reference only.
pub fn set_parent<T>(node: &mut Node<T>, parent: Option<NodeId>) {
    node.parent = parent;
}

/// Rewrite a detached node's level only.
pub fn set_level<T>(node: &mut Node<T>, level: usize) {
    node.level = level;
}

/// Replace every token matching `is_marker` with `replacement`, placed where the first match
/// was (or appended when nothing matched).
fn rewrite(class: &str, is_marker: impl Fn(&str) -> bool, replacement: Option<&str>) -> String {
    let mut tokens: Vec<&str> = Vec::new();
    let mut slot = None;
    for token in class.split_ascii_whitespace() {
        if is_marker(token) {
            slot.get_or_insert(tokens.len());
        } else {
            tokens.push(token);
        }
    }
    if let Some(replacement) = replacement {
        let at = slot.unwrap_or(tokens.len());
        tokens.insert(at, replacement);
    }
    tokens.join(" ")
}
