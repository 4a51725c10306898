// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for tree operations and row marker decoding.

use core::fmt;

use crate::types::NodeId;

/// What exactly is wrong with a malformed row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MalformedKind {
    /// No level marker was found.
    MissingLevel,
    /// A level marker was found but its value does not parse.
    BadLevel,
    /// A parent marker was found but the referenced id does not parse.
    BadParent,
    /// The row id does not parse.
    BadId,
    /// The referenced parent is not an earlier row.
    UnknownParent,
    /// Two rows share an id.
    DuplicateId,
    /// The level is not the parent's level plus one (or zero for a root).
    LevelMismatch,
    /// A row interrupts the contiguous run of another node's family.
    NotContiguous,
    /// Stored flags disagree with the structure (for example `HAS_CHILDREN` on a leaf).
    FlagMismatch,
}

impl MalformedKind {
    const fn describe(self) -> &'static str {
        match self {
            Self::MissingLevel => "missing level marker",
            Self::BadLevel => "unparseable level marker",
            Self::BadParent => "unparseable parent marker",
            Self::BadId => "unparseable row id",
            Self::UnknownParent => "parent is not an earlier row",
            Self::DuplicateId => "duplicate row id",
            Self::LevelMismatch => "level does not match parent level",
            Self::NotContiguous => "row breaks a family's contiguous run",
            Self::FlagMismatch => "flags disagree with structure",
        }
    }
}

/// A row's structural markers are unusable.
///
/// This signals upstream data corruption rather than user error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedNodeError {
    /// What is wrong.
    pub kind: MalformedKind,
    /// The affected node, when its id could be determined.
    pub node: Option<NodeId>,
}

impl MalformedNodeError {
    pub(crate) const fn new(kind: MalformedKind, node: Option<NodeId>) -> Self {
        Self { kind, node }
    }
}

impl fmt::Display for MalformedNodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node {
            Some(id) => write!(f, "malformed node {id}: {}", self.kind.describe()),
            None => write!(f, "malformed node: {}", self.kind.describe()),
        }
    }
}

impl core::error::Error for MalformedNodeError {}

/// Errors from [`Tree`](crate::Tree) operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// The id does not belong to this tree.
    NotAMember(NodeId),
    /// Moving `node`'s family onto `target` would make it its own descendant.
    InvalidDrop {
        /// Root of the family being moved.
        node: NodeId,
        /// The requested target, a member of `node`'s family.
        target: NodeId,
    },
    /// Row markers or structure are corrupt.
    Malformed(MalformedNodeError),
    /// Every id up to `u32::MAX` has been handed out.
    IdsExhausted,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAMember(id) => write!(f, "node {id} is not a member of this tree"),
            Self::InvalidDrop { node, target } => {
                write!(f, "cannot move node {node} into its own descendant {target}")
            }
            Self::Malformed(err) => fmt::Display::fmt(err, f),
            Self::IdsExhausted => f.write_str("no node ids left to allocate"),
        }
    }
}

impl core::error::Error for TreeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MalformedNodeError> for TreeError {
    fn from(err: MalformedNodeError) -> Self {
        Self::Malformed(err)
    }
}
