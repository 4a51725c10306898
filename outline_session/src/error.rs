// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session errors.

use core::fmt;

use outline_tree::{MalformedNodeError, NodeId, TreeError};

/// Lifecycle misuse of an [`Outliner`](crate::Outliner).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitError {
    /// Attaching to zero rows.
    Empty,
    /// Attaching an outliner that is already attached.
    AlreadyAttached,
    /// Operating on an outliner that is not attached.
    NotAnInstance,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("cannot attach an outliner to zero rows"),
            Self::AlreadyAttached => f.write_str("outliner is already attached"),
            Self::NotAnInstance => f.write_str("outliner is not attached"),
        }
    }
}

impl core::error::Error for InitError {}

/// Any failure of an [`Outliner`](crate::Outliner) operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutlineError {
    /// Lifecycle misuse.
    Init(InitError),
    /// The tree refused the operation; it is unchanged.
    Tree(TreeError),
    /// A measured row height was NaN or infinite.
    NonFiniteHeight(NodeId),
}

impl fmt::Display for OutlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(err) => fmt::Display::fmt(err, f),
            Self::Tree(err) => fmt::Display::fmt(err, f),
            Self::NonFiniteHeight(id) => write!(f, "row height of node {id} is not finite"),
        }
    }
}

impl core::error::Error for OutlineError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Init(err) => Some(err),
            Self::Tree(err) => Some(err),
            Self::NonFiniteHeight(_) => None,
        }
    }
}

impl From<InitError> for OutlineError {
    fn from(err: InitError) -> Self {
        Self::Init(err)
    }
}

impl From<TreeError> for OutlineError {
    fn from(err: TreeError) -> Self {
        Self::Tree(err)
    }
}

impl From<MalformedNodeError> for OutlineError {
    fn from(err: MalformedNodeError) -> Self {
        Self::Tree(TreeError::Malformed(err))
    }
}
