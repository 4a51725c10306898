// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outliner configuration.

use outline_placement::PlacementParams;
use outline_tree::MarkerScheme;

use crate::template::RowTemplate;

/// Settings for an [`Outliner`](crate::Outliner).
///
/// All geometry is in the host's logical pixels; times are in milliseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Horizontal distance between two levels. Default 20.
    pub indent_unit: f64,
    /// How far outside every row the pointer may be and still hover the nearest one.
    /// Default 1.
    pub tolerance: f64,
    /// Minimum time between two processed pointer samples during a drag. Default 30.
    pub poll_interval_ms: u64,
    /// Collapse every parent when attaching. Default `true`.
    pub initially_hidden: bool,
    /// Place new roots first instead of last. Default `false`.
    pub insert_at_front: bool,
    /// Distance from the table's left edge to the level-0 expand/collapse column. Default 0.
    pub base_indent: f64,
    /// Height assumed for rows the host has not measured. Default 20.
    pub default_row_height: f64,
    /// Thickness of the drop indicator. Default 2.
    pub indicator_height: f64,
    /// Class-name conventions for rows.
    pub markers: MarkerScheme,
    /// Markup for rows created by [`Outliner::render_row`](crate::Outliner::render_row).
    pub template: RowTemplate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_unit: 20.0,
            tolerance: 1.0,
            poll_interval_ms: 30,
            initially_hidden: true,
            insert_at_front: false,
            base_indent: 0.0,
            default_row_height: 20.0,
            indicator_height: 2.0,
            markers: MarkerScheme::default(),
            template: RowTemplate::default(),
        }
    }
}

impl Config {
    /// The subset used by placement.
    pub fn placement_params(&self) -> PlacementParams {
        PlacementParams {
            indent_unit: self.indent_unit,
            base_indent: self.base_indent,
            tolerance: self.tolerance,
        }
    }
}
