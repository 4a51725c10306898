// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row markup template.

use alloc::{
    format,
    string::{String, ToString},
};

/// Markup for the cells of a newly created row, with class-name placeholders.
///
/// Placeholders are matched exactly: `%dataCellClass%`, `%addClass%`, `%removeClass%`,
/// `%expColIconClass%` and `%dataClass%`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowTemplate {
    /// Cell markup.
    pub html: String,
    /// Replaces `%dataCellClass%`. Default `nested-data-cell`.
    pub data_cell_class: String,
    /// Replaces `%addClass%`. Default `add-node`.
    pub add_class: String,
    /// Replaces `%removeClass%`. Default `remove-node`.
    pub remove_class: String,
    /// Replaces `%expColIconClass%`. Default `expand-collapse-icon`.
    pub exp_col_icon_class: String,
    /// Replaces `%dataClass%`. Default `nested-data`.
    pub data_class: String,
}

impl Default for RowTemplate {
    fn default() -> Self {
        Self {
            html: concat!(
                r#"<td class="%dataCellClass%">"#,
                r#"<span class="add-edit-icons">"#,
                r##"<a href="#" title="Add node" class="%addClass%"></a>"##,
                r##"<a href="#" title="Remove node" class="%removeClass%"></a>"##,
                r#"</span>"#,
                r#"<span class="%expColIconClass%"></span>"#,
                r#"<span class="%dataClass%"></span>"#,
                r#"</td>"#,
            )
            .to_string(),
            data_cell_class: "nested-data-cell".to_string(),
            add_class: "add-node".to_string(),
            remove_class: "remove-node".to_string(),
            exp_col_icon_class: "expand-collapse-icon".to_string(),
            data_class: "nested-data".to_string(),
        }
    }
}

impl RowTemplate {
    /// The cell markup with every placeholder substituted.
    pub fn render(&self) -> String {
        self.html
            .replace("%dataCellClass%", &self.data_cell_class)
            .replace("%addClass%", &self.add_class)
            .replace("%removeClass%", &self.remove_class)
            .replace("%expColIconClass%", &self.exp_col_icon_class)
            .replace("%dataClass%", &self.data_class)
    }

    /// A complete `<tr>` with the given id and class attributes.
    pub fn render_row(&self, id_attr: &str, class: &str) -> String {
        format!(r#"<tr id="{id_attr}" class="{class}">{}</tr>"#, self.render())
    }
}
