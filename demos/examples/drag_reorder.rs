// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-and-drop reordering of an outline table.
//!
//! This example drives an `Outliner` the way a host UI would:
//! - attach to rows decoded from `id`/`class` markers,
//! - feed timestamped pointer samples during a drag and read back the drop indicator,
//! - commit the drop and re-render rows from the updated tree.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p outline_demos --example drag_reorder`

use kurbo::Point;
use outline_session::{Config, DropOutcome, OutlineError, Outliner};
use outline_tree::NodeId;
use tracing_subscriber::EnvFilter;

fn print_rows(outliner: &Outliner<&str>) -> Result<(), OutlineError> {
    let tree = outliner.tree()?;
    for row in outliner.visible_rows()? {
        let indent = outliner.indentation_of(row.id)?;
        let title = tree.get(row.id).map_or("?", |node| *node.payload());
        let class = outliner.row_class(row.id)?;
        println!(
            "  {:width$}{title:<12} [{class}]",
            "",
            width = (indent / 4.0) as usize
        );
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut outliner = Outliner::new(Config {
        initially_hidden: false,
        ..Config::default()
    });
    outliner.attach_markup([
        ("row1", "level0 has-children", "Fruit"),
        ("row2", "child-of-row1 level1", "Apple"),
        ("row3", "child-of-row1 level1 has-children", "Citrus"),
        ("row4", "child-of-row3 level2", "Lemon"),
        ("row5", "level0 has-children", "Vegetables"),
        ("row6", "child-of-row5 level1", "Leek"),
    ])?;
    // 20px rows stacked from the origin.
    outliner.set_table_frame(Point::ZERO, 480.0)?;
    println!("Initial outline:");
    print_rows(&outliner)?;

    // Drag "Citrus" (with "Lemon") over "Leek", one column in.
    let citrus = NodeId(3);
    outliner.drag_start(citrus, Point::new(30.0, 50.0), 0)?;
    for (t, y) in [(40, 70.0), (80, 90.0), (120, 110.0)] {
        let placement = outliner.drag_move(Point::new(25.0, y), t)?;
        if let Some(indicator) = outliner.drop_indicator() {
            tracing::info!(
                ?placement,
                top = indicator.top,
                column = indicator.column_width,
                "indicator moved"
            );
        }
    }
    match outliner.drag_end()? {
        DropOutcome::Committed(action) => tracing::info!(?action, "dropped"),
        other => tracing::warn!(?other, "drop did not commit"),
    }
    println!("After moving Citrus under Vegetables:");
    print_rows(&outliner)?;

    // A drag released far away from every row does nothing.
    outliner.drag_start(NodeId(2), Point::new(30.0, 30.0), 200)?;
    outliner.drag_move(Point::new(30.0, 900.0), 240)?;
    assert_eq!(outliner.drag_end()?, DropOutcome::NoTarget);

    // Structure edits from the host.
    let kiwi = outliner.add_node(Some(NodeId(1)), "Kiwi")?;
    outliner.collapse_node(NodeId(5))?;
    println!("After adding {kiwi} and collapsing Vegetables:");
    print_rows(&outliner)?;
    println!("New row markup: {}", outliner.render_row(kiwi)?);

    for event in outliner.take_events() {
        tracing::info!(?event, "outline event");
    }
    outliner.destroy()?;
    Ok(())
}
