//! Cleaning-summary table printed by `cova clean`.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use cova_transform::CleanedFrame;

use crate::pipeline::PipelineOutput;

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn metric_row(frame: &CleanedFrame) -> Vec<Cell> {
    let stats = frame.stats;
    vec![
        Cell::new(frame.kind.to_string()),
        Cell::new(stats.raw_rows),
        Cell::new(stats.provinces_filled),
        Cell::new(stats.excluded_rows),
        Cell::new(stats.missing_geo_rows),
        Cell::new(stats.cells_filled),
        Cell::new(stats.rows),
    ]
}

pub fn print_cleaning_summary(output: &PipelineOutput) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        header_cell("Metric"),
        header_cell("Raw Rows"),
        header_cell("Provinces Filled"),
        header_cell("Excluded"),
        header_cell("Missing Geo"),
        header_cell("Cells Filled"),
        header_cell("Rows"),
    ]);
    for idx in 1..7 {
        if let Some(column) = table.column_mut(idx) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table.add_row(metric_row(&output.confirmed));
    table.add_row(metric_row(&output.deaths));
    table.add_row(metric_row(&output.recovered));
    println!("{table}");
}
