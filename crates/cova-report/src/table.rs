//! DataFrame rendering for the terminal.
//!
//! Every analysis result is displayed through here; the aggregators have no
//! rendering awareness.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use polars::prelude::{AnyValue, DataFrame, DataType};

use cova_ingest::any_to_string;

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int32
            | DataType::Int64
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Render a frame as a terminal table, capping output at `limit` rows with a
/// trailing elision marker.
pub fn render_frame(df: &DataFrame, limit: Option<usize>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let columns = df.get_columns();
    table.set_header(
        columns
            .iter()
            .map(|column| header_cell(column.name().as_str()))
            .collect::<Vec<_>>(),
    );
    for (idx, column) in columns.iter().enumerate() {
        if is_numeric(column.dtype()) {
            if let Some(col) = table.column_mut(idx) {
                col.set_cell_alignment(CellAlignment::Right);
            }
        }
    }

    let shown = limit.unwrap_or(df.height()).min(df.height());
    for row in 0..shown {
        let mut cells = Vec::with_capacity(columns.len());
        for column in columns {
            let value = column.get(row).unwrap_or(AnyValue::Null);
            cells.push(Cell::new(any_to_string(value)));
        }
        table.add_row(cells);
    }
    if shown < df.height() {
        let mut marker = vec![Cell::new(format!("… {} more rows", df.height() - shown))];
        marker.resize_with(columns.len(), || Cell::new(""));
        table.add_row(marker);
    }
    table
}

/// Render a frame to a plain string (also the form fed to the insight
/// service).
pub fn frame_to_string(df: &DataFrame, limit: Option<usize>) -> String {
    render_frame(df, limit).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    fn sample() -> DataFrame {
        DataFrame::new(vec![
            Column::new("Country/Region".into(), vec!["Germany", "Canada", "Italy"]),
            Column::new("Deaths".into(), vec![13i64, 11, 7]),
            Column::new("Rate".into(), vec![0.5f64, 0.25, 0.1]),
        ])
        .unwrap()
    }

    #[test]
    fn renders_headers_and_values() {
        let rendered = frame_to_string(&sample(), None);
        assert!(rendered.contains("Country/Region"));
        assert!(rendered.contains("Germany"));
        assert!(rendered.contains("13"));
        assert!(rendered.contains("0.25"));
    }

    #[test]
    fn caps_rows_with_an_elision_marker() {
        let rendered = frame_to_string(&sample(), Some(2));
        assert!(rendered.contains("Germany"));
        assert!(rendered.contains("Canada"));
        assert!(!rendered.contains("Italy"));
        assert!(rendered.contains("… 1 more rows"));
    }

    #[test]
    fn full_frame_has_no_marker() {
        let rendered = frame_to_string(&sample(), Some(10));
        assert!(rendered.contains("Italy"));
        assert!(!rendered.contains("more rows"));
    }
}
