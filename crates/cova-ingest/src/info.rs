//! Dataset structure summaries for the exploration step.
//!
//! Mirrors the row/column/dtype report a dataframe library prints: per-column
//! inferred type and non-null count, rendered through `Display`.

use std::fmt;

use crate::csv_table::RawTable;

/// Type inferred for a column from its non-empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferredType {
    /// Every non-empty cell parses as an integer.
    Int,
    /// Every non-empty cell parses as a number, at least one with a fraction.
    Float,
    /// Anything else.
    Text,
}

impl InferredType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InferredType::Int => "int64",
            InferredType::Float => "float64",
            InferredType::Text => "object",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ColumnInfo {
    pub name: String,
    pub non_null: usize,
    pub dtype: InferredType,
}

/// Row/column/dtype metadata for one raw table. Display-only; never used for
/// control flow.
#[derive(Debug, Clone)]
pub struct DatasetInfo {
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
}

fn infer_column(table: &RawTable, col_idx: usize) -> ColumnInfo {
    let mut non_null = 0usize;
    let mut all_int = true;
    let mut all_numeric = true;
    for row in &table.rows {
        let value = row.get(col_idx).map(String::as_str).unwrap_or("");
        if value.is_empty() {
            continue;
        }
        non_null += 1;
        if value.parse::<i64>().is_err() {
            all_int = false;
            if value.parse::<f64>().is_err() {
                all_numeric = false;
            }
        }
    }
    let dtype = if non_null == 0 || !all_numeric {
        InferredType::Text
    } else if all_int {
        InferredType::Int
    } else {
        InferredType::Float
    };
    ColumnInfo {
        name: table.headers[col_idx].clone(),
        non_null,
        dtype,
    }
}

/// Summarize a raw table's structure.
pub fn dataset_info(table: &RawTable) -> DatasetInfo {
    let columns = (0..table.headers.len())
        .map(|idx| infer_column(table, idx))
        .collect();
    DatasetInfo {
        rows: table.rows.len(),
        columns,
    }
}

impl fmt::Display for DatasetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} entries, {} columns",
            self.rows,
            self.columns.len()
        )?;
        writeln!(f, " #    Column           Non-Null  Dtype")?;
        writeln!(f, "---   ------           --------  -----")?;
        for (idx, column) in self.columns.iter().enumerate() {
            writeln!(
                f,
                "{idx:<5} {:<16} {:<9} {}",
                column.name,
                column.non_null,
                column.dtype.as_str()
            )?;
        }
        let ints = self
            .columns
            .iter()
            .filter(|c| c.dtype == InferredType::Int)
            .count();
        let floats = self
            .columns
            .iter()
            .filter(|c| c.dtype == InferredType::Float)
            .count();
        let texts = self
            .columns
            .iter()
            .filter(|c| c.dtype == InferredType::Text)
            .count();
        write!(f, "dtypes: float64({floats}), int64({ints}), object({texts})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RawTable {
        RawTable {
            headers: vec!["name".into(), "lat".into(), "count".into()],
            rows: vec![
                vec!["a".into(), "1.5".into(), "10".into()],
                vec!["b".into(), "2.0".into(), "".into()],
            ],
        }
    }

    #[test]
    fn infers_dtypes_per_column() {
        let info = dataset_info(&table());
        assert_eq!(info.rows, 2);
        assert_eq!(info.columns[0].dtype, InferredType::Text);
        assert_eq!(info.columns[1].dtype, InferredType::Float);
        assert_eq!(info.columns[2].dtype, InferredType::Int);
    }

    #[test]
    fn counts_non_null_cells() {
        let info = dataset_info(&table());
        assert_eq!(info.columns[2].non_null, 1);
        assert_eq!(info.columns[0].non_null, 2);
    }

    #[test]
    fn empty_column_is_text() {
        let table = RawTable {
            headers: vec!["empty".into()],
            rows: vec![vec!["".into()], vec!["".into()]],
        };
        let info = dataset_info(&table);
        assert_eq!(info.columns[0].dtype, InferredType::Text);
        assert_eq!(info.columns[0].non_null, 0);
    }

    #[test]
    fn display_reports_dtype_totals() {
        let rendered = dataset_info(&table()).to_string();
        assert!(rendered.contains("2 entries, 3 columns"));
        assert!(rendered.contains("dtypes: float64(1), int64(1), object(1)"));
    }
}
