pub mod csv_table;
pub mod info;
pub mod polars_utils;

pub use csv_table::{RawTable, read_raw_table};
pub use info::{ColumnInfo, DatasetInfo, InferredType, dataset_info};
pub use polars_utils::{
    any_to_f64, any_to_i64, any_to_string, format_numeric, parse_f64, parse_i64,
};
