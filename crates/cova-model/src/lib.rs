pub mod config;
pub mod enums;
pub mod error;
pub mod schema;

pub use config::{AnalysisConfig, DateWindow, CALENDAR_2020, RECOVERY_WINDOW};
pub use enums::MetricKind;
pub use error::{PipelineError, Result};
pub use schema::{
    ALL_PROVINCES, COUNTRY_COL, DATE_COL, EXCLUDED_PROVINCES, KEY_COLUMNS, LAT_COL, LONG_COL,
    MONTH_COL, PROVINCE_COL, is_excluded_province,
};
