pub mod clean;
pub mod date;
pub mod frame;
pub mod merge;
pub mod reshape;

pub use clean::{clean, CleanStats};
pub use date::{month_key, parse_iso, parse_mdy, to_iso};
pub use frame::{CleanedFrame, LongFrame, MergedFrame};
pub use merge::merge;
pub use reshape::to_long;
