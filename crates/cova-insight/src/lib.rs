pub mod client;
pub mod prompt;

pub use client::{InsightClient, InsightError};
pub use prompt::format_prompt;
