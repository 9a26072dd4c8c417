pub mod table;

pub use table::{frame_to_string, render_frame};
