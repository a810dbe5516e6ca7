//! CLI command handlers, one per file.

mod capture;
mod completions;
mod discover;

pub use capture::{run_capture, CaptureArgs};
pub use completions::run_completions;
pub use discover::run_discover;
