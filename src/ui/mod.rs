//! Terminal output

mod progress;

pub use progress::{format_summary, ProgressReporter};
