//! Period arithmetic: comparison windows and trend buckets.

mod bucket;
mod window;

pub use bucket::{Granularity, PeriodBucket};
pub use window::comparison_window;
