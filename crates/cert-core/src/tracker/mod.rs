pub mod core;
pub mod handle;

pub use core::{apply_target, StepTracker};
pub use handle::TrackerHandle;
