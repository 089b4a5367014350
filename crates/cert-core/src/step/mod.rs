pub mod descriptor;
pub mod state;

pub use descriptor::{build_step_sequence, Step, StepSequence};
pub use state::{DialogStep, StepState};
