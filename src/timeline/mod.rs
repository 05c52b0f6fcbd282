mod load;
mod model;
mod sample;

pub use load::{TimelineError, check_current_phase, load_timeline};
pub use model::{IterationEvent, Phase, PhaseType, Timeline};
pub use sample::sample_timeline;
