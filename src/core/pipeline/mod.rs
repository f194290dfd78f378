pub mod runner;
pub mod state;

pub use runner::{ExtractionConfig, ExtractionPipeline};
pub use state::{RunContext, RunSnapshot, RunState};
