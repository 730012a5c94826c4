//! Scripted mock AI pipeline.
//!
//! Deterministic generator functions stand in for the real providers;
//! the runner executes the stage sequence strictly one at a time with a
//! simulated per-stage delay and cooperative cancellation.

pub mod generators;
pub mod runner;
pub mod stages;

pub use generators::{CopyMode, PipelineInput, ProductInput};
pub use runner::{run_pipeline, PipelineOutcome, RunOutcome, RunnerConfig};
pub use stages::{AiStage, StageReport};
