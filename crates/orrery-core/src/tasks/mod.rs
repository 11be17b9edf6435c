//! The three cooperative tasks
//!
//! Each task is a state machine advanced by one call per scheduler step. A
//! step does a bounded amount of work and reports how long the task wants
//! to sleep before its next step.

mod render;
mod sampler;
mod time_sync;

pub use render::RenderLoop;
pub use sampler::TemperatureSampler;
pub use time_sync::{SyncPhase, TimeSyncWatchdog};

use embassy_time::Duration;

/// What a task asks of the scheduler after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Yield {
    /// Run again after this long.
    For(Duration),
    /// Never run again.
    Finished,
}
