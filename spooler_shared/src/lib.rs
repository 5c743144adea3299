// spooler_shared: shared types and traits for the dispatcher engine, sinks and tools

pub mod event;
pub mod print_job;
pub mod report;
pub mod time;

pub use event::{EventSink, SimEvent};
pub use print_job::{Job, JobError, JobFactory, JobId, SizeTier};
pub use report::{PrinterReport, RemainingJob, SimulationReport};
pub use time::SimTime;

pub type PrinterId = usize;

// --- Shared Traits ---

/// Source of real (host) time for the simulation loop.
///
/// The engine never calls `std::time` directly so tests can swap in a virtual
/// clock and run a half hour of simulated time without waiting for it.
pub trait TimeSource {
    fn now_monotonic(&mut self) -> std::time::Instant;
    fn sleep(&mut self, duration: std::time::Duration);
}
