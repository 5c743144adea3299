// spooler-rs: discrete-event simulation of a least-loaded print job dispatcher

pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod job_generator;
pub mod printer;
pub mod simulator;
pub mod sink;

pub use clock::SimClock;
pub use dispatcher::{Dispatcher, select_printer};
pub use printer::{Printer, PrinterState};
pub use simulator::{Simulation, SimulationError, SimulationParams};
pub use spooler_shared::{
    EventSink, Job, JobError, JobFactory, JobId, PrinterId, PrinterReport, RemainingJob, SimEvent,
    SimTime, SimulationReport, SizeTier, TimeSource,
};
