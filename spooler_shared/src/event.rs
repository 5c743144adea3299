//! Structured event records emitted by the dispatcher engine.

use crate::{Job, PrinterId, SimTime, SimulationReport};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    JobCreated { at: SimTime, job: Job },
    JobQueued { at: SimTime, printer: PrinterId, job: Job },
    JobStarted { at: SimTime, printer: PrinterId, job: Job },
    JobFinished { at: SimTime, printer: PrinterId, job: Job },
}

impl SimEvent {
    pub fn at(&self) -> SimTime {
        match self {
            SimEvent::JobCreated { at, .. }
            | SimEvent::JobQueued { at, .. }
            | SimEvent::JobStarted { at, .. }
            | SimEvent::JobFinished { at, .. } => *at,
        }
    }

    pub fn job(&self) -> &Job {
        match self {
            SimEvent::JobCreated { job, .. }
            | SimEvent::JobQueued { job, .. }
            | SimEvent::JobStarted { job, .. }
            | SimEvent::JobFinished { job, .. } => job,
        }
    }

    pub fn printer(&self) -> Option<PrinterId> {
        match self {
            SimEvent::JobCreated { .. } => None,
            SimEvent::JobQueued { printer, .. }
            | SimEvent::JobStarted { printer, .. }
            | SimEvent::JobFinished { printer, .. } => Some(*printer),
        }
    }
}

/// Write-only consumer of engine events.
///
/// The engine calls `finish` exactly once, after the last event of a run.
pub trait EventSink {
    fn emit(&mut self, event: &SimEvent);

    fn finish(&mut self, _report: &SimulationReport) {}
}
