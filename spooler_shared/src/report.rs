//! End-of-run printer status.

use crate::{Job, PrinterId, SimTime};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemainingJob {
    pub job: Job,
    pub pages_remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrinterReport {
    pub printer: PrinterId,
    pub total_pages_left: u64,
    pub jobs_completed: u64,
    /// Pages of finished jobs plus progress on the job that was printing.
    pub pages_printed: u64,
    pub remaining: Vec<RemainingJob>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    pub ended_at: SimTime,
    pub jobs_created: u64,
    pub pages_created: u64,
    pub printers: Vec<PrinterReport>,
}

impl SimulationReport {
    pub fn total_pages_left(&self) -> u64 {
        self.printers.iter().map(|p| p.total_pages_left).sum()
    }

    pub fn total_pages_printed(&self) -> u64 {
        self.printers.iter().map(|p| p.pages_printed).sum()
    }
}

impl fmt::Display for PrinterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Printer {} - Total pages left: {}, ",
            self.printer, self.total_pages_left
        )?;
        if self.remaining.is_empty() {
            return write!(f, "No jobs remaining.");
        }
        for (i, entry) in self.remaining.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            // Only the head job can be part way through
            if i == 0 {
                write!(
                    f,
                    "Job {} ({} Pages, {} Remaining)",
                    entry.job.id(),
                    entry.job.pages(),
                    entry.pages_remaining
                )?;
            } else {
                write!(f, "{}", entry.job)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation ended at {}.", self.ended_at)?;
        writeln!(f, "Status of Printers:")?;
        for printer in &self.printers {
            writeln!(f, "{}", printer)?;
        }
        Ok(())
    }
}
