// src/printer.rs - Printer queue and per-tick progress state machine
use std::collections::VecDeque;

use spooler_shared::{EventSink, Job, PrinterId, PrinterReport, RemainingJob, SimEvent, SimTime};

/// Sheets per minute of the reference printer.
pub const DEFAULT_SHEETS_PER_MINUTE: u32 = 7;

/// Whole milliseconds a printer spends on one sheet at `sheets_per_minute`.
pub fn millis_per_sheet(sheets_per_minute: u32) -> u64 {
    debug_assert!(sheets_per_minute > 0, "sheet rate must be positive");
    60_000 / u64::from(sheets_per_minute.max(1))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrinterState {
    /// Queue empty
    Idle,
    /// Head job queued but not yet started
    Starting,
    Printing,
}

#[derive(Debug)]
pub struct Printer {
    id: PrinterId,
    millis_per_sheet: u64,
    queue: VecDeque<Job>,
    /// Progress on the head job
    pages_printed: u32,
    /// Sum of pages of every queued job, head progress not subtracted
    queued_pages: u64,
    printing: bool,
    job_start: SimTime,
    jobs_completed: u64,
    pages_completed: u64,
}

impl Printer {
    pub fn new(id: PrinterId, sheets_per_minute: u32) -> Self {
        Self {
            id,
            millis_per_sheet: millis_per_sheet(sheets_per_minute),
            queue: VecDeque::new(),
            pages_printed: 0,
            queued_pages: 0,
            printing: false,
            job_start: SimTime::default(),
            jobs_completed: 0,
            pages_completed: 0,
        }
    }

    pub fn id(&self) -> PrinterId {
        self.id
    }

    pub fn name(&self) -> String {
        format!("Printer {}", self.id)
    }

    pub fn state(&self) -> PrinterState {
        match (self.queue.is_empty(), self.printing) {
            (true, _) => PrinterState::Idle,
            (false, false) => PrinterState::Starting,
            (false, true) => PrinterState::Printing,
        }
    }

    pub fn has_no_jobs(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_printing(&self) -> bool {
        self.printing
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn current_job(&self) -> Option<&Job> {
        self.queue.front()
    }

    pub fn pages_printed_of_current(&self) -> u32 {
        self.pages_printed
    }

    /// Pages left on the head job.
    pub fn pages_left(&self) -> u32 {
        self.queue
            .front()
            .map_or(0, |job| job.pages() - self.pages_printed)
    }

    /// Outstanding pages across the whole queue, including progress on the head job.
    pub fn total_pages_remaining(&self) -> u64 {
        if self.queue.is_empty() {
            return 0;
        }
        debug_assert!(
            self.queued_pages >= u64::from(self.pages_printed),
            "{} progress exceeds queued pages",
            self.name()
        );
        self.queued_pages - u64::from(self.pages_printed)
    }

    pub fn jobs_completed(&self) -> u64 {
        self.jobs_completed
    }

    /// Pages of finished jobs plus progress on the current one.
    pub fn pages_printed_total(&self) -> u64 {
        self.pages_completed + u64::from(self.pages_printed)
    }

    /// Append `job` to the queue. Starts it straight away if the printer had nothing queued.
    pub fn enqueue(&mut self, job: Job, now: SimTime, sink: &mut dyn EventSink) {
        self.queued_pages += u64::from(job.pages());
        sink.emit(&SimEvent::JobQueued {
            at: now,
            printer: self.id,
            job: job.clone(),
        });
        tracing::debug!(printer = self.id, job = job.id(), pages = job.pages(), "job queued");
        self.queue.push_back(job);
        if self.queue.len() == 1 {
            self.attempt_start_next(now, sink);
        }
    }

    /// Recompute progress on the head job at `now`; finish it and start the next one
    /// when all of its pages are out.
    pub fn tick(&mut self, now: SimTime, sink: &mut dyn EventSink) {
        let Some(head_pages) = self.queue.front().map(Job::pages) else {
            return;
        };
        if !self.printing {
            self.attempt_start_next(now, sink);
            return;
        }

        let sheets = now.millis_since(self.job_start) / self.millis_per_sheet;
        self.pages_printed = sheets.min(u64::from(head_pages)) as u32;

        if self.pages_printed == head_pages {
            let Some(done) = self.queue.pop_front() else {
                return;
            };
            sink.emit(&SimEvent::JobFinished {
                at: now,
                printer: self.id,
                job: done.clone(),
            });
            tracing::debug!(printer = self.id, job = done.id(), "job finished");
            debug_assert!(self.queued_pages >= u64::from(done.pages()));
            self.queued_pages -= u64::from(done.pages());
            self.pages_completed += u64::from(done.pages());
            self.jobs_completed += 1;
            self.pages_printed = 0;
            self.printing = false;
            self.attempt_start_next(now, sink);
        }
    }

    /// Start the head job unless the queue is empty or a job is already printing.
    pub fn attempt_start_next(&mut self, now: SimTime, sink: &mut dyn EventSink) {
        if self.printing {
            return;
        }
        let Some(job) = self.queue.front() else {
            return;
        };
        self.job_start = now;
        self.pages_printed = 0;
        self.printing = true;
        sink.emit(&SimEvent::JobStarted {
            at: now,
            printer: self.id,
            job: job.clone(),
        });
        tracing::debug!(printer = self.id, job = job.id(), "job started");
    }

    /// Empty the queue, returning each job with the pages it still needs.
    ///
    /// Only meant for end-of-run reporting; the printer is idle afterwards.
    pub fn drain_remaining_jobs_for_report(&mut self) -> Vec<RemainingJob> {
        let printed = self.pages_printed;
        let drained = self
            .queue
            .drain(..)
            .enumerate()
            .map(|(i, job)| {
                let pages_remaining = if i == 0 { job.pages() - printed } else { job.pages() };
                RemainingJob { job, pages_remaining }
            })
            .collect();
        self.queued_pages = 0;
        self.printing = false;
        drained
    }

    /// Snapshot for the final report. Drains the queue.
    pub fn report(&mut self) -> PrinterReport {
        let total_pages_left = self.total_pages_remaining();
        let pages_printed = self.pages_printed_total();
        let remaining = self.drain_remaining_jobs_for_report();
        self.pages_completed = pages_printed;
        self.pages_printed = 0;
        PrinterReport {
            printer: self.id,
            total_pages_left,
            jobs_completed: self.jobs_completed,
            pages_printed,
            remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spooler_shared::JobFactory;

    struct Discard;

    impl EventSink for Discard {
        fn emit(&mut self, _event: &SimEvent) {}
    }

    #[test]
    fn test_millis_per_sheet_uses_integer_division() {
        assert_eq!(millis_per_sheet(7), 8_571);
        assert_eq!(millis_per_sheet(60), 1_000);
    }

    #[test]
    fn test_state_transitions() {
        let mut jobs = JobFactory::new();
        let mut printer = Printer::new(0, DEFAULT_SHEETS_PER_MINUTE);
        assert_eq!(printer.state(), PrinterState::Idle);
        printer.enqueue(jobs.create(1).unwrap(), SimTime::from_secs(0), &mut Discard);
        assert_eq!(printer.state(), PrinterState::Printing);
        printer.tick(SimTime::from_secs(9), &mut Discard);
        assert_eq!(printer.state(), PrinterState::Idle);
        assert_eq!(printer.jobs_completed(), 1);
    }

    #[test]
    fn test_drain_reports_head_progress() {
        let mut jobs = JobFactory::new();
        let mut printer = Printer::new(3, 60);
        printer.enqueue(jobs.create(10).unwrap(), SimTime::from_secs(0), &mut Discard);
        printer.enqueue(jobs.create(5).unwrap(), SimTime::from_secs(0), &mut Discard);
        printer.tick(SimTime::from_secs(4), &mut Discard);
        assert_eq!(printer.total_pages_remaining(), 11);

        let report = printer.report();
        assert_eq!(report.total_pages_left, 11);
        assert_eq!(report.pages_printed, 4);
        assert_eq!(report.remaining[0].pages_remaining, 6);
        assert_eq!(report.remaining[1].pages_remaining, 5);
        assert!(printer.has_no_jobs());
        assert_eq!(printer.total_pages_remaining(), 0);
        assert_eq!(printer.pages_printed_total(), 4);
    }
}
