//! Periodic job arrivals and least-loaded routing.

use spooler_shared::{EventSink, JobError, JobFactory, JobId, SimEvent, SimTime};

use crate::job_generator::PageSource;
use crate::printer::Printer;

/// Pick the printer that should receive the next job.
///
/// Printers are scanned in index order. The first one with nothing queued wins
/// outright; otherwise the one with the fewest outstanding pages wins, the
/// lowest index taking ties. `None` only for an empty pool.
pub fn select_printer(printers: &[Printer]) -> Option<usize> {
    let mut selected: Option<(usize, u64)> = None;
    for (index, printer) in printers.iter().enumerate() {
        if printer.has_no_jobs() {
            return Some(index);
        }
        let load = printer.total_pages_remaining();
        match selected {
            Some((_, best)) if load >= best => {}
            _ => selected = Some((index, load)),
        }
    }
    selected.map(|(index, _)| index)
}

pub struct Dispatcher {
    interval_ms: u64,
    next_arrival: SimTime,
    jobs: JobFactory,
    pages: Box<dyn PageSource>,
    pages_created: u64,
}

impl Dispatcher {
    /// First arrival lands one `interval_ms` after `start`.
    pub fn new(start: SimTime, interval_ms: u64, pages: Box<dyn PageSource>) -> Self {
        debug_assert!(interval_ms > 0, "arrival interval must be positive");
        Self {
            interval_ms,
            next_arrival: start.plus_millis(interval_ms),
            jobs: JobFactory::new(),
            pages,
            pages_created: 0,
        }
    }

    pub fn next_arrival(&self) -> SimTime {
        self.next_arrival
    }

    pub fn jobs_created(&self) -> u64 {
        self.jobs.created()
    }

    pub fn pages_created(&self) -> u64 {
        self.pages_created
    }

    /// Create and route one job per arrival deadline reached by `now`.
    ///
    /// Missed deadlines are caught up one interval at a time. Returns the ids of
    /// the jobs created.
    pub fn maybe_generate_arrival(
        &mut self,
        now: SimTime,
        printers: &mut [Printer],
        sink: &mut dyn EventSink,
    ) -> Result<Vec<JobId>, JobError> {
        let mut created = Vec::new();
        while now >= self.next_arrival {
            self.next_arrival = self.next_arrival.plus_millis(self.interval_ms);
            let job = self.jobs.create(self.pages.next_pages())?;
            self.pages_created += u64::from(job.pages());
            sink.emit(&SimEvent::JobCreated {
                at: now,
                job: job.clone(),
            });
            created.push(job.id());

            let Some(index) = select_printer(printers) else {
                tracing::warn!(job = job.id(), "no printers to route job to");
                continue;
            };
            tracing::debug!(
                job = job.id(),
                printer = index,
                load = printers[index].total_pages_remaining(),
                "routing job"
            );
            printers[index].enqueue(job, now, sink);
        }
        Ok(created)
    }
}
