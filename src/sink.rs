//! Event sinks: human-readable console lines, JSON lines, in-memory log.

use std::io::Write;

use serde::Serialize;
use spooler_shared::{EventSink, SimEvent, SimulationReport};

/// One human-readable line per event.
pub fn format_event(event: &SimEvent) -> String {
    match event {
        SimEvent::JobCreated { at, job } => format!("{} created {}", at, job),
        SimEvent::JobQueued { at, printer, job } => {
            format!("{} Printer {} added job to the queue {}", at, printer, job)
        }
        SimEvent::JobStarted { at, printer, job } => {
            format!("{} Printer {} started printing {}", at, printer, job)
        }
        SimEvent::JobFinished { at, printer, job } => {
            format!("{} Printer {} finished printing {}", at, printer, job)
        }
    }
}

/// Writes formatted events and the final report to `W`.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventSink for ConsoleSink<W> {
    fn emit(&mut self, event: &SimEvent) {
        if let Err(e) = writeln!(self.out, "{}", format_event(event)) {
            tracing::warn!("Failed to write event: {}", e);
        }
    }

    fn finish(&mut self, report: &SimulationReport) {
        if let Err(e) = write!(self.out, "\n{}", report).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write report: {}", e);
        }
    }
}

#[derive(Serialize)]
struct ReportRecord<'a> {
    event: &'static str,
    #[serde(flatten)]
    report: &'a SimulationReport,
}

/// One JSON object per line; the report is a final object tagged `"report"`.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_record<T: Serialize>(&mut self, record: &T) {
        let result = serde_json::to_string(record)
            .map_err(std::io::Error::from)
            .and_then(|json| writeln!(self.out, "{}", json));
        if let Err(e) = result {
            tracing::warn!("Failed to write JSON line: {}", e);
        }
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn emit(&mut self, event: &SimEvent) {
        self.write_record(event);
    }

    fn finish(&mut self, report: &SimulationReport) {
        self.write_record(&ReportRecord { event: "report", report });
        if let Err(e) = self.out.flush() {
            tracing::warn!("Failed to flush JSON lines: {}", e);
        }
    }
}

/// Keeps every event and the report in memory.
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<SimEvent>,
    pub report: Option<SimulationReport>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &SimEvent) {
        self.events.push(event.clone());
    }

    fn finish(&mut self, report: &SimulationReport) {
        self.report = Some(report.clone());
    }
}
