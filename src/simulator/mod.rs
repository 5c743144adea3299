//! Simulation driver: owns the clock, the printer pool and the dispatcher and
//! runs the tick loop until the configured simulated duration has elapsed.

pub mod time_source;

use std::time::Duration;

use spooler_shared::{EventSink, JobError, SimTime, SimulationReport, TimeSource};
use thiserror::Error;

use crate::clock::SimClock;
use crate::config::{Config, ConfigError};
use crate::dispatcher::Dispatcher;
use crate::job_generator::{PageSource, TieredPageGenerator};
use crate::printer::{DEFAULT_SHEETS_PER_MINUTE, Printer};

pub use time_source::{ManualTimeSource, StdTimeSource};

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Job error: {0}")]
    Job(#[from] JobError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Runtime parameters of one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationParams {
    pub printers: usize,
    /// Simulated seconds per real second
    pub speed: f64,
    /// Simulated run length
    pub duration: Duration,
    /// Real sleep between loop iterations
    pub poll_interval: Duration,
    pub sheets_per_minute: u32,
    /// Simulated time between arrivals
    pub arrival_interval: Duration,
    /// Simulated time of day at which the run starts
    pub start: SimTime,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            printers: 4,
            speed: 300.0,
            duration: Duration::from_secs(30 * 60),
            poll_interval: Duration::from_millis(1),
            sheets_per_minute: DEFAULT_SHEETS_PER_MINUTE,
            arrival_interval: Duration::from_secs(30),
            start: SimTime::default(),
        }
    }
}

impl SimulationParams {
    pub fn from_config(config: &Config, start: SimTime) -> Self {
        Self {
            printers: config.simulation.printers,
            speed: config.simulation.speed,
            duration: Duration::from_secs(config.simulation.duration_secs),
            poll_interval: Duration::from_millis(config.simulation.poll_interval_ms),
            sheets_per_minute: config.printer.sheets_per_minute,
            arrival_interval: Duration::from_secs(config.dispatch.arrival_interval_secs),
            start,
        }
    }

    fn validate(&self) -> Result<(), SimulationError> {
        if self.printers < 1 {
            return Err(SimulationError::InvalidConfiguration(
                "at least one printer is required".to_string(),
            ));
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "speed multiplier must be positive, got {}",
                self.speed
            )));
        }
        if self.sheets_per_minute == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "sheet rate must be positive".to_string(),
            ));
        }
        if self.arrival_interval.as_millis() == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "arrival interval must be at least 1ms".to_string(),
            ));
        }
        Ok(())
    }
}

fn duration_millis(what: &str, duration: Duration) -> Result<u64, SimulationError> {
    u64::try_from(duration.as_millis()).map_err(|_| {
        SimulationError::InvalidConfiguration(format!("{} of {:?} is too long", what, duration))
    })
}

pub struct Simulation {
    clock: SimClock,
    printers: Vec<Printer>,
    dispatcher: Dispatcher,
    time_source: Box<dyn TimeSource>,
    poll_interval: Duration,
    end: SimTime,
    ticks: u64,
}

impl Simulation {
    pub fn new(
        params: SimulationParams,
        pages: Box<dyn PageSource>,
        time_source: Box<dyn TimeSource>,
    ) -> Result<Self, SimulationError> {
        params.validate()?;
        let printers = (0..params.printers)
            .map(|id| Printer::new(id, params.sheets_per_minute))
            .collect();
        let interval_ms = duration_millis("arrival interval", params.arrival_interval)?;
        let end = duration_millis("duration", params.duration)?
            .checked_add(params.start.as_millis())
            // The clock counts microseconds
            .filter(|end_ms| end_ms.checked_mul(1_000).is_some())
            .map(SimTime::from_millis)
            .ok_or_else(|| {
                SimulationError::InvalidConfiguration(
                    "run end time is beyond the simulated timeline".to_string(),
                )
            })?;
        Ok(Self {
            clock: SimClock::new(params.start, params.speed),
            printers,
            dispatcher: Dispatcher::new(params.start, interval_ms, pages),
            time_source,
            poll_interval: params.poll_interval,
            end,
            ticks: 0,
        })
    }

    /// Build a run from file configuration with the tiered random job sizes.
    pub fn from_config(
        config: &Config,
        start: SimTime,
        time_source: Box<dyn TimeSource>,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let pages = TieredPageGenerator::from_seed(config.simulation.seed);
        Self::new(SimulationParams::from_config(config, start), Box::new(pages), time_source)
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn printers(&self) -> &[Printer] {
        &self.printers
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Simulated seconds processed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn end_time(&self) -> SimTime {
        self.end
    }

    pub fn is_finished(&self) -> bool {
        self.clock.now() >= self.end
    }

    /// Feed a synthetic real-time delta and process the resulting ticks.
    pub fn advance_real(
        &mut self,
        real_elapsed: Duration,
        sink: &mut dyn EventSink,
    ) -> Result<u64, SimulationError> {
        self.clock.advance(real_elapsed);
        self.drain_ticks(sink)
    }

    /// One loop iteration: sample the time source, process pending ticks, sleep.
    pub fn step(&mut self, sink: &mut dyn EventSink) -> Result<u64, SimulationError> {
        let real_now = self.time_source.now_monotonic();
        self.clock.sync(real_now);
        let processed = self.drain_ticks(sink)?;
        if !self.is_finished() {
            self.time_source.sleep(self.poll_interval);
        }
        Ok(processed)
    }

    /// Loop until the simulated duration has elapsed, then report.
    pub fn run(&mut self, sink: &mut dyn EventSink) -> Result<SimulationReport, SimulationError> {
        tracing::info!(
            printers = self.printers.len(),
            speed = self.clock.speed_multiplier(),
            start = %self.clock.now(),
            end = %self.end,
            "Simulation starting"
        );
        let anchor = self.time_source.now_monotonic();
        self.clock.sync(anchor);
        while !self.is_finished() {
            self.step(sink)?;
        }
        let report = self.finish();
        sink.finish(&report);
        tracing::info!(
            ticks = self.ticks,
            jobs = report.jobs_created,
            pages_left = report.total_pages_left(),
            "Simulation ended at {}",
            report.ended_at
        );
        Ok(report)
    }

    /// Final report. Drains every printer queue.
    pub fn finish(&mut self) -> SimulationReport {
        SimulationReport {
            ended_at: self.clock.now(),
            jobs_created: self.dispatcher.jobs_created(),
            pages_created: self.dispatcher.pages_created(),
            printers: self.printers.iter_mut().map(Printer::report).collect(),
        }
    }

    fn drain_ticks(&mut self, sink: &mut dyn EventSink) -> Result<u64, SimulationError> {
        let mut processed = 0;
        while let Some(at) = self.clock.peek_tick() {
            if at > self.end {
                break;
            }
            self.clock.next_tick();
            self.process_tick(at, sink)?;
            processed += 1;
        }
        Ok(processed)
    }

    fn process_tick(&mut self, at: SimTime, sink: &mut dyn EventSink) -> Result<(), SimulationError> {
        tracing::trace!(%at, "tick");
        for printer in &mut self.printers {
            printer.tick(at, sink);
        }
        self.dispatcher.maybe_generate_arrival(at, &mut self.printers, sink)?;
        self.ticks += 1;
        Ok(())
    }
}
