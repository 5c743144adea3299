// src/main.rs - CLI entry point for the print queue simulation
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use spooler_rs::config::{Config, OutputFormat, load_config, local_time_of_day};
use spooler_rs::simulator::{ManualTimeSource, StdTimeSource};
use spooler_rs::sink::{ConsoleSink, JsonLinesSink};
use spooler_rs::{EventSink, Simulation, TimeSource};

/// Print queue simulation
#[derive(Parser, Debug)]
#[command(name = "spooler", about = "Simulates print jobs routed to the least-loaded printer.")]
struct Cli {
    /// Path to a TOML config file (overrides defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of printers
    #[arg(long)]
    printers: Option<usize>,

    /// Simulated seconds per real second
    #[arg(long)]
    speed: Option<f64>,

    /// Simulated seconds to run
    #[arg(long)]
    duration_secs: Option<u64>,

    /// Seed for job sizes
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated start time of day (HH:MM:SS)
    #[arg(long)]
    start_time: Option<String>,

    /// Event output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Use virtual time: no real waiting between iterations
    #[arg(long)]
    instant: bool,

    /// Debug-level logging on stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the simulation (default)
    Run,
    /// Print the effective configuration as TOML
    ShowConfig,
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(printers) = self.printers {
            config.simulation.printers = printers;
        }
        if let Some(speed) = self.speed {
            config.simulation.speed = speed;
        }
        if let Some(duration) = self.duration_secs {
            config.simulation.duration_secs = duration;
        }
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
        if let Some(ref start) = self.start_time {
            config.simulation.start_time = Some(start.clone());
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the event stream
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let mut config = match cli.config {
        Some(ref path) => {
            let path = path.to_string_lossy();
            tracing::info!("Loading configuration from: {}", path);
            load_config(&path)?
        }
        None => Config::default(),
    };
    cli.apply_overrides(&mut config);
    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    if let Some(Commands::ShowConfig) = cli.command {
        print!("{}", toml::to_string(&config)?);
        return Ok(());
    }

    let start = config
        .start_time_of_day()?
        .unwrap_or_else(local_time_of_day);
    let time_source: Box<dyn TimeSource> = if cli.instant {
        let step = Duration::from_millis(config.simulation.poll_interval_ms);
        Box::new(ManualTimeSource::new(step))
    } else {
        Box::new(StdTimeSource)
    };

    let mut simulation = Simulation::from_config(&config, start, time_source)?;
    let stdout = std::io::stdout();
    let mut sink: Box<dyn EventSink> = match config.output.format {
        OutputFormat::Text => Box::new(ConsoleSink::new(stdout.lock())),
        OutputFormat::Jsonl => Box::new(JsonLinesSink::new(stdout.lock())),
    };
    simulation.run(sink.as_mut())?;
    Ok(())
}
