//! CatDeterrent: host runner.
//!
//! Drives the detection loop against simulated peripherals so the whole
//! controller (drivers included) can be exercised off-target.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  PirSensor         PlausibilityFilter   RelayDriver            │
//! │  (ScenarioPirPin)  (ScenarioRanger)     (SimRelayPin)          │
//! │  ConsoleDisplay    TeeEventLog          AsyncIoDelay  HostClock │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            DetectorService (pure logic)                │    │
//! │  │  FusionClassifier · RateGate · PumpGuard               │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  LocalExecutor: detection loop  ⟂  shutdown signal             │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use core::time::Duration;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;
use log::{LevelFilter, info, warn};

use catdeterrent::adapters::board::Board;
use catdeterrent::adapters::config_file::JsonConfigFile;
use catdeterrent::adapters::delay::AsyncIoDelay;
use catdeterrent::adapters::display::ConsoleDisplay;
use catdeterrent::adapters::log_sink::{LineEventLog, LogEventSink, TeeEventLog};
use catdeterrent::adapters::sim::{Scenario, ScenarioPirPin, ScenarioRanger, SimRelayPin, SimSource};
use catdeterrent::adapters::time::HostClock;
use catdeterrent::app::events::Outcome;
use catdeterrent::app::ports::{ActuatorPort, ConfigPort};
use catdeterrent::app::service::DetectorService;
use catdeterrent::drivers::relay::{Polarity, RelayDriver};
use catdeterrent::sensors::{PirSensor, PlausibilityFilter};

type SimBoard = Board<
    PirSensor<ScenarioPirPin>,
    PlausibilityFilter<ScenarioRanger>,
    RelayDriver<SimRelayPin>,
    ConsoleDisplay,
    TeeEventLog<LogEventSink, LineEventLog<Box<dyn Write>>>,
    AsyncIoDelay,
    HostClock,
>;

type Shutdown = Signal<NoopRawMutex, ()>;

// ── CLI ───────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "catdeterrent")]
#[command(about = "Run the cat detector against a simulated yard")]
struct Cli {
    /// JSON controller config (defaults when absent)
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON scenario; the built-in cat pass is used when absent
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Append detection records to this text file
    #[arg(long = "event-log")]
    event_log: Option<PathBuf>,
    /// Stop after this many seconds
    #[arg(long = "run-secs")]
    run_secs: Option<u64>,
    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

// ── Logging ───────────────────────────────────────────────────

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

// ── Tasks ─────────────────────────────────────────────────────

/// Sampling loop.  Returns when a non-repeating scenario runs out.
async fn detection_loop(
    service: &mut DetectorService,
    board: &mut SimBoard,
    source: &SimSource,
    interval: Duration,
) {
    loop {
        match service.tick(board).await {
            Ok(decision) if decision.outcome != Outcome::Ignored => {
                info!("DETECT | {:?}", decision.outcome);
            }
            Ok(_) => {}
            // Actuator faults are reported and the loop carries on.
            Err(e) => warn!("DETECT | {}", e),
        }

        if !source.advance() {
            info!("SIM | scenario finished");
            return;
        }
        async_io_mini::Timer::after(interval).await;
    }
}

async fn shutdown_after(signal: &Shutdown, after: Duration) {
    async_io_mini::Timer::after(after).await;
    info!("SHUTDOWN | run time of {}s elapsed", after.as_secs());
    signal.signal(());
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    log::set_logger(&LOGGER).map_err(|e| anyhow!("logger init failed: {e}"))?;
    log::set_max_level(if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
    info!("CatDeterrent v{}", env!("CARGO_PKG_VERSION"));

    // ── 1. Config ─────────────────────────────────────────────
    let config = JsonConfigFile::new(cli.config.clone())
        .load()
        .context("loading controller config")?;

    // ── 2. Peripherals ────────────────────────────────────────
    let scenario = match &cli.scenario {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading scenario {}", path.display()))?;
            Scenario::from_json(&text)
                .with_context(|| format!("parsing scenario {}", path.display()))?
        }
        None => Scenario::cat_pass(),
    };
    info!("SIM | {} samples, repeat={}", scenario.samples.len(), scenario.repeat);
    let source = SimSource::new(scenario);
    let (relay_pin, relay_probe) = SimRelayPin::new();

    let line_sink: Box<dyn Write> = match &cli.event_log {
        Some(path) => Box::new(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening event log {}", path.display()))?,
        ),
        None => Box::new(std::io::sink()),
    };

    let mut board: SimBoard = Board {
        presence: PirSensor::new(source.pir_pin()),
        range: PlausibilityFilter::new(source.ranger()),
        pump: RelayDriver::new(relay_pin, Polarity::ActiveHigh),
        display: ConsoleDisplay::new(),
        event_log: TeeEventLog {
            first: LogEventSink::new(),
            second: LineEventLog::new(line_sink),
        },
        delay: AsyncIoDelay::new(),
        clock: HostClock::new(),
    };
    let mut service = DetectorService::new(&config);

    // ── 3. Run until the scenario ends or the shutdown signal fires ──
    let shutdown = Shutdown::new();
    let executor: edge_executor::LocalExecutor<'_, 4> = edge_executor::LocalExecutor::new();
    if let Some(secs) = cli.run_secs {
        executor
            .spawn(shutdown_after(&shutdown, Duration::from_secs(secs)))
            .detach();
    }

    info!("Starting detection ({} ms tick)", config.sample_interval_ms);
    futures_lite::future::block_on(executor.run(futures_lite::future::or(
        detection_loop(&mut service, &mut board, &source, config.sample_interval()),
        shutdown.wait(),
    )));

    // ── 4. Wind down ──────────────────────────────────────────
    // The pump guard has already released the relay if a hold was cut
    // short; this covers a relay that failed to switch at that moment.
    if board.is_on() {
        warn!("SHUTDOWN | pump still on, forcing off");
        board.set(false).context("forcing pump off")?;
    }
    info!(
        "SHUTDOWN | relay pin {} after {} edges",
        if relay_probe.is_high() { "HIGH" } else { "low" },
        relay_probe.edges()
    );
    info!(
        "SHUTDOWN | scenario {}, pir read errors {}, ranger readings dropped {}",
        if source.is_finished() { "finished" } else { "interrupted" },
        board.presence.read_errors(),
        board.range.rejected()
    );

    let stats = serde_json::to_string_pretty(service.stats()).context("encoding stats")?;
    println!("{stats}");
    Ok(())
}
