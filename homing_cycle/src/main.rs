//! # Homing Cycle
//!
//! Runs the limit-switch homing procedure against a simulated machine.
//!
//! Loads a single TOML file (`[shared]`, `[settings]`, `[homing]`, optional
//! `[pins]` and `[simulation]`), configures the limit inputs and runs
//! `go_home`. Timing uses a virtual clock unless `--realtime` is given, in
//! which case the pulse loop spins on the wall clock after RT setup.

use clap::Parser;
use homing_common::axis::Axis;
use homing_common::config::{ConfigLoader, HomingFileConfig, LogLevel};
use homing_common::consts::DEFAULT_CONFIG_PATH;
use homing_common::hal::port::Delay;
use homing_common::position::MachinePosition;
use homing_cycle::rt::rt_setup;
use homing_cycle::{HomingReport, HomingSequencer};
use homing_hal::{SimPlanner, SimSteppers, SimulatedMachine, SpinDelay, VirtualClock};
use std::path::PathBuf;
use std::process;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Homing Cycle: limit-switch homing for step/direction machines
#[derive(Parser, Debug)]
#[command(name = "homing_cycle")]
#[command(version)]
#[command(about = "Limit-switch homing cycle for step/direction machines")]
struct Args {
    /// Path to the homing configuration TOML.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Time pulses with a busy-wait on the wall clock (after RT setup).
    #[arg(long)]
    realtime: bool,

    /// CPU core to pin the homing thread to (with --realtime).
    #[arg(long, default_value_t = 1)]
    cpu_core: usize,

    /// SCHED_FIFO priority (with --realtime).
    #[arg(long, default_value_t = 80)]
    rt_priority: i32,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    let loaded = HomingFileConfig::load(&args.config);
    let log_level = loaded
        .as_ref()
        .map(|c| c.shared.log_level)
        .unwrap_or_default();
    setup_tracing(&args, log_level);

    info!("Homing Cycle v{} starting...", env!("CARGO_PKG_VERSION"));

    let result = loaded
        .map_err(|e| format!("{}: {e}", args.config.display()))
        .and_then(|config| run(&args, &config).map_err(|e| e.to_string()));
    if let Err(e) = result {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("Homing Cycle finished");
}

fn run(args: &Args, config: &HomingFileConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    info!("Configuration loaded: service '{}'", config.shared.service_name);

    if config.homing.max_pulses_per_phase.is_none() {
        warn!("No max_pulses_per_phase set: a switch that never engages blocks forever");
    }

    if args.realtime {
        rt_setup(args.cpu_core, args.rt_priority)?;
        home(config, SpinDelay::new())
    } else {
        home(config, VirtualClock::new())
    }
}

fn home<D: Delay>(config: &HomingFileConfig, delay: D) -> Result<(), Box<dyn std::error::Error>> {
    let machine = SimulatedMachine::new(config.pins.clone(), &config.settings, &config.simulation);
    let mut sequencer = HomingSequencer::from_config(machine, delay, config);
    sequencer.init_limits();

    let mut planner = SimPlanner::new(0);
    let mut steppers = SimSteppers::new();
    let mut position = MachinePosition::default();

    let report = sequencer.go_home(&mut planner, &mut steppers, &mut position)?;
    log_report(&report);

    let machine = sequencer.port();
    for axis in Axis::ALL {
        info!(
            "Axis {}: carriage at {} steps, machine position {}",
            axis,
            machine.position(axis),
            position.get(axis)
        );
    }
    Ok(())
}

fn log_report(report: &HomingReport) {
    for phase in &report.phases {
        let retired: String = phase.cycle.retired.iter().map(|a| a.letter()).collect();
        info!(
            "Phase {}: axes {}, {} pulses, {} samples, order {}",
            phase.phase, phase.cycle.axes, phase.cycle.pulses, phase.cycle.iterations, retired
        );
    }
    info!(
        "Homed {} in {} pulses ({} µs requested)",
        report.homed,
        report.total_pulses(),
        report.total_elapsed_us()
    );
}

fn setup_tracing(args: &Args, log_level: LogLevel) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        log_level.as_str().parse().unwrap_or(Level::INFO)
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
