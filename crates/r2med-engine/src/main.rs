//! Engine binary for the R2med bootstrap simulation.
//!
//! This is the headless entry point that wires together configuration,
//! the random source, run control, and the orchestrator. It loads the
//! configuration, runs the simulation to completion (or until Ctrl-C), logs
//! the summary, and prints a JSON report to stdout.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `r2med-config.yaml` (or `$R2MED_CONFIG`)
//! 2. Initialize structured logging (tracing, to stderr)
//! 3. Resolve the scenario preset and create the random source
//! 4. Install the Ctrl-C cancellation hook
//! 5. Run the simulation
//! 6. Log the result and print the report

mod error;
mod progress;
mod report;

use std::path::PathBuf;
use std::sync::Arc;

use r2med_core::config::EngineConfig;
use r2med_core::operator::RunControl;
use r2med_core::runner;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::progress::LoggingProgress;
use crate::report::Report;

/// Default configuration file name, looked up in the working directory.
const CONFIG_FILE: &str = "r2med-config.yaml";

/// Percent step between `info`-level progress lines.
const PROGRESS_LOG_STEP: f64 = 10.0;

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration loading, the simulation run, or report
/// serialization fails.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("r2med-engine starting");

    // 3. Resolve parameters and the random source.
    let simulation = config.resolved_simulation()?;
    info!(
        preset = config.preset.as_deref().unwrap_or("none"),
        n = simulation.n,
        replications = simulation.replications,
        bootstrap_samples = simulation.bootstrap_samples,
        seed = ?config.run.seed,
        "Configuration loaded"
    );

    let mut rng = match config.run.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => {
            info!("No seed configured, run will not be reproducible");
            SmallRng::from_os_rng()
        }
    };

    // 4. Cancel at the next chunk boundary on Ctrl-C.
    let control = Arc::new(RunControl::new());
    {
        let control = Arc::clone(&control);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, cancelling at next chunk boundary");
                control.request_cancel();
            }
        });
    }

    // 5. Run the simulation.
    let mut callback = LoggingProgress::new(PROGRESS_LOG_STEP);
    let outcome = runner::run_simulation(&simulation, &mut rng, &control, &mut callback).await;

    let snapshot = control.snapshot().await;
    info!(
        status = ?snapshot.status,
        progress = snapshot.progress,
        completed_replications = snapshot.completed_replications,
        cancel_requested = snapshot.cancel_requested,
        elapsed_seconds = snapshot.elapsed_seconds,
        started_at = snapshot.started_at.as_deref().unwrap_or("never"),
        "Run control final state"
    );
    let result = outcome?;

    // 6. Log results and emit the report.
    runner::log_simulation_end(&result);

    let report = Report::new(&result, config.run.seed);
    println!("{}", serde_json::to_string_pretty(&report)?);

    info!(run_id = %result.run_id, "r2med-engine shutdown complete");

    Ok(())
}

/// Load the engine configuration.
///
/// Uses `$R2MED_CONFIG` if set, otherwise `r2med-config.yaml` relative to
/// the current working directory. A missing file means defaults.
fn load_config() -> Result<EngineConfig, EngineError> {
    let config_path = std::env::var_os("R2MED_CONFIG")
        .map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);
    if config_path.exists() {
        let config = EngineConfig::from_file(&config_path)?;
        Ok(config)
    } else {
        let mut config = EngineConfig::default();
        config.apply_env_overrides()?;
        Ok(config)
    }
}
