//! Simulation orchestrator: chunked replications with progress and
//! cooperative cancellation.
//!
//! [`run_simulation`] drives `replications` independent
//! generate-then-bootstrap cycles in chunks of [`CHUNK_SIZE`]. At every
//! chunk boundary it:
//!
//! - **yields** to the async runtime so a host can interleave other work,
//! - **honours cancellation** requested through [`RunControl`],
//! - **reports progress** `completed_chunks / total_chunks * 100` to the
//!   [`ProgressCallback`] once the chunk is done.
//!
//! A replication never straddles a chunk boundary. The yield carries no data,
//! so removing it would change responsiveness only, never results. Once all
//! chunks finish, summary statistics are computed once over the collected
//! means.

use chrono::Utc;
use r2med_types::{
    ProgressUpdate, RunId, RunStatus, SimulationConfig, SimulationResult, SummaryStatistics,
};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::bootstrap::{BootstrapScratch, bootstrap_mean};
use crate::dataset::{Dataset, len_of};
use crate::operator::RunControl;
use crate::summary::{SummaryError, summarize};
use crate::validation::{ValidationError, validate};

/// Replications per chunk.
pub const CHUNK_SIZE: u32 = 10;

/// Errors that can occur during a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunnerError {
    /// The configuration was rejected before any work started.
    #[error("validation error: {source}")]
    Validation {
        /// The underlying validation error.
        #[from]
        source: ValidationError,
    },

    /// Summary statistics could not be computed.
    #[error("summary error: {source}")]
    Summary {
        /// The underlying summary error.
        #[from]
        source: SummaryError,
    },

    /// A cancellation request was honoured at a chunk boundary.
    #[error("run cancelled after {completed_replications} replications")]
    Cancelled {
        /// Replications that finished before the run stopped.
        completed_replications: u32,
    },
}

/// Callback invoked after each chunk completes.
///
/// Implementations can use this to drive a progress bar, forward updates
/// to a UI, or log. Values of `update.percent` are strictly increasing
/// within a run and the last one is exactly `100.0`.
pub trait ProgressCallback: Send {
    /// Called after a chunk completes.
    fn on_progress(&mut self, update: &ProgressUpdate);
}

/// A no-op progress callback.
pub struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&mut self, _update: &ProgressUpdate) {}
}

/// Number of chunks needed for `replications`.
pub const fn total_chunks(replications: u32) -> u32 {
    replications.div_ceil(CHUNK_SIZE)
}

/// Progress percentage after `completed_chunks` of `total_chunks`.
///
/// Exactly `100.0` when the two are equal.
pub fn progress_percent(completed_chunks: u32, total_chunks: u32) -> f64 {
    if total_chunks == 0 {
        return 100.0;
    }
    f64::from(completed_chunks) / f64::from(total_chunks) * 100.0
}

/// Run one generate-then-bootstrap cycle and return its bootstrap mean.
///
/// The dataset lives only for the duration of this call. `scratch` is
/// reused across calls.
pub fn run_replication(
    config: &SimulationConfig,
    rng: &mut impl Rng,
    scratch: &mut BootstrapScratch,
) -> f64 {
    let data = Dataset::generate(config, rng);
    bootstrap_mean(&data, config.bootstrap_samples, rng, scratch)
}

/// Summary over the finite replication means, plus the count of
/// non-finite (degenerate) ones.
///
/// # Errors
///
/// Returns [`SummaryError::Empty`] if no mean is finite.
pub fn summarize_replications(means: &[f64]) -> Result<(SummaryStatistics, u32), SummaryError> {
    let finite: Vec<f64> = means.iter().copied().filter(|m| m.is_finite()).collect();
    let degenerate = u32::try_from(means.len().saturating_sub(finite.len())).unwrap_or(u32::MAX);
    let summary = summarize(&finite)?;
    Ok((summary, degenerate))
}

/// Run the full Monte Carlo simulation.
///
/// Validates `config` first; nothing is drawn from `rng` if validation
/// fails. Replications run strictly sequentially on the calling task.
///
/// # Arguments
///
/// * `config` - Immutable run parameters
/// * `rng` - Random source for every structural and resampling draw
/// * `control` - Shared cancellation and progress state
/// * `callback` - Called after each chunk
///
/// # Errors
///
/// Returns [`RunnerError::Validation`] for an invalid config,
/// [`RunnerError::Cancelled`] if cancellation was requested, or
/// [`RunnerError::Summary`] if every replication was degenerate.
pub async fn run_simulation<R: Rng>(
    config: &SimulationConfig,
    rng: &mut R,
    control: &RunControl,
    callback: &mut dyn ProgressCallback,
) -> Result<SimulationResult, RunnerError> {
    validate(config)?;

    let run_id = RunId::new();
    let started_at = Utc::now();
    let chunks = total_chunks(config.replications);

    info!(
        %run_id,
        n = config.n,
        replications = config.replications,
        bootstrap_samples = config.bootstrap_samples,
        a = config.a,
        c_prime = config.c_prime,
        b = config.b,
        sigma_em = config.sigma_em,
        chunks,
        "Simulation starting"
    );
    control.begin_run(started_at).await;

    let mut means: Vec<f64> = Vec::with_capacity(len_of(config.replications));
    let mut scratch = BootstrapScratch::with_capacity(len_of(config.n));
    let mut completed: u32 = 0;

    for chunk in 0..chunks {
        tokio::task::yield_now().await;

        if control.is_cancel_requested() {
            warn!(
                %run_id,
                completed_replications = completed,
                "Cancellation requested, stopping at chunk boundary"
            );
            control.set_status(RunStatus::Cancelled).await;
            return Err(RunnerError::Cancelled {
                completed_replications: completed,
            });
        }

        let chunk_end = completed
            .saturating_add(CHUNK_SIZE)
            .min(config.replications);

        while completed < chunk_end {
            let mean = run_replication(config, rng, &mut scratch);
            if !mean.is_finite() {
                warn!(
                    %run_id,
                    replication = completed,
                    mean,
                    "Degenerate sample: bootstrap mean is not finite"
                );
            }
            means.push(mean);
            completed = completed.saturating_add(1);
        }

        let completed_chunks = chunk.saturating_add(1);
        let percent = progress_percent(completed_chunks, chunks);
        control.record_progress(percent, completed);
        callback.on_progress(&ProgressUpdate {
            run_id,
            completed_chunks,
            total_chunks: chunks,
            completed_replications: completed,
            percent,
        });
        debug!(%run_id, completed_chunks, total_chunks = chunks, percent, "Chunk complete");
    }

    let (summary, degenerate_replications) = close_run(control, run_id, &means).await?;

    Ok(SimulationResult {
        run_id,
        config: *config,
        boot_means: means,
        summary,
        degenerate_replications,
        started_at,
        finished_at: Utc::now(),
    })
}

/// Summarize a run whose chunks all finished and record its terminal status.
///
/// The status becomes [`RunStatus::Completed`] on success and
/// [`RunStatus::Failed`] if no summary can be produced.
async fn close_run(
    control: &RunControl,
    run_id: RunId,
    means: &[f64],
) -> Result<(SummaryStatistics, u32), RunnerError> {
    match summarize_replications(means) {
        Ok(summarized) => {
            control.set_status(RunStatus::Completed).await;
            Ok(summarized)
        }
        Err(source) => {
            warn!(%run_id, error = %source, "Run produced no summary");
            control.set_status(RunStatus::Failed).await;
            Err(RunnerError::Summary { source })
        }
    }
}

/// Log the end-of-run summary.
pub fn log_simulation_end(result: &SimulationResult) {
    let s = &result.summary;
    info!(
        run_id = %result.run_id,
        replications = result.boot_means.len(),
        degenerate = result.degenerate_replications,
        min = s.min,
        p25 = s.p25,
        median = s.median,
        p75 = s.p75,
        max = s.max,
        ci_lower = s.ci_lower,
        ci_upper = s.ci_upper,
        elapsed_ms = result
            .finished_at
            .signed_duration_since(result.started_at)
            .num_milliseconds(),
        "Simulation ended"
    );

    if s.brackets_zero() {
        info!("95% interval of bootstrap means contains zero");
    } else {
        warn!(
            ci_lower = s.ci_lower,
            ci_upper = s.ci_upper,
            "95% interval of bootstrap means excludes zero"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use std::sync::Arc;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    /// Records every progress update.
    #[derive(Default)]
    struct Recorder {
        updates: Vec<ProgressUpdate>,
    }

    impl ProgressCallback for Recorder {
        fn on_progress(&mut self, update: &ProgressUpdate) {
            self.updates.push(*update);
        }
    }

    /// Requests cancellation once `after` chunks have completed.
    struct CancelAfter {
        control: Arc<RunControl>,
        after: u32,
    }

    impl ProgressCallback for CancelAfter {
        fn on_progress(&mut self, update: &ProgressUpdate) {
            if update.completed_chunks >= self.after {
                self.control.request_cancel();
            }
        }
    }

    fn small_config(replications: u32) -> SimulationConfig {
        SimulationConfig {
            n: 20,
            replications,
            bootstrap_samples: 5,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn chunk_arithmetic() {
        assert_eq!(total_chunks(1), 1);
        assert_eq!(total_chunks(10), 1);
        assert_eq!(total_chunks(11), 2);
        assert_eq!(total_chunks(25), 3);
        assert_eq!(progress_percent(3, 3), 100.0);
        assert!((progress_percent(1, 3) - 33.333_333).abs() < 1e-5);
    }

    #[tokio::test]
    async fn output_length_equals_replications() {
        for replications in [1, 9, 10, 11, 23] {
            let mut rng = SmallRng::seed_from_u64(u64::from(replications));
            let control = RunControl::new();
            let result = run_simulation(
                &small_config(replications),
                &mut rng,
                &control,
                &mut NoOpProgress,
            )
            .await
            .unwrap();
            assert_eq!(result.boot_means.len(), replications as usize);
            assert_eq!(result.config.replications, replications);
        }
    }

    #[tokio::test]
    async fn progress_is_strictly_increasing_and_ends_at_100() {
        let mut rng = SmallRng::seed_from_u64(25);
        let control = RunControl::new();
        let mut recorder = Recorder::default();
        run_simulation(&small_config(25), &mut rng, &control, &mut recorder)
            .await
            .unwrap();

        let percents: Vec<f64> = recorder.updates.iter().map(|u| u.percent).collect();
        assert_eq!(percents.len(), 3);
        assert!((percents[0] - 100.0 / 3.0).abs() < 1e-9);
        assert!((percents[1] - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(percents[2], 100.0);
        assert!(percents.windows(2).all(|w| w[0] < w[1]));

        let done: Vec<u32> = recorder
            .updates
            .iter()
            .map(|u| u.completed_replications)
            .collect();
        assert_eq!(done, vec![10, 20, 25]);
        assert_eq!(control.progress(), 100.0);
        assert_eq!(control.status().await, RunStatus::Completed);
    }

    #[tokio::test]
    async fn summary_is_ordered() {
        let mut rng = SmallRng::seed_from_u64(3);
        let control = RunControl::new();
        let result = run_simulation(&small_config(40), &mut rng, &control, &mut NoOpProgress)
            .await
            .unwrap();
        let s = result.summary;
        assert!(s.min <= s.p25 && s.p25 <= s.median);
        assert!(s.median <= s.p75 && s.p75 <= s.max);
        assert!(s.ci_lower <= s.median && s.median <= s.ci_upper);
        assert_eq!(result.degenerate_replications, 0);
    }

    #[tokio::test]
    async fn invalid_config_fails_before_any_draw() {
        let config = SimulationConfig {
            replications: 0,
            ..SimulationConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(1);
        let mut untouched = SmallRng::seed_from_u64(1);
        let control = RunControl::new();
        let mut recorder = Recorder::default();

        let err = run_simulation(&config, &mut rng, &control, &mut recorder)
            .await
            .unwrap_err();

        assert!(matches!(err, RunnerError::Validation { .. }));
        assert!(recorder.updates.is_empty());
        assert_eq!(control.status().await, RunStatus::Idle);
        // The generator was never advanced.
        assert_eq!(rng.random::<u64>(), untouched.random::<u64>());
    }

    #[tokio::test]
    async fn cancellation_stops_at_chunk_boundary() {
        let control = Arc::new(RunControl::new());
        let mut callback = CancelAfter {
            control: Arc::clone(&control),
            after: 2,
        };
        let mut rng = SmallRng::seed_from_u64(9);

        let err = run_simulation(&small_config(55), &mut rng, &control, &mut callback)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            RunnerError::Cancelled {
                completed_replications: 20
            }
        );
        assert_eq!(control.status().await, RunStatus::Cancelled);
        assert_eq!(control.completed_replications(), 20);
    }

    #[tokio::test]
    async fn cancellation_before_start_does_no_work() {
        let control = RunControl::new();
        control.request_cancel();
        let mut rng = SmallRng::seed_from_u64(10);
        let err = run_simulation(&small_config(5), &mut rng, &control, &mut NoOpProgress)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RunnerError::Cancelled {
                completed_replications: 0
            }
        );
    }

    #[tokio::test]
    async fn seeded_runs_are_reproducible() {
        let config = small_config(12);
        let mut first_rng = SmallRng::seed_from_u64(2024);
        let mut second_rng = SmallRng::seed_from_u64(2024);
        let first = run_simulation(&config, &mut first_rng, &RunControl::new(), &mut NoOpProgress)
            .await
            .unwrap();
        let second = run_simulation(&config, &mut second_rng, &RunControl::new(), &mut NoOpProgress)
            .await
            .unwrap();

        assert_eq!(first.boot_means, second.boot_means);
        assert_eq!(first.summary, second.summary);
        assert_ne!(first.run_id, second.run_id);
    }

    #[test]
    fn single_bootstrap_sample_matches_resample_exactly() {
        let config = SimulationConfig {
            n: 30,
            bootstrap_samples: 1,
            ..SimulationConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(77);
        let mut scratch = BootstrapScratch::default();
        let mean = run_replication(&config, &mut rng, &mut scratch);

        let mut replay = SmallRng::seed_from_u64(77);
        let data = Dataset::generate(&config, &mut replay);
        let mut check = BootstrapScratch::default();
        check.resample(&data, &mut replay);
        assert_eq!(mean, check.r2med());
    }

    #[test]
    fn degenerate_means_are_counted_and_excluded() {
        let means = [0.01, f64::NAN, -0.02, f64::INFINITY, 0.03];
        let (summary, degenerate) = summarize_replications(&means).unwrap();
        assert_eq!(degenerate, 2);
        assert_eq!(summary.min, -0.02);
        assert_eq!(summary.max, 0.03);
        assert_eq!(summary.median, 0.01);
    }

    #[test]
    fn all_degenerate_is_an_error() {
        let err = summarize_replications(&[f64::NAN, f64::NAN]).unwrap_err();
        assert_eq!(err, SummaryError::Empty);
    }

    #[tokio::test]
    async fn unsummarizable_run_is_marked_failed() {
        let control = RunControl::new();
        control.begin_run(Utc::now()).await;
        let err = close_run(&control, RunId::new(), &[f64::NAN, f64::INFINITY])
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RunnerError::Summary {
                source: SummaryError::Empty
            }
        );
        assert_eq!(control.status().await, RunStatus::Failed);
    }

    #[tokio::test]
    async fn summarized_run_is_marked_completed() {
        let control = RunControl::new();
        control.begin_run(Utc::now()).await;
        let (summary, degenerate) = close_run(&control, RunId::new(), &[0.1, f64::NAN, 0.3])
            .await
            .unwrap();
        assert_eq!(degenerate, 1);
        assert_eq!(summary.max, 0.3);
        assert_eq!(control.status().await, RunStatus::Completed);
    }

    #[tokio::test]
    async fn reused_control_starts_each_run_from_zero() {
        let control = RunControl::new();
        let config = small_config(25);
        let mut rng = SmallRng::seed_from_u64(12);
        run_simulation(&config, &mut rng, &control, &mut NoOpProgress)
            .await
            .unwrap();
        assert_eq!(control.completed_replications(), 25);

        let mut recorder = Recorder::default();
        run_simulation(&small_config(15), &mut rng, &control, &mut recorder)
            .await
            .unwrap();
        assert_eq!(control.completed_replications(), 15);
        assert_eq!(control.progress(), 100.0);
        assert_eq!(recorder.updates.first().map(|u| u.completed_replications), Some(10));
    }

    #[tokio::test]
    async fn cancellation_is_sticky_across_runs() {
        let control = RunControl::new();
        control.request_cancel();
        let mut rng = SmallRng::seed_from_u64(13);
        for _ in 0..2 {
            let err = run_simulation(&small_config(15), &mut rng, &control, &mut NoOpProgress)
                .await
                .unwrap_err();
            assert_eq!(
                err,
                RunnerError::Cancelled {
                    completed_replications: 0
                }
            );
        }
        assert_eq!(control.status().await, RunStatus::Cancelled);
    }
}
