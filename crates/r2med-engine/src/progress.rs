//! Progress callback that reports chunk completion through tracing.
//!
//! Logs at `info` whenever the percentage reaches the next multiple of
//! the configured step and at `debug` otherwise, so a 1000-replication
//! run produces a handful of info lines instead of a hundred.

use r2med_core::runner::ProgressCallback;
use r2med_types::ProgressUpdate;
use tracing::{debug, info};

/// Callback that logs progress updates.
pub struct LoggingProgress {
    step: f64,
    next_milestone: f64,
}

impl LoggingProgress {
    /// Create a callback that logs at `info` every `step` percent.
    ///
    /// A non-positive `step` logs every update at `info`.
    pub const fn new(step: f64) -> Self {
        Self {
            step,
            next_milestone: step,
        }
    }
}

impl ProgressCallback for LoggingProgress {
    fn on_progress(&mut self, update: &ProgressUpdate) {
        if self.step <= 0.0 || update.percent >= self.next_milestone {
            info!(
                run_id = %update.run_id,
                percent = format_args!("{:.0}", update.percent),
                completed_replications = update.completed_replications,
                "Simulation progress"
            );
            while self.step > 0.0 && self.next_milestone <= update.percent {
                self.next_milestone += self.step;
            }
        } else {
            debug!(
                run_id = %update.run_id,
                completed_chunks = update.completed_chunks,
                total_chunks = update.total_chunks,
                percent = update.percent,
                "Chunk complete"
            );
        }
    }
}
