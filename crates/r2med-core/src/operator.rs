//! Shared run control state for cooperative cancellation and progress.
//!
//! The orchestrator consults a [`RunControl`] only at chunk boundaries: it
//! publishes progress there and honours a pending cancellation there. A
//! replication in flight always runs to completion.
//!
//! # Architecture
//!
//! Hot-path fields use [`std::sync::atomic`] types so the control can be
//! wrapped in [`Arc`](std::sync::Arc) and shared with whatever drives the UI
//! without taking a lock between chunks. The lifecycle status and run start
//! time sit behind an async mutex and change only at run start and run end.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use r2med_types::RunStatus;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Shared control state for a simulation run.
///
/// A control may drive several runs in sequence: [`begin_run`](Self::begin_run)
/// resets progress and the completed count and restamps the start time. A
/// cancellation request is sticky. Once set it is never cleared, so every
/// later run on the same control stops at its first chunk boundary.
#[derive(Debug)]
pub struct RunControl {
    /// Whether a cancellation has been requested.
    cancel_requested: AtomicBool,

    /// Latest progress percentage, stored as `f64` bits.
    progress_bits: AtomicU64,

    /// Replications completed so far in the current run.
    completed_replications: AtomicU32,

    /// Status and start time of the current run.
    lifecycle: Mutex<Lifecycle>,
}

#[derive(Debug, Clone, Copy)]
struct Lifecycle {
    status: RunStatus,
    started_at: Option<DateTime<Utc>>,
}

impl RunControl {
    /// Create a fresh control in the [`RunStatus::Idle`] state.
    pub fn new() -> Self {
        Self {
            cancel_requested: AtomicBool::new(false),
            progress_bits: AtomicU64::new(0.0_f64.to_bits()),
            completed_replications: AtomicU32::new(0),
            lifecycle: Mutex::new(Lifecycle {
                status: RunStatus::Idle,
                started_at: None,
            }),
        }
    }

    // -----------------------------------------------------------------------
    // Cancellation
    // -----------------------------------------------------------------------

    /// Ask the orchestrator to stop at the next chunk boundary.
    pub fn request_cancel(&self) {
        self.cancel_requested.store(true, Ordering::Release);
    }

    /// Check whether a cancellation has been requested.
    pub fn is_cancel_requested(&self) -> bool {
        self.cancel_requested.load(Ordering::Acquire)
    }

    // -----------------------------------------------------------------------
    // Progress
    // -----------------------------------------------------------------------

    /// Record progress after a completed chunk.
    pub fn record_progress(&self, percent: f64, completed_replications: u32) {
        self.progress_bits
            .store(percent.to_bits(), Ordering::Release);
        self.completed_replications
            .store(completed_replications, Ordering::Release);
    }

    /// Latest reported progress percentage (0 before the first chunk).
    pub fn progress(&self) -> f64 {
        f64::from_bits(self.progress_bits.load(Ordering::Acquire))
    }

    /// Replications completed so far in the current run.
    pub fn completed_replications(&self) -> u32 {
        self.completed_replications.load(Ordering::Acquire)
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Mark the start of a run at `started_at`.
    ///
    /// Clears progress and the completed count left by an earlier run and
    /// moves the status to [`RunStatus::Running`]. The cancel flag is left
    /// as it is.
    pub async fn begin_run(&self, started_at: DateTime<Utc>) {
        let mut guard = self.lifecycle.lock().await;
        self.record_progress(0.0, 0);
        guard.status = RunStatus::Running;
        guard.started_at = Some(started_at);
    }

    /// Set the lifecycle status.
    pub async fn set_status(&self, status: RunStatus) {
        self.lifecycle.lock().await.status = status;
    }

    /// Current lifecycle status.
    pub async fn status(&self) -> RunStatus {
        self.lifecycle.lock().await.status
    }

    /// When the current run started, if one has.
    pub async fn started_at(&self) -> Option<DateTime<Utc>> {
        self.lifecycle.lock().await.started_at
    }

    /// Point-in-time view for status reporting.
    pub async fn snapshot(&self) -> RunSnapshot {
        let lifecycle = *self.lifecycle.lock().await;
        let elapsed_seconds = lifecycle.started_at.map_or(0, |start| {
            let elapsed = Utc::now().signed_duration_since(start).num_seconds();
            // `num_seconds` can be negative if clocks are weird; treat as 0.
            u64::try_from(elapsed.max(0)).unwrap_or(u64::MAX)
        });
        RunSnapshot {
            status: lifecycle.status,
            progress: self.progress(),
            completed_replications: self.completed_replications(),
            cancel_requested: self.is_cancel_requested(),
            elapsed_seconds,
            started_at: lifecycle.started_at.map(|t| t.to_rfc3339()),
        }
    }
}

impl Default for RunControl {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON-serializable view of a [`RunControl`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    /// Lifecycle status.
    pub status: RunStatus,
    /// Latest progress percentage.
    pub progress: f64,
    /// Replications completed so far.
    pub completed_replications: u32,
    /// Whether a cancellation has been requested.
    pub cancel_requested: bool,
    /// Wall-clock seconds since the current run started (0 before any run).
    pub elapsed_seconds: u64,
    /// ISO 8601 timestamp of when the current run started.
    pub started_at: Option<String>,
}
