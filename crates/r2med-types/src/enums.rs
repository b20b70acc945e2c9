//! Enumeration types for the R2med simulation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Run lifecycle
// ---------------------------------------------------------------------------

/// Lifecycle state of a simulation run.
///
/// A run starts [`Idle`](Self::Idle), moves to [`Running`](Self::Running)
/// when the orchestrator begins its first chunk, and ends
/// [`Completed`](Self::Completed), [`Cancelled`](Self::Cancelled), or
/// [`Failed`](Self::Failed).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum RunStatus {
    /// No run has started.
    #[default]
    Idle,
    /// Replications are being computed.
    Running,
    /// All replications finished and summary statistics were produced.
    Completed,
    /// A cancellation request was honoured at a chunk boundary.
    Cancelled,
    /// Every replication finished but no summary could be produced.
    Failed,
}

impl RunStatus {
    /// Whether the run has reached a terminal state.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Failed)
    }
}

// ---------------------------------------------------------------------------
// Scenario classification
// ---------------------------------------------------------------------------

/// Classification of a named scenario preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ScenarioKind {
    /// Parameter values typical of applied research (mediator error SD of 1).
    Plausible,
    /// Near-collinear X and M (strong `a`, mediator error SD of 0.1).
    Unrealistic,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_idle() {
        assert_eq!(RunStatus::default(), RunStatus::Idle);
    }

    #[test]
    fn terminal_states() {
        assert!(!RunStatus::Idle.is_terminal());
        assert!(!RunStatus::Running.is_terminal());
        assert!(RunStatus::Completed.is_terminal());
        assert!(RunStatus::Cancelled.is_terminal());
        assert!(RunStatus::Failed.is_terminal());
    }

    #[test]
    fn status_serializes_as_variant_name() {
        let json = serde_json::to_string(&RunStatus::Cancelled).unwrap_or_default();
        assert_eq!(json, "\"Cancelled\"");
    }
}
