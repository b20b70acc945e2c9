//! Core data structs for the R2med simulation.
//!
//! Covers the immutable run input ([`SimulationConfig`]), the immutable run
//! output ([`SimulationResult`] and its [`SummaryStatistics`]), the progress
//! payload emitted between chunks, and the consumer-side histogram and
//! scenario preset records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::ScenarioKind;
use crate::ids::RunId;

// ---------------------------------------------------------------------------
// Simulation input
// ---------------------------------------------------------------------------

/// Parameters of one Monte Carlo run.
///
/// The structural model is
///
/// ```text
/// M = a·X + sigma_em·e_M
/// Y = c_prime·X + b·M + e_Y
/// ```
///
/// with `X`, `e_M`, `e_Y` independent standard normals. The error SD of `Y`
/// is fixed at 1.
///
/// Every field has a default matching the null scenario with `a = c' = 0.5`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SimulationConfig {
    /// Sample size of each generated dataset.
    #[serde(default = "default_n")]
    pub n: u32,

    /// Number of outer Monte Carlo replications.
    #[serde(default = "default_replications")]
    pub replications: u32,

    /// Number of bootstrap resamples drawn per replication.
    #[serde(default = "default_bootstrap_samples")]
    pub bootstrap_samples: u32,

    /// Path coefficient X -> M.
    #[serde(default = "default_a")]
    pub a: f64,

    /// Direct path coefficient X -> Y.
    #[serde(default = "default_c_prime")]
    pub c_prime: f64,

    /// Path coefficient M -> Y. Zero means the indirect effect is null.
    #[serde(default)]
    pub b: f64,

    /// Standard deviation of the mediator's error term.
    #[serde(default = "default_sigma_em")]
    pub sigma_em: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n: default_n(),
            replications: default_replications(),
            bootstrap_samples: default_bootstrap_samples(),
            a: default_a(),
            c_prime: default_c_prime(),
            b: 0.0,
            sigma_em: default_sigma_em(),
        }
    }
}

const fn default_n() -> u32 {
    200
}

const fn default_replications() -> u32 {
    1000
}

const fn default_bootstrap_samples() -> u32 {
    1000
}

const fn default_a() -> f64 {
    0.5
}

const fn default_c_prime() -> f64 {
    0.5
}

const fn default_sigma_em() -> f64 {
    1.0
}

// ---------------------------------------------------------------------------
// Simulation output
// ---------------------------------------------------------------------------

/// Order statistics over the per-replication bootstrap means.
///
/// All quantiles use R-7 linear interpolation. `ci_lower`/`ci_upper` form a
/// 95% percentile interval over replication-level means, not over individual
/// resample values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SummaryStatistics {
    /// Smallest replication mean (quantile 0).
    pub min: f64,
    /// Largest replication mean (quantile 1).
    pub max: f64,
    /// Quantile 0.5.
    pub median: f64,
    /// Quantile 0.25.
    pub p25: f64,
    /// Quantile 0.75.
    pub p75: f64,
    /// Quantile 0.025.
    pub ci_lower: f64,
    /// Quantile 0.975.
    pub ci_upper: f64,
}

impl SummaryStatistics {
    /// Whether the 95% interval contains zero.
    pub fn brackets_zero(&self) -> bool {
        self.ci_lower <= 0.0 && 0.0 <= self.ci_upper
    }

    /// Interquartile range (`p75 - p25`).
    pub fn iqr(&self) -> f64 {
        self.p75 - self.p25
    }
}

/// The immutable output of one orchestrator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SimulationResult {
    /// Identifier of the run that produced this result.
    pub run_id: RunId,
    /// The configuration the run was started with.
    pub config: SimulationConfig,
    /// One bootstrap mean per replication. Length equals
    /// `config.replications`.
    pub boot_means: Vec<f64>,
    /// Summary over the finite entries of `boot_means`.
    pub summary: SummaryStatistics,
    /// Replications whose bootstrap mean was not finite.
    pub degenerate_replications: u32,
    /// Wall-clock time the run started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock time the summary was computed.
    pub finished_at: DateTime<Utc>,
}

/// Progress notification emitted after each completed chunk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ProgressUpdate {
    /// Identifier of the run.
    pub run_id: RunId,
    /// Chunks finished so far (1-based at the first notification).
    pub completed_chunks: u32,
    /// Total chunks in the run.
    pub total_chunks: u32,
    /// Replications finished so far.
    pub completed_replications: u32,
    /// `completed_chunks / total_chunks * 100`. Exactly 100 on the last chunk.
    pub percent: f64,
}

// ---------------------------------------------------------------------------
// Consumer-side helpers
// ---------------------------------------------------------------------------

/// One bar of the distribution histogram over replication means.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub range_start: f64,
    /// Upper edge (inclusive for the last bin).
    pub range_end: f64,
    /// Bin midpoint.
    pub mid: f64,
    /// Number of means falling in the bin.
    pub count: u32,
}

/// A named set of structural path values.
///
/// Presets only carry the model coefficients; sample size and replication
/// counts are left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ScenarioPreset {
    /// Short identifier (`s1`..`s6`, `u1`, `u2`).
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line parameter summary.
    pub description: &'static str,
    /// Plausible or unrealistic parameter regime.
    pub kind: ScenarioKind,
    /// Path X -> M.
    pub a: f64,
    /// Direct path X -> Y.
    pub c_prime: f64,
    /// Path M -> Y.
    pub b: f64,
    /// Mediator error SD.
    pub sigma_em: f64,
}

impl ScenarioPreset {
    /// Return `config` with this preset's path coefficients applied.
    ///
    /// Sample size, replication, and bootstrap counts are kept.
    #[must_use]
    pub const fn apply_to(&self, config: SimulationConfig) -> SimulationConfig {
        SimulationConfig {
            a: self.a,
            c_prime: self.c_prime,
            b: self.b,
            sigma_em: self.sigma_em,
            ..config
        }
    }

    /// Whether `config` carries exactly this preset's coefficients.
    #[allow(clippy::float_cmp)]
    pub fn matches(&self, config: &SimulationConfig) -> bool {
        config.a == self.a
            && config.c_prime == self.c_prime
            && config.b == self.b
            && config.sigma_em == self.sigma_em
    }
}
