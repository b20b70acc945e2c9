//! JSON report written to stdout at the end of a run.

use r2med_core::histogram::{DEFAULT_BIN_COUNT, histogram};
use r2med_core::presets::matching_preset;
use r2med_types::{HistogramBin, SimulationResult};
use serde::Serialize;

/// Everything a presentation layer needs to render one run.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// Id of the preset the config matches, if any.
    pub preset: Option<&'static str>,
    /// Seed used for the run, if it was seeded.
    pub seed: Option<u64>,
    /// Whether the 95% interval contains zero.
    pub brackets_zero: bool,
    /// The full simulation result.
    pub result: &'a SimulationResult,
    /// Histogram over the replication means.
    pub histogram: Vec<HistogramBin>,
}

impl<'a> Report<'a> {
    /// Assemble the report for `result`.
    pub fn new(result: &'a SimulationResult, seed: Option<u64>) -> Self {
        Self {
            preset: matching_preset(&result.config).map(|p| p.id),
            seed,
            brackets_zero: result.summary.brackets_zero(),
            result,
            histogram: histogram(&result.boot_means, &result.summary, DEFAULT_BIN_COUNT),
        }
    }
}
