//! Fixed-width histogram over replication means.
//!
//! This is a consumer-side view of a [`SimulationResult`]: bins are spaced
//! linearly between `summary.min` and `summary.max`, and the last bin is
//! closed so that the maximum is counted.
//!
//! [`SimulationResult`]: r2med_types::SimulationResult

use r2med_types::{HistogramBin, SummaryStatistics};

/// Number of bins used by the default report.
pub const DEFAULT_BIN_COUNT: u32 = 40;

/// Bin width used when every mean is identical.
const DEGENERATE_STEP: f64 = 0.01;

/// Bin `means` into `bin_count` equal-width bins between `summary.min` and
/// `summary.max`.
///
/// Values below `summary.min` or not finite are dropped. Values at or above
/// the upper edge land in the last bin. Returns an empty vector when
/// `bin_count` is zero.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn histogram(means: &[f64], summary: &SummaryStatistics, bin_count: u32) -> Vec<HistogramBin> {
    if bin_count == 0 {
        return Vec::new();
    }

    let range = summary.max - summary.min;
    let step = {
        let raw = range / f64::from(bin_count);
        if raw > 0.0 && raw.is_finite() { raw } else { DEGENERATE_STEP }
    };

    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| {
            let i = f64::from(i);
            HistogramBin {
                range_start: summary.min + i * step,
                range_end: summary.min + (i + 1.0) * step,
                mid: summary.min + (i + 0.5) * step,
                count: 0,
            }
        })
        .collect();

    let last = bins.len().saturating_sub(1);
    for &value in means {
        if !value.is_finite() {
            continue;
        }
        let offset = ((value - summary.min) / step).floor();
        if offset < 0.0 {
            continue;
        }
        let idx = (offset as usize).min(last);
        if let Some(bin) = bins.get_mut(idx) {
            bin.count = bin.count.saturating_add(1);
        }
    }

    bins
}
