//! Quantiles and the summary record over replication-level bootstrap means.
//!
//! # Algorithms
//!
//! - **Quantile**: R-7 linear interpolation between order statistics
//!   (the default in R, NumPy, and Excel).
//!   Reference: Hyndman & Fan (1996), "Sample Quantiles in Statistical
//!   Packages", *The American Statistician* 50(4).
//!
//! The 95% interval reported in [`SummaryStatistics`] is a percentile
//! interval over per-replication means. It is a two-level construction
//! (bootstrap of bootstrap means), not a percentile interval over individual
//! resamples.

use r2med_types::SummaryStatistics;

/// Errors from summary computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SummaryError {
    /// No values were supplied.
    #[error("cannot summarize an empty collection of means")]
    Empty,
}

/// Computes the `q`-th quantile (R-7) of `data`.
///
/// Sorts a copy ascending; `data` is not modified. Sorting uses
/// [`f64::total_cmp`], so a `NaN` never panics (positive `NaN` sorts last).
///
/// # Returns
/// - `None` if `data` is empty or `q` is not in `[0, 1]` (including `NaN`).
pub fn quantile(data: &[f64], q: f64) -> Option<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    quantile_sorted(&sorted, q)
}

/// Computes the `q`-th quantile (R-7) on **pre-sorted** data.
///
/// `pos = (len - 1) * q`, `base = floor(pos)`, `frac = pos - base`. The
/// result is `sorted[base]` when `base + 1` is out of range, otherwise
/// `sorted[base] + frac * (sorted[base + 1] - sorted[base])`.
///
/// # Returns
/// - `None` if `sorted_data` is empty or `q` is not in `[0, 1]` (including
///   `NaN`).
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn quantile_sorted(sorted_data: &[f64], q: f64) -> Option<f64> {
    if !(0.0..=1.0).contains(&q) {
        return None;
    }
    let last = sorted_data.len().checked_sub(1)?;
    let pos = last as f64 * q;
    let base = pos.floor();
    let frac = pos - base;
    let base = base as usize;

    let lower = *sorted_data.get(base)?;
    match sorted_data.get(base.saturating_add(1)) {
        Some(&upper) => Some(lower + frac * (upper - lower)),
        None => Some(lower),
    }
}

/// Build the summary record over replication means.
///
/// Sorts once and reads every quantile from the sorted copy.
///
/// # Errors
///
/// Returns [`SummaryError::Empty`] if `means` is empty.
pub fn summarize(means: &[f64]) -> Result<SummaryStatistics, SummaryError> {
    let mut sorted = means.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    let q = |p: f64| quantile_sorted(&sorted, p).ok_or(SummaryError::Empty);

    Ok(SummaryStatistics {
        min: q(0.0)?,
        max: q(1.0)?,
        median: q(0.5)?,
        p25: q(0.25)?,
        p75: q(0.75)?,
        ci_lower: q(0.025)?,
        ci_upper: q(0.975)?,
    })
}
