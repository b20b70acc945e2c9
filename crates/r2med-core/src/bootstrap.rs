//! Nonparametric bootstrap of R²med within one replication.
//!
//! Each iteration draws `n` indices uniformly from `[0, n)` with
//! replacement, copies the selected units into a [`BootstrapScratch`], and
//! evaluates R²med on the copy. Only the mean over all iterations leaves this
//! module; individual resample values are discarded.

use rand::Rng;

use crate::dataset::Dataset;
use crate::estimator::r2med_of;

/// Reusable resample buffers.
///
/// One scratch is allocated per run and reused across replications and
/// bootstrap iterations. [`resample`](Self::resample) clears and refills
/// every column, so nothing from a previous iteration is ever read.
#[derive(Debug, Clone, Default)]
pub struct BootstrapScratch {
    x: Vec<f64>,
    m: Vec<f64>,
    y: Vec<f64>,
}

impl BootstrapScratch {
    /// Create scratch buffers with room for `n` units.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            x: Vec::with_capacity(n),
            m: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
        }
    }

    /// Overwrite the buffers with one resample-with-replacement of `data`.
    pub fn resample(&mut self, data: &Dataset, rng: &mut impl Rng) {
        self.x.clear();
        self.m.clear();
        self.y.clear();

        let n = data.len();
        if n == 0 {
            return;
        }

        for _ in 0..n {
            let idx = rng.random_range(0..n);
            // idx < n, so every column has an entry at idx.
            if let (Some(&x), Some(&m), Some(&y)) =
                (data.x().get(idx), data.m().get(idx), data.y().get(idx))
            {
                self.x.push(x);
                self.m.push(m);
                self.y.push(y);
            }
        }
    }

    /// R²med of the current resample.
    pub fn r2med(&self) -> f64 {
        r2med_of(&self.x, &self.m, &self.y)
    }

    /// Number of units in the current resample.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the scratch holds no resample.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Predictor column of the current resample.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Mediator column of the current resample.
    pub fn m(&self) -> &[f64] {
        &self.m
    }

    /// Outcome column of the current resample.
    pub fn y(&self) -> &[f64] {
        &self.y
    }
}

/// Mean R²med over `samples` bootstrap resamples of `data`.
///
/// `samples` must be positive; the orchestrator validates this before any
/// replication starts. With `samples == 1` the result is exactly the single
/// resample's R²med.
pub fn bootstrap_mean(
    data: &Dataset,
    samples: u32,
    rng: &mut impl Rng,
    scratch: &mut BootstrapScratch,
) -> f64 {
    let mut sum = 0.0;
    for _ in 0..samples {
        scratch.resample(data, rng);
        sum += scratch.r2med();
    }
    sum / f64::from(samples)
}
