//! Synthetic dataset generation from the structural mediation model.
//!
//! One [`Dataset`] is drawn per replication and dropped once that
//! replication's bootstrap loop finishes. Units are independent of each other
//! and of every other replication.

use r2med_types::SimulationConfig;
use rand::Rng;

use crate::normal::standard_normal;

/// One structural draw of the predictor, mediator, and outcome.
///
/// The three sequences always have equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Vec<f64>,
    m: Vec<f64>,
    y: Vec<f64>,
}

impl Dataset {
    /// Draw a dataset of `config.n` units.
    ///
    /// For each unit, in order: `x ~ N(0,1)`, `e_M ~ N(0,1)`,
    /// `m = a*x + sigma_em*e_M`, `e_Y ~ N(0,1)`, `y = c_prime*x + b*m + e_Y`.
    pub fn generate(config: &SimulationConfig, rng: &mut impl Rng) -> Self {
        let n = len_of(config.n);
        let mut x = Vec::with_capacity(n);
        let mut m = Vec::with_capacity(n);
        let mut y = Vec::with_capacity(n);

        for _ in 0..n {
            let x_val = standard_normal(rng);
            let m_val = config.a * x_val + config.sigma_em * standard_normal(rng);
            let y_val = config.c_prime * x_val + config.b * m_val + standard_normal(rng);
            x.push(x_val);
            m.push(m_val);
            y.push(y_val);
        }

        Self { x, m, y }
    }

    /// Build a dataset from existing columns.
    ///
    /// Returns `None` if the columns differ in length.
    pub fn from_columns(x: Vec<f64>, m: Vec<f64>, y: Vec<f64>) -> Option<Self> {
        if x.len() != m.len() || x.len() != y.len() {
            return None;
        }
        Some(Self { x, m, y })
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the dataset has no units.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Predictor column.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Mediator column.
    pub fn m(&self) -> &[f64] {
        &self.m
    }

    /// Outcome column.
    pub fn y(&self) -> &[f64] {
        &self.y
    }
}

/// Widen a `u32` count to `usize`.
pub(crate) fn len_of(count: u32) -> usize {
    usize::try_from(count).unwrap_or(usize::MAX)
}
