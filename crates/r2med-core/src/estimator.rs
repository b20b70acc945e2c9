//! Closed-form R²med effect size over pairwise correlations.
//!
//! ```text
//! R2(Y.XM) = (rYX^2 + rYM^2 - 2*rYX*rYM*rXM) / (1 - rXM^2)
//! R2med    = (rYX^2 + rYM^2) - R2(Y.XM)
//! ```
//!
//! Results are deliberately not clamped: negative values and values above 1
//! are sampling noise around a null effect and must survive into the
//! bootstrap means.

use crate::correlation::pearson;

/// Tolerance on `|rXM^2 - 1|` below which X and M are treated as collinear.
pub const COLLINEARITY_TOLERANCE: f64 = 1e-9;

/// R²med from the three pairwise correlations.
///
/// When `|r_xm^2 - 1| < 1e-9` the formula's denominator vanishes and the
/// function returns `r_yx^2` instead. That fallback is an approximation,
/// not the limiting value of the formula.
pub fn r2med(r_yx: f64, r_ym: f64, r_xm: f64) -> f64 {
    let r_yx2 = r_yx * r_yx;
    let r_ym2 = r_ym * r_ym;
    let r_xm2 = r_xm * r_xm;

    if (r_xm2 - 1.0).abs() < COLLINEARITY_TOLERANCE {
        return r_yx2;
    }

    let r2_y_xm = (r_yx2 + r_ym2 - 2.0 * r_yx * r_ym * r_xm) / (1.0 - r_xm2);
    (r_yx2 + r_ym2) - r2_y_xm
}

/// R²med of one (X, M, Y) triplet.
///
/// Correlations are taken as `rYX = corr(Y, X)`, `rYM = corr(Y, M)`,
/// `rXM = corr(X, M)`.
pub fn r2med_of(x: &[f64], m: &[f64], y: &[f64]) -> f64 {
    let r_yx = pearson(y, x);
    let r_ym = pearson(y, m);
    let r_xm = pearson(x, m);
    r2med(r_yx, r_ym, r_xm)
}
