//! Pearson correlation over raw moments.

/// Pearson correlation between two equal-length sequences.
///
/// Computed in a single pass with the raw-moment formula
///
/// ```text
/// r = (n*SAB - SA*SB) / sqrt((n*SAA - SA^2) * (n*SBB - SB^2))
/// ```
///
/// If either denominator factor is exactly zero (a constant sequence) the
/// result is `0.0`, not `NaN`. Only the first `min(a.len(), b.len())` pairs
/// are used.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let mut count: u32 = 0;
    let mut sum_a = 0.0;
    let mut sum_b = 0.0;
    let mut sum_a2 = 0.0;
    let mut sum_b2 = 0.0;
    let mut sum_ab = 0.0;

    for (&va, &vb) in a.iter().zip(b) {
        count = count.saturating_add(1);
        sum_a += va;
        sum_b += vb;
        sum_a2 += va * va;
        sum_b2 += vb * vb;
        sum_ab += va * vb;
    }

    let n = f64::from(count);
    let numerator = n * sum_ab - sum_a * sum_b;
    let den_a = n * sum_a2 - sum_a * sum_a;
    let den_b = n * sum_b2 - sum_b * sum_b;

    if den_a == 0.0 || den_b == 0.0 {
        return 0.0;
    }
    numerator / (den_a * den_b).sqrt()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn affine_transform_is_perfectly_correlated() {
        let a = [1.0, 4.0, 2.5, -3.0, 0.0, 7.25];
        let b: Vec<f64> = a.iter().map(|v| 2.0 * v + 3.0).collect();
        assert!((pearson(&a, &b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn negated_sequence_is_minus_one() {
        let a = [0.3, 1.1, -0.7, 2.2];
        let b: Vec<f64> = a.iter().map(|v| -v).collect();
        assert!((pearson(&a, &b) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn constant_sequence_yields_exact_zero() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let constant = [5.0; 4];
        let r = pearson(&a, &constant);
        assert_eq!(r, 0.0);
        assert!(!r.is_nan());
        assert_eq!(pearson(&constant, &a), 0.0);
    }

    #[test]
    fn symmetric_in_arguments() {
        let a = [0.1, 0.9, 0.4, 0.6, 0.2];
        let b = [1.0, 0.2, 0.8, 0.3, 0.5];
        assert!((pearson(&a, &b) - pearson(&b, &a)).abs() < 1e-12);
    }

    #[test]
    fn known_value() {
        // Hand-computed: r = 0.8 for these points.
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [2.0, 1.0, 4.0, 3.0, 5.0];
        assert!((pearson(&a, &b) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(pearson(&[], &[]), 0.0);
    }
}
