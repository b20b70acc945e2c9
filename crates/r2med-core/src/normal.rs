//! Standard-normal variate source.
//!
//! Deviates come from the Box-Muller transform over two independent uniforms
//! on the open interval (0, 1). The generator is injected by the caller, so a
//! seeded [`rand::rngs::SmallRng`] makes every downstream draw reproducible.

use std::f64::consts::TAU;

use rand::Rng;

/// Draw one standard-normal deviate.
///
/// Uses the cosine branch of Box-Muller: `sqrt(-2 ln u) * cos(2 pi v)`.
/// A uniform draw of exactly zero is rejected and redrawn so that `ln(0)`
/// never occurs.
pub fn standard_normal(rng: &mut impl Rng) -> f64 {
    let u = open_unit(rng);
    let v = open_unit(rng);
    (-2.0 * u.ln()).sqrt() * (TAU * v).cos()
}

/// Uniform draw on (0, 1).
fn open_unit(rng: &mut impl Rng) -> f64 {
    loop {
        let u: f64 = rng.random();
        if u > 0.0 {
            return u;
        }
    }
}
