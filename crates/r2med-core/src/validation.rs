//! Fail-fast validation of [`SimulationConfig`].
//!
//! Runs before any random draw. A zero count would otherwise divide by zero
//! in the bootstrap mean or silently produce an empty result, and a
//! non-positive `sigma_em` collapses M onto a deterministic function of X.

use r2med_types::SimulationConfig;

/// Errors raised by configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A field violates its domain.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Check every invariant of `config`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidConfiguration`] naming the first field
/// found to be invalid: `n`, `replications`, or `bootstrap_samples` equal to
/// zero; `sigma_em` non-positive or not finite; or a path coefficient that is
/// not finite.
pub fn validate(config: &SimulationConfig) -> Result<(), ValidationError> {
    positive_count("n", config.n)?;
    positive_count("replications", config.replications)?;
    positive_count("bootstrap_samples", config.bootstrap_samples)?;

    finite("a", config.a)?;
    finite("c_prime", config.c_prime)?;
    finite("b", config.b)?;
    finite("sigma_em", config.sigma_em)?;

    if config.sigma_em <= 0.0 {
        return Err(ValidationError::InvalidConfiguration {
            field: "sigma_em",
            reason: format!("must be positive, got {}", config.sigma_em),
        });
    }

    Ok(())
}

fn positive_count(field: &'static str, value: u32) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::InvalidConfiguration {
            field,
            reason: "must be at least 1".to_owned(),
        });
    }
    Ok(())
}

fn finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidConfiguration {
            field,
            reason: format!("must be finite, got {value}"),
        });
    }
    Ok(())
}
