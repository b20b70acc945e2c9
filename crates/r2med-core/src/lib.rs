//! Dataset generation, bootstrap resampling, and run orchestration for the
//! R2med simulation.
//!
//! Each replication draws one dataset from the structural mediation model,
//! bootstraps R²med on it, and contributes a single bootstrap mean. The
//! orchestrator runs many replications in chunks and summarizes the means.
//!
//! # Modules
//!
//! - [`normal`] -- Box-Muller standard-normal deviates.
//! - [`dataset`] -- Structural draw of one (X, M, Y) triplet.
//! - [`correlation`] -- Raw-moment Pearson correlation.
//! - [`estimator`] -- Closed-form R²med from pairwise correlations.
//! - [`bootstrap`] -- Resampling with replacement and the replication mean.
//! - [`summary`] -- R-7 quantiles and [`SummaryStatistics`].
//! - [`histogram`] -- Equal-width bins over replication means.
//! - [`presets`] -- Named scenario parameter sets.
//! - [`validation`] -- Fail-fast configuration checks.
//! - [`operator`] -- [`RunControl`] for cancellation and progress.
//! - [`runner`] -- The chunked orchestrator loop.
//! - [`config`] -- Configuration loading from `r2med-config.yaml`.
//!
//! [`SummaryStatistics`]: r2med_types::SummaryStatistics
//! [`RunControl`]: operator::RunControl

pub mod bootstrap;
pub mod config;
pub mod correlation;
pub mod dataset;
pub mod estimator;
pub mod histogram;
pub mod normal;
pub mod operator;
pub mod presets;
pub mod runner;
pub mod summary;
pub mod validation;
