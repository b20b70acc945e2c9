//! Shared type definitions for the R2med bootstrap simulation.
//!
//! This crate is the single source of truth for the data model used across
//! the workspace. Types defined here flow downstream to `TypeScript` via
//! `ts-rs` for the presentation layer that renders forms and histograms.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for run identifiers
//! - [`enums`] -- Run lifecycle and scenario classification
//! - [`structs`] -- Simulation input, output, progress, and histogram records

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{RunStatus, ScenarioKind};
pub use ids::RunId;
pub use structs::{
    HistogramBin, ProgressUpdate, ScenarioPreset, SimulationConfig, SimulationResult,
    SummaryStatistics,
};
