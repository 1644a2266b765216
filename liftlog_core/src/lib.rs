#![forbid(unsafe_code)]

//! Core domain model and strength analytics for liftlog.
//!
//! This crate provides:
//! - Workout log types (workouts, exercise entries, sets)
//! - Strength analytics: estimated 1RM and top-set series, weekly
//!   volume/frequency/RPE, intensity distribution, volume per exercise and
//!   per body part
//! - Exercise catalog
//! - Persistence (JSONL workout log, CSV import) and configuration
//!
//! Every analytics computation is a pure, read-only projection of the
//! workouts it is given. Weights are kilograms throughout.

pub mod types;
pub mod error;
pub mod window;
pub mod estimate;
pub mod analyzer;
pub mod series;
pub mod weekly;
pub mod intensity;
pub mod volume;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod store;
pub mod import;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use window::DateWindow;
pub use estimate::OneRepMaxFormula;
pub use analyzer::{AnalyticsOptions, Analyzer};
pub use series::{estimated_1rm_series, top_set_series};
pub use weekly::{densify, weekly_frequency, weekly_rpe, weekly_volume, DenseWeek, WeeklyPoint};
pub use intensity::{intensity_distribution, IntensityBand};
pub use volume::{exercise_volume, muscle_group_volume, BodyPartLookup};
pub use catalog::{build_default_catalog, get_default_catalog, ExerciseCatalog};
pub use config::{Config, DisplayUnit};
pub use store::{read_workouts, JsonlStore, WorkoutSink};
pub use import::import_csv;
