//! Error types for the liftlog_core library.

use chrono::NaiveDate;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for liftlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Exercise catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// A set violates the data model (e.g. negative or non-finite weight)
    #[error("Invalid set #{set_index} of '{exercise_id}' in workout {workout_id}: {reason}")]
    InvalidSet {
        workout_id: String,
        exercise_id: String,
        set_index: usize,
        reason: String,
    },

    /// Date window whose end precedes its start
    #[error("Invalid date window: end {end} is before start {start}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    /// A workout log line or import row could not be read
    #[error("Malformed input at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}
