//! Validated entry point for the analytics components.
//!
//! An [`Analyzer`] borrows a snapshot of workout logs, selects the ones the
//! options admit, and checks every selected set once. The component methods
//! (`estimated_1rm_series`, `weekly_volume`, ...) live next to their
//! computations in sibling modules and never fail.

use crate::{Error, OneRepMaxFormula, Result, WorkoutLog};
use serde::{Deserialize, Serialize};

/// Per-call analytics options
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyticsOptions {
    #[serde(default)]
    pub formula: OneRepMaxFormula,

    /// Include workouts not yet marked as validated
    #[serde(default)]
    pub include_unvalidated: bool,
}

/// Read-only view over a validated set of workout logs
#[derive(Clone, Debug)]
pub struct Analyzer<'a> {
    pub(crate) workouts: Vec<&'a WorkoutLog>,
    pub(crate) formula: OneRepMaxFormula,
}

impl<'a> Analyzer<'a> {
    /// Analyzer over validated workouts, using the Epley formula
    pub fn new(workouts: &'a [WorkoutLog]) -> Result<Self> {
        Self::with_options(workouts, AnalyticsOptions::default())
    }

    pub fn with_options(workouts: &'a [WorkoutLog], options: AnalyticsOptions) -> Result<Self> {
        let selected: Vec<&WorkoutLog> = workouts
            .iter()
            .filter(|w| options.include_unvalidated || w.validated)
            .collect();

        for workout in &selected {
            validate_workout(workout)?;
        }

        tracing::debug!(
            "Analyzing {} of {} workouts (formula: {})",
            selected.len(),
            workouts.len(),
            options.formula
        );

        Ok(Self {
            workouts: selected,
            formula: options.formula,
        })
    }

    /// Workouts admitted by the options
    pub fn workouts(&self) -> &[&'a WorkoutLog] {
        &self.workouts
    }

    pub fn formula(&self) -> OneRepMaxFormula {
        self.formula
    }
}

/// Check a workout against the data model.
///
/// Counts are unsigned and cannot be negative, so only the weight needs
/// checking: it must be finite and non-negative.
pub fn validate_workout(workout: &WorkoutLog) -> Result<()> {
    for exercise in &workout.exercises {
        for (set_index, set) in exercise.sets.iter().enumerate() {
            let reason = if !set.weight.is_finite() {
                Some(format!("weight {} is not a finite number", set.weight))
            } else if set.weight < 0.0 {
                Some(format!("weight {} is negative", set.weight))
            } else {
                None
            };

            if let Some(reason) = reason {
                tracing::warn!(
                    "Rejecting workout {}: set {} of {}: {}",
                    workout.id,
                    set_index,
                    exercise.exercise_id,
                    reason
                );
                return Err(Error::InvalidSet {
                    workout_id: workout.id.clone(),
                    exercise_id: exercise.exercise_id.clone(),
                    set_index,
                    reason,
                });
            }
        }
    }
    Ok(())
}
