//! Core domain types for workout logs and the analytics they feed.
//!
//! This module defines:
//! - The logged training data (workouts, exercise entries, sets)
//! - The derived series and aggregates returned by the analytics components
//!
//! All weights are kilograms. Nothing here converts units.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Logged Data
// ============================================================================

/// A single performed set
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetEntry {
    /// Load in kilograms; 0 is a bodyweight-only set
    pub weight: f64,
    pub reps: u32,
    /// Reps in reserve
    #[serde(default)]
    pub rir: u32,
}

impl SetEntry {
    pub fn new(weight: f64, reps: u32, rir: u32) -> Self {
        Self { weight, reps, rir }
    }

    /// A set with no completed reps says nothing about strength or volume.
    pub fn is_qualifying(&self) -> bool {
        self.reps > 0
    }

    /// Completed reps plus reps in reserve
    pub fn effective_reps(&self) -> u32 {
        self.reps.saturating_add(self.rir)
    }

    /// Training volume in kg (weight × reps)
    pub fn volume(&self) -> f64 {
        if self.is_qualifying() {
            self.weight * f64::from(self.reps)
        } else {
            0.0
        }
    }

    /// RPE derived as `10 - rir`, floored at 0
    pub fn rpe(&self) -> f64 {
        f64::from(10u32.saturating_sub(self.rir))
    }
}

/// One exercise performed within a workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseEntry {
    pub exercise_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub sets: Vec<SetEntry>,
}

/// A logged training session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutLog {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub validated: bool,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
}

impl WorkoutLog {
    /// All sets of `exercise_id` in this workout, across every entry that
    /// names it.
    pub fn sets_for<'a>(
        &'a self,
        exercise_id: &'a str,
    ) -> impl Iterator<Item = &'a SetEntry> + 'a {
        self.exercises
            .iter()
            .filter(move |e| e.exercise_id == exercise_id)
            .flat_map(|e| e.sets.iter())
    }

    /// Qualifying (`reps > 0`) sets of `exercise_id`
    pub fn qualifying_sets_for<'a>(
        &'a self,
        exercise_id: &'a str,
    ) -> impl Iterator<Item = &'a SetEntry> + 'a {
        self.sets_for(exercise_id).filter(|s| s.is_qualifying())
    }
}

// ============================================================================
// Derived Output Types
// ============================================================================

/// Best estimated one-rep max of a single workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Estimated1RmPoint {
    pub date: NaiveDate,
    pub estimated_1rm: f64,
}

/// Raw weight × reps pair of a top set
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct TopSet {
    pub weight: f64,
    pub reps: u32,
}

/// Heaviest qualifying set of a single workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TopSetPoint {
    pub exercise_id: String,
    pub date: NaiveDate,
    pub set: TopSet,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeeklyVolumePoint {
    pub exercise_id: String,
    pub week_index: u32,
    pub total_volume: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeeklyFrequencyPoint {
    pub exercise_id: String,
    pub week_index: u32,
    pub sessions: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeeklyRpePoint {
    pub exercise_id: String,
    pub week_index: u32,
    pub average_rpe: f64,
}

/// Count of qualifying sets per %1RM band
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntensityDistribution {
    pub below60: u32,
    pub between60and70: u32,
    pub between70and80: u32,
    pub between80and90: u32,
    pub above90: u32,
}

/// Total volume per exercise id. Absent ids read as zero.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ExerciseVolumeMap(pub BTreeMap<String, f64>);

/// Total volume per body part. Absent body parts read as zero.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct MuscleGroupVolumeMap(pub BTreeMap<String, f64>);

macro_rules! volume_map_impl {
    ($ty:ty) => {
        impl $ty {
            /// Volume for `key`, 0.0 when absent
            pub fn get(&self, key: &str) -> f64 {
                self.0.get(key).copied().unwrap_or(0.0)
            }

            pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
                self.0.iter().map(|(k, v)| (k.as_str(), *v))
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Sum over all keys
            pub fn total(&self) -> f64 {
                self.0.values().sum()
            }

            pub(crate) fn add(&mut self, key: &str, volume: f64) {
                match self.0.get_mut(key) {
                    Some(total) => *total += volume,
                    None => {
                        self.0.insert(key.to_string(), volume);
                    }
                }
            }
        }
    };
}

volume_map_impl!(ExerciseVolumeMap);
volume_map_impl!(MuscleGroupVolumeMap);
