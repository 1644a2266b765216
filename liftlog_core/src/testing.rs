//! Fixture builders shared by the unit tests.

use crate::{DateWindow, ExerciseEntry, SetEntry, WorkoutLog};
use chrono::{Duration, NaiveDate};

/// 2024-01-01 plus `offset` days
pub fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset)
}

/// Window from day 0 to day `last`
pub fn window_to(last: i64) -> DateWindow {
    DateWindow::new(day(0), day(last)).unwrap()
}

pub fn set(weight: f64, reps: u32, rir: u32) -> SetEntry {
    SetEntry::new(weight, reps, rir)
}

pub fn entry(exercise_id: &str, sets: Vec<SetEntry>) -> ExerciseEntry {
    ExerciseEntry {
        exercise_id: exercise_id.into(),
        name: exercise_id.into(),
        order: 0,
        sets,
    }
}

/// Validated workout on `day(offset)`
pub fn workout(offset: i64, exercises: Vec<ExerciseEntry>) -> WorkoutLog {
    WorkoutLog {
        id: format!("w{}", offset),
        date: day(offset),
        validated: true,
        notes: String::new(),
        exercises,
    }
}

/// Validated workout with a single exercise
pub fn workout_on(offset: i64, exercise_id: &str, sets: Vec<SetEntry>) -> WorkoutLog {
    workout(offset, vec![entry(exercise_id, sets)])
}

pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}
