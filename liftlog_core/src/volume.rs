//! Window-wide volume totals per exercise and per body part.

use crate::{Analyzer, DateWindow, ExerciseVolumeMap, MuscleGroupVolumeMap, Result, WorkoutLog};
use std::collections::{BTreeMap, HashMap};

/// Resolves an exercise id to the body part it trains
pub trait BodyPartLookup {
    fn body_part(&self, exercise_id: &str) -> Option<&str>;
}

impl BodyPartLookup for HashMap<String, String> {
    fn body_part(&self, exercise_id: &str) -> Option<&str> {
        self.get(exercise_id).map(String::as_str)
    }
}

impl BodyPartLookup for BTreeMap<String, String> {
    fn body_part(&self, exercise_id: &str) -> Option<&str> {
        self.get(exercise_id).map(String::as_str)
    }
}

impl Analyzer<'_> {
    /// Total volume of each requested exercise over `window`, in one pass.
    ///
    /// Every requested id is present in the result, at 0.0 when it has no
    /// qualifying sets.
    pub fn exercise_volume<S: AsRef<str>>(
        &self,
        exercise_ids: &[S],
        window: &DateWindow,
    ) -> ExerciseVolumeMap {
        let mut totals = ExerciseVolumeMap(
            exercise_ids
                .iter()
                .map(|id| (id.as_ref().to_string(), 0.0))
                .collect(),
        );

        for (_, workout) in self.in_window(window) {
            for exercise in &workout.exercises {
                if let Some(total) = totals.0.get_mut(&exercise.exercise_id) {
                    *total += exercise.sets.iter().map(|s| s.volume()).sum::<f64>();
                }
            }
        }

        totals
    }

    /// Total volume per body part over `window`.
    ///
    /// Exercises the lookup cannot resolve are skipped.
    pub fn muscle_group_volume<L: BodyPartLookup + ?Sized>(
        &self,
        lookup: &L,
        window: &DateWindow,
    ) -> MuscleGroupVolumeMap {
        let mut totals = MuscleGroupVolumeMap::default();
        let mut unresolved = 0usize;

        for (_, workout) in self.in_window(window) {
            for exercise in &workout.exercises {
                let mut sets = exercise.sets.iter().filter(|s| s.is_qualifying()).peekable();
                if sets.peek().is_none() {
                    continue;
                }
                match lookup.body_part(&exercise.exercise_id) {
                    Some(body_part) => totals.add(body_part, sets.map(|s| s.volume()).sum()),
                    None => unresolved += 1,
                }
            }
        }

        if unresolved > 0 {
            tracing::debug!(
                "Skipped {} exercise entries without a body part",
                unresolved
            );
        }
        totals
    }
}

/// Exercise volume over validated workouts
pub fn exercise_volume<S: AsRef<str>>(
    workouts: &[WorkoutLog],
    exercise_ids: &[S],
    window: &DateWindow,
) -> Result<ExerciseVolumeMap> {
    Ok(Analyzer::new(workouts)?.exercise_volume(exercise_ids, window))
}

/// Muscle-group volume over validated workouts
pub fn muscle_group_volume<L: BodyPartLookup + ?Sized>(
    workouts: &[WorkoutLog],
    lookup: &L,
    window: &DateWindow,
) -> Result<MuscleGroupVolumeMap> {
    Ok(Analyzer::new(workouts)?.muscle_group_volume(lookup, window))
}
