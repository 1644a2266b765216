//! Per-workout strength series: estimated 1RM trend and top-set progression.

use crate::{
    Analyzer, Estimated1RmPoint, Result, SetEntry, TopSet, TopSetPoint, WorkoutLog,
};
use std::cmp::Ordering;

impl Analyzer<'_> {
    /// Best estimated 1RM of `exercise_id` for every workout with at least one
    /// qualifying set, ordered by date.
    ///
    /// Workouts sharing a date stay separate points in input order. A workout
    /// whose sets all have zero reps yields no point at all.
    pub fn estimated_1rm_series(&self, exercise_id: &str) -> Vec<Estimated1RmPoint> {
        let mut points: Vec<Estimated1RmPoint> = self
            .workouts
            .iter()
            .filter_map(|w| {
                self.formula
                    .best_estimate(w.sets_for(exercise_id))
                    .map(|estimated_1rm| Estimated1RmPoint {
                        date: w.date,
                        estimated_1rm,
                    })
            })
            .collect();

        points.sort_by_key(|p| p.date);

        tracing::debug!(
            "Built {} estimated 1RM points for {}",
            points.len(),
            exercise_id
        );
        points
    }

    /// Heaviest qualifying set of `exercise_id` per workout, ordered by date.
    pub fn top_set_series(&self, exercise_id: &str) -> Vec<TopSetPoint> {
        let mut points: Vec<TopSetPoint> = self
            .workouts
            .iter()
            .filter_map(|w| {
                top_set(w, exercise_id).map(|set| TopSetPoint {
                    exercise_id: exercise_id.to_string(),
                    date: w.date,
                    set,
                })
            })
            .collect();

        points.sort_by_key(|p| p.date);
        points
    }
}

/// Heaviest qualifying set of one workout; ties on weight go to more reps.
pub fn top_set(workout: &WorkoutLog, exercise_id: &str) -> Option<TopSet> {
    workout
        .qualifying_sets_for(exercise_id)
        .max_by(|a, b| compare_top_sets(a, b))
        .map(|s| TopSet {
            weight: s.weight,
            reps: s.reps,
        })
}

fn compare_top_sets(a: &SetEntry, b: &SetEntry) -> Ordering {
    a.weight
        .total_cmp(&b.weight)
        .then_with(|| a.reps.cmp(&b.reps))
}

/// Estimated 1RM series over validated workouts with the default formula
pub fn estimated_1rm_series(
    workouts: &[WorkoutLog],
    exercise_id: &str,
) -> Result<Vec<Estimated1RmPoint>> {
    Ok(Analyzer::new(workouts)?.estimated_1rm_series(exercise_id))
}

/// Top-set series over validated workouts
pub fn top_set_series(workouts: &[WorkoutLog], exercise_id: &str) -> Result<Vec<TopSetPoint>> {
    Ok(Analyzer::new(workouts)?.top_set_series(exercise_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{approx_eq, day, entry, set, workout, workout_on};
    use crate::{AnalyticsOptions, OneRepMaxFormula};

    #[test]
    fn test_e1rm_takes_best_set_of_the_day() {
        let workouts = vec![workout_on(
            1,
            "squat",
            vec![set(100.0, 5, 2), set(110.0, 1, 0)],
        )];

        let series = estimated_1rm_series(&workouts, "squat").unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].date, day(1));
        assert!(approx_eq(series[0].estimated_1rm, 123.33, 0.01));
    }

    #[test]
    fn test_e1rm_sorted_by_date() {
        let workouts = vec![
            workout_on(9, "squat", vec![set(120.0, 3, 1)]),
            workout_on(2, "squat", vec![set(100.0, 5, 1)]),
            workout_on(5, "squat", vec![set(110.0, 4, 1)]),
        ];

        let series = estimated_1rm_series(&workouts, "squat").unwrap();
        let dates: Vec<_> = series.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(2), day(5), day(9)]);
    }

    #[test]
    fn test_e1rm_skips_workouts_without_completed_reps() {
        let workouts = vec![
            workout_on(1, "squat", vec![set(100.0, 0, 0)]),
            workout_on(2, "bench", vec![set(80.0, 5, 0)]),
            workout_on(3, "squat", vec![set(100.0, 5, 0)]),
        ];

        let series = estimated_1rm_series(&workouts, "squat").unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].date, day(3));
    }

    #[test]
    fn test_e1rm_same_day_workouts_stay_distinct() {
        let workouts = vec![
            workout_on(4, "squat", vec![set(100.0, 5, 0)]),
            workout_on(4, "squat", vec![set(60.0, 10, 0)]),
        ];

        let series = estimated_1rm_series(&workouts, "squat").unwrap();
        assert_eq!(series.len(), 2);
        assert!(series.iter().all(|p| p.date == day(4)));
    }

    #[test]
    fn test_e1rm_bodyweight_sets_yield_points() {
        let workouts = vec![workout_on(1, "pullup", vec![set(0.0, 10, 2)])];

        let series = estimated_1rm_series(&workouts, "pullup").unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].estimated_1rm, 0.0);
    }

    #[test]
    fn test_e1rm_respects_formula_option() {
        let workouts = vec![workout_on(1, "squat", vec![set(100.0, 5, 0)])];
        let options = AnalyticsOptions {
            formula: OneRepMaxFormula::Brzycki,
            ..Default::default()
        };

        let analyzer = Analyzer::with_options(&workouts, options).unwrap();
        let series = analyzer.estimated_1rm_series("squat");
        assert!(approx_eq(series[0].estimated_1rm, 112.5, 0.01));
    }

    #[test]
    fn test_top_set_by_weight_not_estimate() {
        let workouts = vec![workout_on(
            1,
            "squat",
            vec![set(100.0, 5, 2), set(110.0, 1, 0)],
        )];

        let series = top_set_series(&workouts, "squat").unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].exercise_id, "squat");
        assert_eq!(
            series[0].set,
            TopSet {
                weight: 110.0,
                reps: 1
            }
        );
    }

    #[test]
    fn test_top_set_tie_breaks_on_reps() {
        let workouts = vec![workout_on(
            1,
            "bench",
            vec![set(100.0, 3, 0), set(100.0, 5, 0), set(100.0, 4, 0)],
        )];

        let series = top_set_series(&workouts, "bench").unwrap();
        assert_eq!(series[0].set.reps, 5);
    }

    #[test]
    fn test_top_set_ignores_zero_rep_attempts() {
        let workouts = vec![workout(
            1,
            vec![entry("deadlift", vec![set(200.0, 0, 0), set(180.0, 2, 0)])],
        )];

        let series = top_set_series(&workouts, "deadlift").unwrap();
        assert_eq!(series[0].set.weight, 180.0);
    }

    #[test]
    fn test_empty_input() {
        let workouts: Vec<WorkoutLog> = vec![];
        assert!(estimated_1rm_series(&workouts, "squat").unwrap().is_empty());
        assert!(top_set_series(&workouts, "squat").unwrap().is_empty());
    }

    #[test]
    fn test_series_idempotent() {
        let workouts = vec![
            workout_on(3, "squat", vec![set(100.0, 5, 1), set(105.0, 3, 0)]),
            workout_on(1, "squat", vec![set(95.0, 6, 2)]),
        ];

        let analyzer = Analyzer::new(&workouts).unwrap();
        assert_eq!(
            analyzer.estimated_1rm_series("squat"),
            analyzer.estimated_1rm_series("squat")
        );
        assert_eq!(
            analyzer.top_set_series("squat"),
            analyzer.top_set_series("squat")
        );
    }
}
