//! Weekly aggregation: volume, session frequency and average RPE.
//!
//! Week `n` covers days `[start + 7n, start + 7n + 6]` of the window. Output
//! is sparse and ordered by week index: weeks without a contributing set are
//! omitted. [`densify`] fills the gaps for callers drawing continuous charts.

use crate::{
    Analyzer, DateWindow, Result, WeeklyFrequencyPoint, WeeklyRpePoint, WeeklyVolumePoint,
    WorkoutLog,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Running RPE sum; divided once when the bucket is closed
#[derive(Default)]
struct RpeAccumulator {
    sum: f64,
    count: u32,
}

impl Analyzer<'_> {
    /// Total `weight × reps` of `exercise_id` per week
    pub fn weekly_volume(&self, exercise_id: &str, window: &DateWindow) -> Vec<WeeklyVolumePoint> {
        let mut buckets: BTreeMap<u32, f64> = BTreeMap::new();

        for (week, workout) in self.in_window(window) {
            let mut sets = workout.qualifying_sets_for(exercise_id).peekable();
            if sets.peek().is_none() {
                continue;
            }
            let volume: f64 = sets.map(|s| s.volume()).sum();
            *buckets.entry(week).or_insert(0.0) += volume;
        }

        buckets
            .into_iter()
            .map(|(week_index, total_volume)| WeeklyVolumePoint {
                exercise_id: exercise_id.to_string(),
                week_index,
                total_volume,
            })
            .collect()
    }

    /// Number of workouts per week with at least one qualifying set of
    /// `exercise_id`
    pub fn weekly_frequency(
        &self,
        exercise_id: &str,
        window: &DateWindow,
    ) -> Vec<WeeklyFrequencyPoint> {
        let mut buckets: BTreeMap<u32, u32> = BTreeMap::new();

        for (week, workout) in self.in_window(window) {
            if workout.qualifying_sets_for(exercise_id).next().is_some() {
                *buckets.entry(week).or_insert(0) += 1;
            }
        }

        buckets
            .into_iter()
            .map(|(week_index, sessions)| WeeklyFrequencyPoint {
                exercise_id: exercise_id.to_string(),
                week_index,
                sessions,
            })
            .collect()
    }

    /// Mean per-set RPE (`10 - rir`) of `exercise_id` per week
    pub fn weekly_rpe(&self, exercise_id: &str, window: &DateWindow) -> Vec<WeeklyRpePoint> {
        let mut buckets: BTreeMap<u32, RpeAccumulator> = BTreeMap::new();

        for (week, workout) in self.in_window(window) {
            for set in workout.qualifying_sets_for(exercise_id) {
                let acc = buckets.entry(week).or_default();
                acc.sum += set.rpe();
                acc.count += 1;
            }
        }

        buckets
            .into_iter()
            .map(|(week_index, acc)| WeeklyRpePoint {
                exercise_id: exercise_id.to_string(),
                week_index,
                average_rpe: acc.sum / f64::from(acc.count),
            })
            .collect()
    }

    /// Workouts inside `window` paired with their week index
    pub(crate) fn in_window<'s>(
        &'s self,
        window: &'s DateWindow,
    ) -> impl Iterator<Item = (u32, &'s WorkoutLog)> + 's {
        self.workouts
            .iter()
            .filter_map(move |w| window.week_index(w.date).map(|week| (week, *w)))
    }
}

/// Weekly point that can be plotted on a continuous axis
pub trait WeeklyPoint {
    fn week_index(&self) -> u32;
    fn value(&self) -> f64;
}

impl WeeklyPoint for WeeklyVolumePoint {
    fn week_index(&self) -> u32 {
        self.week_index
    }

    fn value(&self) -> f64 {
        self.total_volume
    }
}

impl WeeklyPoint for WeeklyFrequencyPoint {
    fn week_index(&self) -> u32 {
        self.week_index
    }

    fn value(&self) -> f64 {
        f64::from(self.sessions)
    }
}

impl WeeklyPoint for WeeklyRpePoint {
    fn week_index(&self) -> u32 {
        self.week_index
    }

    fn value(&self) -> f64 {
        self.average_rpe
    }
}

/// One week of a densified series
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DenseWeek {
    pub week_index: u32,
    pub week_start: NaiveDate,
    pub value: f64,
}

/// Expand a sparse weekly series to every week from 0 through the highest
/// observed index, filling gaps with zero.
pub fn densify<P: WeeklyPoint>(points: &[P], window: &DateWindow) -> Vec<DenseWeek> {
    let Some(max_week) = points.iter().map(|p| p.week_index()).max() else {
        return Vec::new();
    };

    let observed: BTreeMap<u32, f64> = points.iter().map(|p| (p.week_index(), p.value())).collect();

    (0..=max_week)
        .map(|week_index| DenseWeek {
            week_index,
            week_start: window.week_start(week_index),
            value: observed.get(&week_index).copied().unwrap_or(0.0),
        })
        .collect()
}

/// Weekly volume over validated workouts
pub fn weekly_volume(
    workouts: &[WorkoutLog],
    exercise_id: &str,
    window: &DateWindow,
) -> Result<Vec<WeeklyVolumePoint>> {
    Ok(Analyzer::new(workouts)?.weekly_volume(exercise_id, window))
}

/// Weekly session frequency over validated workouts
pub fn weekly_frequency(
    workouts: &[WorkoutLog],
    exercise_id: &str,
    window: &DateWindow,
) -> Result<Vec<WeeklyFrequencyPoint>> {
    Ok(Analyzer::new(workouts)?.weekly_frequency(exercise_id, window))
}

/// Weekly average RPE over validated workouts
pub fn weekly_rpe(
    workouts: &[WorkoutLog],
    exercise_id: &str,
    window: &DateWindow,
) -> Result<Vec<WeeklyRpePoint>> {
    Ok(Analyzer::new(workouts)?.weekly_rpe(exercise_id, window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{approx_eq, day, entry, set, window_to, workout, workout_on};

    #[test]
    fn test_frequency_counts_workouts_per_week() {
        let workouts = vec![
            workout_on(0, "squat", vec![set(100.0, 5, 0), set(100.0, 5, 0)]),
            workout_on(3, "squat", vec![set(100.0, 5, 0)]),
            workout_on(9, "squat", vec![set(100.0, 5, 0)]),
        ];

        let points = weekly_frequency(&workouts, "squat", &window_to(13)).unwrap();
        let pairs: Vec<(u32, u32)> = points.iter().map(|p| (p.week_index, p.sessions)).collect();
        assert_eq!(pairs, vec![(0, 2), (1, 1)]);
    }

    #[test]
    fn test_frequency_counts_repeated_entries_once() {
        let workouts = vec![workout(
            2,
            vec![
                entry("squat", vec![set(100.0, 5, 0)]),
                entry("squat", vec![set(80.0, 8, 0)]),
            ],
        )];

        let points = weekly_frequency(&workouts, "squat", &window_to(6)).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].sessions, 1);
    }

    #[test]
    fn test_volume_accumulates_within_week() {
        let workouts = vec![
            workout_on(1, "bench", vec![set(80.0, 5, 0), set(80.0, 5, 0)]),
            workout_on(4, "bench", vec![set(85.0, 3, 0)]),
            workout_on(8, "bench", vec![set(60.0, 10, 0), set(100.0, 0, 0)]),
        ];

        let points = weekly_volume(&workouts, "bench", &window_to(13)).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].week_index, 0);
        assert!(approx_eq(points[0].total_volume, 1055.0, 1e-9));
        assert_eq!(points[1].week_index, 1);
        assert!(approx_eq(points[1].total_volume, 600.0, 1e-9));
    }

    #[test]
    fn test_volume_omits_empty_weeks() {
        let workouts = vec![
            workout_on(0, "squat", vec![set(100.0, 5, 0)]),
            workout_on(22, "squat", vec![set(100.0, 5, 0)]),
            workout_on(10, "squat", vec![set(100.0, 0, 0)]),
        ];

        let points = weekly_volume(&workouts, "squat", &window_to(27)).unwrap();
        let weeks: Vec<u32> = points.iter().map(|p| p.week_index).collect();
        assert_eq!(weeks, vec![0, 3]);
    }

    #[test]
    fn test_window_is_inclusive_and_clamped() {
        let workouts = vec![
            workout_on(0, "squat", vec![set(100.0, 5, 0)]),
            workout_on(6, "squat", vec![set(100.0, 5, 0)]),
            workout_on(7, "squat", vec![set(100.0, 5, 0)]),
        ];
        let window = DateWindow::new(day(1), day(6)).unwrap();

        let points = weekly_frequency(&workouts, "squat", &window).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].week_index, 0);
        assert_eq!(points[0].sessions, 1);
    }

    #[test]
    fn test_inverted_window_yields_nothing() {
        let workouts = vec![workout_on(5, "squat", vec![set(100.0, 5, 0)])];
        let window = DateWindow {
            start: day(10),
            end: day(0),
        };

        assert!(weekly_volume(&workouts, "squat", &window).unwrap().is_empty());
        assert!(weekly_frequency(&workouts, "squat", &window).unwrap().is_empty());
        assert!(weekly_rpe(&workouts, "squat", &window).unwrap().is_empty());
    }

    #[test]
    fn test_rpe_averages_all_sets_of_the_week() {
        let workouts = vec![
            workout_on(0, "squat", vec![set(100.0, 5, 0), set(100.0, 5, 2)]),
            workout_on(5, "squat", vec![set(90.0, 5, 4), set(90.0, 0, 0)]),
            workout_on(7, "squat", vec![set(100.0, 3, 1)]),
        ];

        let points = weekly_rpe(&workouts, "squat", &window_to(13)).unwrap();
        assert_eq!(points.len(), 2);
        // (10 + 8 + 6) / 3, not the mean of per-workout means
        assert!(approx_eq(points[0].average_rpe, 8.0, 1e-9));
        assert!(approx_eq(points[1].average_rpe, 9.0, 1e-9));
    }

    #[test]
    fn test_rpe_uneven_workouts_not_averaged_early() {
        let workouts = vec![
            workout_on(0, "row", vec![set(60.0, 8, 0)]),
            workout_on(2, "row", vec![set(60.0, 8, 4), set(60.0, 8, 4), set(60.0, 8, 4)]),
        ];

        let points = weekly_rpe(&workouts, "row", &window_to(6)).unwrap();
        // (10 + 6 + 6 + 6) / 4 = 7, whereas averaging per workout would give 8
        assert!(approx_eq(points[0].average_rpe, 7.0, 1e-9));
    }

    #[test]
    fn test_weekly_volume_matches_window_total() {
        let workouts = vec![
            workout_on(0, "squat", vec![set(100.0, 5, 1), set(110.0, 3, 0)]),
            workout_on(8, "squat", vec![set(105.0, 5, 1)]),
            workout_on(17, "squat", vec![set(115.0, 2, 0), set(60.0, 0, 0)]),
            workout_on(40, "squat", vec![set(120.0, 1, 0)]),
        ];
        let window = window_to(30);

        let analyzer = Analyzer::new(&workouts).unwrap();
        let weekly_total: f64 = analyzer
            .weekly_volume("squat", &window)
            .iter()
            .map(|p| p.total_volume)
            .sum();
        let window_total = analyzer.exercise_volume(&["squat"], &window).get("squat");
        assert!(approx_eq(weekly_total, window_total, 1e-9));
    }

    #[test]
    fn test_densify_fills_gaps() {
        let workouts = vec![
            workout_on(1, "squat", vec![set(100.0, 5, 0)]),
            workout_on(15, "squat", vec![set(100.0, 3, 0)]),
        ];
        let window = window_to(20);

        let points = weekly_volume(&workouts, "squat", &window).unwrap();
        let dense = densify(&points, &window);

        assert_eq!(dense.len(), 3);
        assert_eq!(dense[0].value, 500.0);
        assert_eq!(dense[1].value, 0.0);
        assert_eq!(dense[1].week_start, day(7));
        assert_eq!(dense[2].value, 300.0);
    }

    #[test]
    fn test_densify_empty() {
        let points: Vec<WeeklyFrequencyPoint> = vec![];
        assert!(densify(&points, &window_to(20)).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let workouts: Vec<WorkoutLog> = vec![];
        let window = window_to(30);
        assert!(weekly_volume(&workouts, "squat", &window).unwrap().is_empty());
        assert!(weekly_frequency(&workouts, "squat", &window).unwrap().is_empty());
        assert!(weekly_rpe(&workouts, "squat", &window).unwrap().is_empty());
    }
}
