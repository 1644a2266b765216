//! Intensity distribution by percentage of the same day's estimated 1RM.

use crate::{Analyzer, DateWindow, IntensityDistribution, Result, WorkoutLog};
use serde::{Deserialize, Serialize};

/// %1RM band of a single set
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IntensityBand {
    Below60,
    Between60And70,
    Between70And80,
    Between80And90,
    Above90,
}

impl IntensityBand {
    /// Band for a percentage of 1RM; lower bounds are inclusive.
    pub fn from_percent(percent: f64) -> Self {
        if percent < 60.0 {
            IntensityBand::Below60
        } else if percent < 70.0 {
            IntensityBand::Between60And70
        } else if percent < 80.0 {
            IntensityBand::Between70And80
        } else if percent < 90.0 {
            IntensityBand::Between80And90
        } else {
            IntensityBand::Above90
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IntensityBand::Below60 => "<60%",
            IntensityBand::Between60And70 => "60-70%",
            IntensityBand::Between70And80 => "70-80%",
            IntensityBand::Between80And90 => "80-90%",
            IntensityBand::Above90 => ">=90%",
        }
    }

    pub fn all() -> &'static [IntensityBand] {
        &[
            IntensityBand::Below60,
            IntensityBand::Between60And70,
            IntensityBand::Between70And80,
            IntensityBand::Between80And90,
            IntensityBand::Above90,
        ]
    }
}

impl IntensityDistribution {
    pub fn record(&mut self, band: IntensityBand) {
        *self.count_mut(band) += 1;
    }

    pub fn count(&self, band: IntensityBand) -> u32 {
        match band {
            IntensityBand::Below60 => self.below60,
            IntensityBand::Between60And70 => self.between60and70,
            IntensityBand::Between70And80 => self.between70and80,
            IntensityBand::Between80And90 => self.between80and90,
            IntensityBand::Above90 => self.above90,
        }
    }

    /// Number of sets across all bands
    pub fn total(&self) -> u32 {
        self.below60
            + self.between60and70
            + self.between70and80
            + self.between80and90
            + self.above90
    }

    fn count_mut(&mut self, band: IntensityBand) -> &mut u32 {
        match band {
            IntensityBand::Below60 => &mut self.below60,
            IntensityBand::Between60And70 => &mut self.between60and70,
            IntensityBand::Between70And80 => &mut self.between70and80,
            IntensityBand::Between80And90 => &mut self.between80and90,
            IntensityBand::Above90 => &mut self.above90,
        }
    }
}

impl Analyzer<'_> {
    /// Bucket every loaded, completed set of `exercise_id` in `window` by its
    /// weight relative to that workout's best estimated 1RM.
    ///
    /// Zero-weight sets have no defined %1RM and are left out. A workout with
    /// a single set is measured against its own estimate.
    pub fn intensity_distribution(
        &self,
        exercise_id: &str,
        window: &DateWindow,
    ) -> IntensityDistribution {
        let mut distribution = IntensityDistribution::default();

        for (_, workout) in self.in_window(window) {
            let Some(day_max) = self.formula.best_estimate(workout.sets_for(exercise_id)) else {
                continue;
            };
            if day_max <= 0.0 {
                continue;
            }

            for set in workout.qualifying_sets_for(exercise_id) {
                if set.weight <= 0.0 {
                    continue;
                }
                let percent = set.weight / day_max * 100.0;
                distribution.record(IntensityBand::from_percent(percent));
            }
        }

        tracing::debug!(
            "Intensity distribution for {}: {} sets",
            exercise_id,
            distribution.total()
        );
        distribution
    }
}

/// Intensity distribution over validated workouts
pub fn intensity_distribution(
    workouts: &[WorkoutLog],
    exercise_id: &str,
    window: &DateWindow,
) -> Result<IntensityDistribution> {
    Ok(Analyzer::new(workouts)?.intensity_distribution(exercise_id, window))
}
