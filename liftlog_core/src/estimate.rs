//! One-rep-max estimation.
//!
//! Every formula is fed *effective reps* (`reps + rir`): reps in reserve were
//! still available to the lifter, so they count toward the projection.

use crate::{Error, SetEntry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rep count past which Brzycki and Lander stop being meaningful.
const MAX_RELIABLE_REPS: u32 = 15;

/// Formula used to project a set onto a one-rep max
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OneRepMaxFormula {
    /// `w × (1 + r/30)`
    #[default]
    Epley,
    /// `w × 36 / (37 − r)`
    Brzycki,
    /// `w × 100 / (101.3 − 2.67 × r)`
    Lander,
    /// Mean of Epley, Brzycki and Lander
    Average,
}

impl OneRepMaxFormula {
    /// Estimate a one-rep max from `weight_kg` lifted for `effective_reps`.
    ///
    /// Brzycki and Lander cap reps at 15; Epley is linear and uncapped.
    pub fn estimate(self, weight_kg: f64, effective_reps: u32) -> f64 {
        let r = f64::from(effective_reps);
        let capped = f64::from(effective_reps.min(MAX_RELIABLE_REPS));

        match self {
            OneRepMaxFormula::Epley => weight_kg * (1.0 + r / 30.0),
            OneRepMaxFormula::Brzycki => weight_kg * 36.0 / (37.0 - capped),
            OneRepMaxFormula::Lander => weight_kg * 100.0 / (101.3 - 2.67 * capped),
            OneRepMaxFormula::Average => {
                (OneRepMaxFormula::Epley.estimate(weight_kg, effective_reps)
                    + OneRepMaxFormula::Brzycki.estimate(weight_kg, effective_reps)
                    + OneRepMaxFormula::Lander.estimate(weight_kg, effective_reps))
                    / 3.0
            }
        }
    }

    /// Estimate for a single set, `None` when the set has no completed reps
    pub fn estimate_set(self, set: &SetEntry) -> Option<f64> {
        if !set.is_qualifying() {
            return None;
        }
        Some(self.estimate(set.weight, set.effective_reps()))
    }

    /// Best single-set estimate across `sets`, `None` if none qualify
    pub fn best_estimate<'s>(self, sets: impl IntoIterator<Item = &'s SetEntry>) -> Option<f64> {
        sets.into_iter()
            .filter_map(|s| self.estimate_set(s))
            .max_by(|a, b| a.total_cmp(b))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OneRepMaxFormula::Epley => "epley",
            OneRepMaxFormula::Brzycki => "brzycki",
            OneRepMaxFormula::Lander => "lander",
            OneRepMaxFormula::Average => "average",
        }
    }
}

impl fmt::Display for OneRepMaxFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OneRepMaxFormula {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "epley" => Ok(OneRepMaxFormula::Epley),
            "brzycki" => Ok(OneRepMaxFormula::Brzycki),
            "lander" => Ok(OneRepMaxFormula::Lander),
            "average" | "avg" | "mean" => Ok(OneRepMaxFormula::Average),
            other => Err(Error::Config(format!("Unknown 1RM formula: {}", other))),
        }
    }
}
