//! Exercise catalog: display names and the body part each exercise trains.
//!
//! A built-in catalog covers the common barbell and bodyweight lifts. Users
//! can point the CLI at their own TOML catalog instead.

use crate::{BodyPartLookup, Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Cached default catalog, built once
static DEFAULT_CATALOG: Lazy<ExerciseCatalog> = Lazy::new(build_default_catalog);

/// A catalog entry
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogExercise {
    pub id: String,
    pub name: String,
    pub body_part: String,
}

/// Exercise id → metadata
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExerciseCatalog {
    pub exercises: BTreeMap<String, CatalogExercise>,
}

/// On-disk layout: a list of `[[exercise]]` tables
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "exercise")]
    exercises: Vec<CatalogExercise>,
}

/// Reference to the cached built-in catalog
pub fn get_default_catalog() -> &'static ExerciseCatalog {
    &DEFAULT_CATALOG
}

/// Build the built-in catalog.
///
/// Prefer `get_default_catalog()`; this is kept for tests and for callers
/// that want an owned copy to extend.
pub fn build_default_catalog() -> ExerciseCatalog {
    const ENTRIES: &[(&str, &str, &str)] = &[
        ("squat", "Back Squat", "legs"),
        ("front_squat", "Front Squat", "legs"),
        ("leg_press", "Leg Press", "legs"),
        ("lunge", "Walking Lunge", "legs"),
        ("deadlift", "Deadlift", "back"),
        ("romanian_deadlift", "Romanian Deadlift", "hamstrings"),
        ("barbell_row", "Barbell Row", "back"),
        ("pullup", "Pull-up", "back"),
        ("lat_pulldown", "Lat Pulldown", "back"),
        ("bench", "Bench Press", "chest"),
        ("incline_bench", "Incline Bench Press", "chest"),
        ("dip", "Dip", "chest"),
        ("ohp", "Overhead Press", "shoulders"),
        ("lateral_raise", "Lateral Raise", "shoulders"),
        ("curl", "Biceps Curl", "arms"),
        ("triceps_extension", "Triceps Extension", "arms"),
        ("hip_thrust", "Hip Thrust", "glutes"),
        ("calf_raise", "Calf Raise", "calves"),
        ("plank", "Plank", "core"),
    ];

    ExerciseCatalog::from_entries(ENTRIES.iter().map(|(id, name, body_part)| CatalogExercise {
        id: (*id).into(),
        name: (*name).into(),
        body_part: (*body_part).into(),
    }))
}

impl ExerciseCatalog {
    /// Build a catalog; later entries replace earlier ones with the same id
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogExercise>) -> Self {
        let exercises = entries.into_iter().map(|e| (e.id.clone(), e)).collect();
        Self { exercises }
    }

    /// Load a catalog from a TOML file of `[[exercise]]` tables.
    ///
    /// Duplicate ids and blank fields are rejected.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let file: CatalogFile = toml::from_str(&contents)?;

        let mut seen = HashSet::new();
        let mut errors = Vec::new();
        for exercise in &file.exercises {
            if !seen.insert(exercise.id.as_str()) {
                errors.push(format!("Duplicate exercise id: {}", exercise.id));
            }
        }

        let catalog = Self::from_entries(file.exercises);
        errors.extend(catalog.validate());
        if !errors.is_empty() {
            return Err(Error::CatalogValidation(errors.join("; ")));
        }

        tracing::info!(
            "Loaded {} catalog exercises from {:?}",
            catalog.exercises.len(),
            path
        );
        Ok(catalog)
    }

    pub fn get(&self, exercise_id: &str) -> Option<&CatalogExercise> {
        self.exercises.get(exercise_id)
    }

    /// Display name for an id, falling back to the id itself
    pub fn display_name<'a>(&'a self, exercise_id: &'a str) -> &'a str {
        self.get(exercise_id)
            .map(|e| e.name.as_str())
            .unwrap_or(exercise_id)
    }

    /// Distinct body parts, sorted
    pub fn body_parts(&self) -> Vec<&str> {
        let mut parts: Vec<&str> = self
            .exercises
            .values()
            .map(|e| e.body_part.as_str())
            .collect();
        parts.sort_unstable();
        parts.dedup();
        parts
    }

    /// Validate the catalog for consistency
    ///
    /// Returns a list of validation errors (empty if valid)
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (key, exercise) in &self.exercises {
            if key != &exercise.id {
                errors.push(format!(
                    "Exercise stored under '{}' has id '{}'",
                    key, exercise.id
                ));
            }
            if exercise.id.trim().is_empty() {
                errors.push("Exercise with empty id".to_string());
            }
            if exercise.name.trim().is_empty() {
                errors.push(format!("Exercise '{}' has no name", exercise.id));
            }
            if exercise.body_part.trim().is_empty() {
                errors.push(format!("Exercise '{}' has no body part", exercise.id));
            }
        }

        errors
    }
}

impl BodyPartLookup for ExerciseCatalog {
    fn body_part(&self, exercise_id: &str) -> Option<&str> {
        self.get(exercise_id).map(|e| e.body_part.as_str())
    }
}
