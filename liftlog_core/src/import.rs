//! CSV import of flat set rows into workout logs.
//!
//! Expected header (optional columns may be omitted):
//!
//! ```text
//! workout_id,date,exercise_id,exercise_name,weight,reps,rir,validated
//! ```
//!
//! Rows sharing a `workout_id` form one workout. Rows without one are grouped
//! by date and given a generated id.

use crate::{Error, ExerciseEntry, Result, SetEntry, WorkoutLog};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use uuid::Uuid;

/// CSV row as written by spreadsheets and other trackers
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    workout_id: Option<String>,
    date: String,
    exercise_id: String,
    #[serde(default)]
    exercise_name: Option<String>,
    weight: f64,
    reps: i64,
    #[serde(default)]
    rir: Option<i64>,
    #[serde(default)]
    validated: Option<bool>,
}

/// A row checked against the data model
#[derive(Debug)]
struct ImportedSet {
    workout_id: Option<String>,
    date: NaiveDate,
    exercise_id: String,
    exercise_name: Option<String>,
    set: SetEntry,
    validated: bool,
}

impl TryFrom<CsvRow> for ImportedSet {
    type Error = String;

    fn try_from(row: CsvRow) -> std::result::Result<Self, String> {
        let date = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d")
            .map_err(|e| format!("invalid date '{}': {}", row.date, e))?;

        let exercise_id = row.exercise_id.trim().to_string();
        if exercise_id.is_empty() {
            return Err("missing exercise_id".into());
        }
        if !row.weight.is_finite() || row.weight < 0.0 {
            return Err(format!("weight must be a non-negative number, got {}", row.weight));
        }
        let reps = u32::try_from(row.reps)
            .map_err(|_| format!("reps must be non-negative, got {}", row.reps))?;
        let rir = match row.rir {
            Some(rir) => {
                u32::try_from(rir).map_err(|_| format!("rir must be non-negative, got {}", rir))?
            }
            None => 0,
        };

        Ok(ImportedSet {
            workout_id: row
                .workout_id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty()),
            date,
            exercise_id,
            exercise_name: row.exercise_name.filter(|n| !n.trim().is_empty()),
            set: SetEntry::new(row.weight, reps, rir),
            validated: row.validated.unwrap_or(true),
        })
    }
}

/// Import workouts from a CSV file
pub fn import_csv(path: &Path) -> Result<Vec<WorkoutLog>> {
    let file = std::fs::File::open(path)?;
    let workouts = import_csv_reader(file)?;
    tracing::info!("Imported {} workouts from {:?}", workouts.len(), path);
    Ok(workouts)
}

/// Import workouts from any CSV source.
///
/// The first bad row aborts the import; nothing is returned for a partially
/// valid file.
pub fn import_csv_reader<R: Read>(mut source: R) -> Result<Vec<WorkoutLog>> {
    let mut text = String::new();
    source.read_to_string(&mut text)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let mut record = StringRecord::new();
    let mut workouts: Vec<WorkoutLog> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    loop {
        let offset = reader.position().byte();
        let read = reader.read_record(&mut record);
        let line = line_of_row(&text, offset);

        let has_row = read.map_err(|e| Error::Malformed {
            line,
            reason: e.to_string(),
        })?;
        if !has_row {
            break;
        }

        let row: CsvRow = record
            .deserialize(Some(&headers))
            .map_err(|e| Error::Malformed {
                line,
                reason: e.to_string(),
            })?;
        let imported =
            ImportedSet::try_from(row).map_err(|reason| Error::Malformed { line, reason })?;

        let key = match &imported.workout_id {
            Some(id) => format!("id:{}", id),
            None => format!("date:{}", imported.date),
        };

        let idx = match index_by_key.get(&key) {
            Some(&idx) => {
                if workouts[idx].date != imported.date {
                    return Err(Error::Malformed {
                        line,
                        reason: format!(
                            "workout {} already dated {}, row says {}",
                            workouts[idx].id, workouts[idx].date, imported.date
                        ),
                    });
                }
                idx
            }
            None => {
                let id = imported
                    .workout_id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                workouts.push(WorkoutLog {
                    id,
                    date: imported.date,
                    validated: true,
                    notes: String::new(),
                    exercises: Vec::new(),
                });
                index_by_key.insert(key, workouts.len() - 1);
                workouts.len() - 1
            }
        };

        add_set(&mut workouts[idx], imported);
    }

    Ok(workouts)
}

/// 1-based line of the row that starts at `offset`.
///
/// The reader positions a record before the blank lines it skips, so those
/// are stepped over here.
fn line_of_row(text: &str, offset: u64) -> usize {
    let bytes = text.as_bytes();
    let mut start = usize::try_from(offset).map_or(bytes.len(), |o| o.min(bytes.len()));
    while start < bytes.len() && matches!(bytes[start], b'\n' | b'\r') {
        start += 1;
    }
    1 + bytes[..start].iter().filter(|&&b| b == b'\n').count()
}

fn add_set(workout: &mut WorkoutLog, imported: ImportedSet) {
    workout.validated &= imported.validated;

    if let Some(entry) = workout
        .exercises
        .iter_mut()
        .find(|e| e.exercise_id == imported.exercise_id)
    {
        entry.sets.push(imported.set);
        return;
    }

    let order = workout.exercises.len() as u32;
    workout.exercises.push(ExerciseEntry {
        name: imported
            .exercise_name
            .unwrap_or_else(|| imported.exercise_id.clone()),
        exercise_id: imported.exercise_id,
        order,
        sets: vec![imported.set],
    });
}
