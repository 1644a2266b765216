//! Local workout log in JSON Lines form.
//!
//! One `WorkoutLog` per line. Appends take an exclusive lock and reads take a
//! shared one, so the CLI can import while another process reads.

use crate::{Error, Result, WorkoutLog};
use fs2::FileExt;
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Destination for workout logs
pub trait WorkoutSink {
    fn append(&mut self, workout: &WorkoutLog) -> Result<()>;

    fn append_all(&mut self, workouts: &[WorkoutLog]) -> Result<usize> {
        for workout in workouts {
            self.append(workout)?;
        }
        Ok(workouts.len())
    }
}

/// JSONL-backed workout log with file locking
pub struct JsonlStore {
    path: PathBuf,
}

impl JsonlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every workout currently in the log
    pub fn read_all(&self) -> Result<Vec<WorkoutLog>> {
        read_workouts(&self.path)
    }

    /// Append the workouts whose ids are not already in the log.
    ///
    /// The existing ids are read and the batch is written under one exclusive
    /// lock, as a single write. Returns the number of workouts appended.
    pub fn append_new(&mut self, workouts: &[WorkoutLog]) -> Result<usize> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;
        let written = write_new(&file, workouts);
        file.unlock()?;
        let written = written?;

        tracing::debug!(
            "Appended {} of {} workouts to {:?}",
            written,
            workouts.len(),
            self.path
        );
        Ok(written)
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl WorkoutSink for JsonlStore {
    fn append(&mut self, workout: &WorkoutLog) -> Result<()> {
        self.append_all(std::slice::from_ref(workout)).map(|_| ())
    }

    /// Whole batch under one exclusive lock, serialized before anything is
    /// written
    fn append_all(&mut self, workouts: &[WorkoutLog]) -> Result<usize> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let batch = encode_batch(workouts.iter())?;

        file.lock_exclusive()?;
        let written = write_batch(&file, &batch);
        file.unlock()?;
        written?;

        tracing::debug!("Appended {} workouts to {:?}", workouts.len(), self.path);
        Ok(workouts.len())
    }
}

/// Skip ids already present in `file` (or earlier in the batch), then write
/// the rest. The caller holds the exclusive lock.
fn write_new(file: &File, workouts: &[WorkoutLog]) -> Result<usize> {
    let mut known: HashSet<String> = parse_workouts(BufReader::new(file))?
        .into_iter()
        .map(|w| w.id)
        .collect();

    let fresh: Vec<&WorkoutLog> = workouts
        .iter()
        .filter(|w| known.insert(w.id.clone()))
        .collect();
    if fresh.len() < workouts.len() {
        tracing::info!(
            "Skipping {} workouts already in the log",
            workouts.len() - fresh.len()
        );
    }

    let batch = encode_batch(fresh.iter().copied())?;
    write_batch(file, &batch)?;
    Ok(fresh.len())
}

fn encode_batch<'a>(workouts: impl Iterator<Item = &'a WorkoutLog>) -> Result<String> {
    let mut batch = String::new();
    for workout in workouts {
        batch.push_str(&serde_json::to_string(workout)?);
        batch.push('\n');
    }
    Ok(batch)
}

fn write_batch(file: &File, batch: &str) -> Result<()> {
    if batch.is_empty() {
        return Ok(());
    }
    let mut writer = std::io::BufWriter::new(file);
    writer.write_all(batch.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Read all workouts from a JSONL log.
///
/// A missing file is an empty log. A malformed line (including one that
/// breaks the data model, such as negative reps) fails the whole read.
pub fn read_workouts(path: &Path) -> Result<Vec<WorkoutLog>> {
    if !path.exists() {
        tracing::debug!("No workout log at {:?}", path);
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;
    let parsed = parse_workouts(BufReader::new(&file));
    file.unlock()?;

    let workouts = parsed?;
    tracing::debug!("Read {} workouts from {:?}", workouts.len(), path);
    Ok(workouts)
}

/// Parse JSONL workouts, skipping blank lines
fn parse_workouts<R: BufRead>(reader: R) -> Result<Vec<WorkoutLog>> {
    let mut workouts = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<WorkoutLog>(&line) {
            Ok(workout) => workouts.push(workout),
            Err(e) => {
                tracing::warn!("Failed to parse workout at line {}: {}", line_num + 1, e);
                return Err(Error::Malformed {
                    line: line_num + 1,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(workouts)
}
