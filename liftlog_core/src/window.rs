//! Inclusive calendar-day windows and week bucketing.

use crate::{Error, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

const DAYS_PER_WEEK: i64 = 7;

/// Inclusive `[start, end]` range of calendar days.
///
/// The fields are public, so a window can be inverted (`end < start`). An
/// inverted window contains no dates and every computation over it yields an
/// empty result. Use [`DateWindow::new`] when a reversed range should be
/// reported as a usage error instead.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Build a window, rejecting `end < start`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(Error::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// True when no date can fall inside the window
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Zero-based 7-day bucket of `date` counted from `start`, or `None` when
    /// the date lies outside the window.
    pub fn week_index(&self, date: NaiveDate) -> Option<u32> {
        if !self.contains(date) {
            return None;
        }
        let days = (date - self.start).num_days();
        u32::try_from(days / DAYS_PER_WEEK).ok()
    }

    /// First day of week `index`
    pub fn week_start(&self, index: u32) -> NaiveDate {
        self.start + Duration::days(i64::from(index) * DAYS_PER_WEEK)
    }
}
