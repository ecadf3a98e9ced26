//! Time interval model.
//!
//! A half-open interval `[start, end)` over wall-clock instants. The only
//! way to build one is through [`TimeInterval::new`], which enforces
//! `start < end`; duration is always derived from the two bounds.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{BoardError, Result};

/// A non-empty time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeInterval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeInterval {
    /// Creates an interval, rejecting `start >= end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use u_tourboard::models::TimeInterval;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 4, 19).unwrap();
    /// let start = day.and_hms_opt(8, 0, 0).unwrap();
    /// let end = day.and_hms_opt(12, 0, 0).unwrap();
    ///
    /// let interval = TimeInterval::new(start, end).unwrap();
    /// assert_eq!(interval.duration().num_hours(), 4);
    /// assert!(TimeInterval::new(end, start).is_err());
    /// ```
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start >= end {
            return Err(BoardError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates an interval from a start and a positive length.
    pub fn starting_at(start: NaiveDateTime, length: TimeDelta) -> Result<Self> {
        let end = start
            .checked_add_signed(length)
            .ok_or(BoardError::InvalidInterval { start, end: start })?;
        Self::new(start, end)
    }

    /// Interval start (inclusive).
    #[inline]
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Interval end (exclusive).
    #[inline]
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Length of the interval. Always positive.
    #[inline]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Returns a copy with a new start, keeping the end.
    pub fn with_start(&self, start: NaiveDateTime) -> Result<Self> {
        Self::new(start, self.end)
    }

    /// Returns a copy with a new end, keeping the start.
    pub fn with_end(&self, end: NaiveDateTime) -> Result<Self> {
        Self::new(self.start, end)
    }
}

impl<'de> Deserialize<'de> for TimeInterval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            start: NaiveDateTime,
            end: NaiveDateTime,
        }

        let raw = Raw::deserialize(deserializer)?;
        TimeInterval::new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}
