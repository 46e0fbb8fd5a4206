//! Date-range selection over a venue calendar

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use super::availability::BookedDates;

/// Transient `{start, end}` selection shown by the calendar
#[derive(TS, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "holidaze.ts")]
pub struct SelectedRange {
    #[ts(type = "string | null")]
    pub start: Option<NaiveDate>,
    #[ts(type = "string | null")]
    pub end: Option<NaiveDate>,
}

impl SelectedRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// A one-day pick, where `end` mirrors `start`
    pub fn single(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// `(start, end)` once both ends are chosen
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("{0} is already booked")]
    Booked(NaiveDate),
    #[error("{0} is in the past")]
    InPast(NaiveDate),
    #[error("{start} to {end} crosses an existing booking")]
    SpansBooking { start: NaiveDate, end: NaiveDate },
}

type DateChangeCallback = Box<dyn FnMut(SelectedRange) + Send>;

/// Calendar selection state for one venue.
///
/// Picks follow a range picker: the first pick sets `start`, a second pick on
/// or after `start` closes the range, a pick before `start` restarts it.
pub struct DateRangeSelector {
    booked: BookedDates,
    today: NaiveDate,
    range: SelectedRange,
    on_date_change: Option<DateChangeCallback>,
}

impl DateRangeSelector {
    pub fn new(booked: BookedDates, today: NaiveDate) -> Self {
        Self {
            booked,
            today,
            range: SelectedRange::default(),
            on_date_change: None,
        }
    }

    pub fn on_date_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(SelectedRange) + Send + 'static,
    {
        self.on_date_change = Some(Box::new(callback));
        self
    }

    pub fn selection(&self) -> SelectedRange {
        self.range
    }

    pub fn booked(&self) -> &BookedDates {
        &self.booked
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn is_selectable(&self, day: NaiveDate) -> bool {
        self.check_day(day).is_ok()
    }

    pub fn check_day(&self, day: NaiveDate) -> Result<(), SelectionError> {
        if day < self.today {
            return Err(SelectionError::InPast(day));
        }
        if self.booked.contains(day) {
            return Err(SelectionError::Booked(day));
        }
        Ok(())
    }

    /// Applies one calendar pick and reports the resulting range
    pub fn pick(&mut self, day: NaiveDate) -> Result<SelectedRange, SelectionError> {
        self.check_day(day)?;

        let next = match (self.range.start, self.range.end) {
            (Some(start), None) if day >= start => {
                if self.booked.overlaps(start, day) {
                    return Err(SelectionError::SpansBooking { start, end: day });
                }
                SelectedRange::new(start, day)
            }
            _ => SelectedRange {
                start: Some(day),
                end: None,
            },
        };

        self.set(next);
        Ok(next)
    }

    /// Picks a whole range at once, validating both ends and the interior
    pub fn pick_range(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<SelectedRange, SelectionError> {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        self.clear();
        let result = self.pick(start).and_then(|_| self.pick(end));
        if result.is_err() {
            self.clear();
        }
        result
    }

    /// Closes an open selection with `end = start`
    pub fn finish(&mut self) -> SelectedRange {
        if let (Some(start), None) = (self.range.start, self.range.end) {
            self.set(SelectedRange::single(start));
        }
        self.range
    }

    /// Replaces the selection with an externally supplied range
    pub fn sync(&mut self, initial: SelectedRange) {
        if initial != self.range {
            self.set(initial);
        }
    }

    pub fn clear(&mut self) {
        if !self.range.is_empty() {
            self.set(SelectedRange::default());
        }
    }

    fn set(&mut self, range: SelectedRange) {
        self.range = range;
        if let Some(callback) = self.on_date_change.as_mut() {
            callback(range);
        }
    }
}

impl fmt::Debug for DateRangeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateRangeSelector")
            .field("booked", &self.booked)
            .field("today", &self.today)
            .field("range", &self.range)
            .finish()
    }
}
