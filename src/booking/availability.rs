//! Booked-day bookkeeping for a single venue
//!
//! Every booking occupies the inclusive calendar range `[dateFrom, dateTo]`.
//! Ranges are stored sorted and merged (adjacent ranges collapse), so a day
//! lookup is a binary search instead of a scan over every booked night.

use chrono::{Duration, NaiveDate};

use crate::models::bookings::Booking;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookedDates {
    // sorted by start, non-overlapping, non-adjacent, inclusive
    ranges: Vec<(NaiveDate, NaiveDate)>,
}

impl BookedDates {
    pub fn from_bookings<'a, I>(bookings: I) -> Self
    where
        I: IntoIterator<Item = &'a Booking>,
    {
        Self::from_ranges(bookings.into_iter().map(|b| (b.first_day(), b.last_day())))
    }

    /// Builds the set from inclusive `(first, last)` pairs. Inverted pairs
    /// carry no days and are dropped.
    pub fn from_ranges<I>(ranges: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, NaiveDate)>,
    {
        let mut sorted: Vec<(NaiveDate, NaiveDate)> =
            ranges.into_iter().filter(|(from, to)| from <= to).collect();
        sorted.sort_unstable();

        let mut merged: Vec<(NaiveDate, NaiveDate)> = Vec::with_capacity(sorted.len());
        for (from, to) in sorted {
            if let Some(last) = merged.last_mut() {
                let touches = last
                    .1
                    .succ_opt()
                    .map(|next| from <= next)
                    .unwrap_or(true);
                if touches {
                    if to > last.1 {
                        last.1 = to;
                    }
                    continue;
                }
            }
            merged.push((from, to));
        }

        Self { ranges: merged }
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Merged inclusive ranges in ascending order
    pub fn ranges(&self) -> &[(NaiveDate, NaiveDate)] {
        &self.ranges
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        let idx = self.ranges.partition_point(|(_, last)| *last < day);
        self.ranges
            .get(idx)
            .map(|(first, _)| *first <= day)
            .unwrap_or(false)
    }

    /// True when any booked day falls inside `[from, to]`
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        if from > to {
            return false;
        }
        let idx = self.ranges.partition_point(|(_, last)| *last < from);
        self.ranges
            .get(idx)
            .map(|(first, _)| *first <= to)
            .unwrap_or(false)
    }

    /// Every excluded calendar day, ascending
    pub fn excluded_days(&self) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        for (first, last) in &self.ranges {
            let mut day = *first;
            while day <= *last {
                days.push(day);
                day += Duration::days(1);
            }
        }
        days
    }

    /// Total number of excluded days
    pub fn day_count(&self) -> i64 {
        self.ranges
            .iter()
            .map(|(first, last)| (*last - *first).num_days() + 1)
            .sum()
    }
}
