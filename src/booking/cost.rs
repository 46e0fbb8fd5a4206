//! Nightly cost arithmetic

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DAY_MS: i64 = 86_400_000;

/// Whole nights between two instants.
///
/// The millisecond difference is divided by one day and rounded to the
/// nearest integer, so a 23 or 25 hour span across a daylight-saving change
/// still counts as one night.
pub fn nights_between<Tz: TimeZone>(from: &DateTime<Tz>, to: &DateTime<Tz>) -> i64 {
    let ms = to.timestamp_millis() - from.timestamp_millis();
    (ms as f64 / DAY_MS as f64).round() as i64
}

pub fn cost<Tz: TimeZone>(from: &DateTime<Tz>, to: &DateTime<Tz>, nightly_price: f64) -> f64 {
    nights_between(from, to) as f64 * nightly_price
}

/// Calendar day at midnight UTC, the form bookings are sent in
pub fn midnight_utc(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}

pub fn nights_between_days(from: NaiveDate, to: NaiveDate) -> i64 {
    nights_between(&midnight_utc(from), &midnight_utc(to))
}

/// How a stay that starts and ends on the same day is billed.
///
/// The calculator itself yields zero nights for `start == end`; this is the
/// caller-side product rule applied on top of it.
#[derive(TS, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "holidaze.ts")]
pub enum SingleDayPolicy {
    /// Bill one night, matching the one-night-minimum the calendar implies
    #[default]
    ChargeOneNight,
    /// Bill exactly what the calculator reports
    ZeroCost,
}

impl SingleDayPolicy {
    pub fn billable_nights(self, nights: i64) -> i64 {
        match self {
            SingleDayPolicy::ChargeOneNight if nights == 0 => 1,
            _ => nights,
        }
    }
}

impl FromStr for SingleDayPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "charge-one-night" => Ok(SingleDayPolicy::ChargeOneNight),
            "zero-cost" => Ok(SingleDayPolicy::ZeroCost),
            other => Err(format!(
                "Unknown single-day policy '{}', expected charge-one-night or zero-cost",
                other
            )),
        }
    }
}

/// Price of a new booking
#[derive(TS, Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "holidaze.ts")]
pub struct CostQuote {
    #[ts(type = "number")]
    pub nights: i64,
    pub total: f64,
}

impl CostQuote {
    pub fn for_days(from: NaiveDate, to: NaiveDate, price: f64, policy: SingleDayPolicy) -> Self {
        let nights = policy.billable_nights(nights_between_days(from, to));
        Self {
            nights,
            total: nights as f64 * price,
        }
    }
}

/// Original against new cost when an existing booking is edited
#[derive(TS, Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "holidaze.ts")]
pub struct CostComparison {
    pub original_cost: f64,
    pub new_cost: f64,
    pub cost_diff: f64,
}

impl CostComparison {
    pub fn new(original_cost: f64, new_cost: f64) -> Self {
        Self {
            original_cost,
            new_cost,
            cost_diff: new_cost - original_cost,
        }
    }

    pub fn for_edit(
        original: (NaiveDate, NaiveDate),
        updated: (NaiveDate, NaiveDate),
        price: f64,
        policy: SingleDayPolicy,
    ) -> Self {
        let original = CostQuote::for_days(original.0, original.1, price, policy);
        let updated = CostQuote::for_days(updated.0, updated.1, price, policy);
        Self::new(original.total, updated.total)
    }

    /// Difference with an explicit sign, `+` for zero and above
    pub fn signed_diff(&self) -> String {
        if self.cost_diff >= 0.0 {
            format!("+{}", self.cost_diff)
        } else {
            format!("{}", self.cost_diff)
        }
    }
}

impl fmt::Display for CostComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Original Cost: ${} | New Cost: ${} ({})",
            self.original_cost,
            self.new_cost,
            self.signed_diff()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn same_instant_is_zero_nights() {
        let day = midnight_utc(d(2024, 6, 5));
        assert_eq!(nights_between(&day, &day), 0);
        assert_eq!(nights_between(&day, &(day + Duration::days(1))), 1);
    }

    #[test]
    fn dst_shift_rounds_to_whole_night() {
        // Europe/Oslo springs forward on 2024-03-31: midnight to midnight is 23h
        let cet = FixedOffset::east_opt(3600).unwrap();
        let cest = FixedOffset::east_opt(7200).unwrap();
        let from = cet.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap();
        let to = cest.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        assert_eq!(to.timestamp() - from.timestamp(), 23 * 3600);
        assert_eq!(nights_between(&from, &to), 1);

        // and falls back on 2024-10-27: 25h
        let from = cest.with_ymd_and_hms(2024, 10, 27, 0, 0, 0).unwrap();
        let to = cet.with_ymd_and_hms(2024, 10, 28, 0, 0, 0).unwrap();
        assert_eq!(nights_between(&from, &to), 1);
    }

    #[test]
    fn cost_is_nights_times_price() {
        for price in [0.0, 1.0, 99.5, 100.0, 1234.0] {
            for nights in 0..10 {
                let from = midnight_utc(d(2024, 6, 1));
                let to = from + Duration::days(nights);
                assert_eq!(
                    cost(&from, &to, price),
                    nights_between(&from, &to) as f64 * price
                );
            }
        }
    }

    #[test]
    fn two_night_stay_at_hundred_costs_two_hundred() {
        let quote =
            CostQuote::for_days(d(2024, 6, 5), d(2024, 6, 7), 100.0, SingleDayPolicy::ZeroCost);
        assert_eq!(quote.nights, 2);
        assert_eq!(quote.total, 200.0);
    }

    #[test]
    fn single_day_policy_is_explicit() {
        let day = d(2024, 6, 5);
        assert_eq!(
            CostQuote::for_days(day, day, 100.0, SingleDayPolicy::ZeroCost).total,
            0.0
        );
        assert_eq!(
            CostQuote::for_days(day, day, 100.0, SingleDayPolicy::ChargeOneNight).total,
            100.0
        );
        assert_eq!(
            "zero-cost".parse::<SingleDayPolicy>(),
            Ok(SingleDayPolicy::ZeroCost)
        );
        assert!("free".parse::<SingleDayPolicy>().is_err());
    }

    #[test]
    fn editing_to_longer_stay_reports_positive_diff() {
        let cmp = CostComparison::for_edit(
            (d(2024, 6, 1), d(2024, 6, 3)),
            (d(2024, 6, 5), d(2024, 6, 8)),
            100.0,
            SingleDayPolicy::ChargeOneNight,
        );
        assert_eq!(cmp.original_cost, 200.0);
        assert_eq!(cmp.new_cost, 300.0);
        assert_eq!(cmp.signed_diff(), "+100");
        assert_eq!(
            cmp.to_string(),
            "Original Cost: $200 | New Cost: $300 (+100)"
        );
    }

    #[test]
    fn same_dates_edit_has_zero_diff() {
        let range = (d(2024, 6, 1), d(2024, 6, 3));
        let cmp = CostComparison::for_edit(range, range, 120.0, SingleDayPolicy::ZeroCost);
        assert_eq!(cmp.cost_diff, 0.0);
        assert_eq!(cmp.signed_diff(), "+0");
    }

    #[test]
    fn shorter_stay_has_negative_diff() {
        let cmp = CostComparison::new(300.0, 100.0);
        assert_eq!(cmp.signed_diff(), "-200");
    }
}
