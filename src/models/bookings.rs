use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::profiles::ProfileSummary;
use super::venues::Venue;

/// A reserved date range against a venue
#[derive(TS, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "holidaze.ts")]
#[ts(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    #[ts(type = "string")]
    pub date_from: DateTime<Utc>,
    #[ts(type = "string")]
    pub date_to: DateTime<Utc>,
    pub guests: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<ProfileSummary>,
    /// Embedded when listed through a profile with `_bookings=true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "Venue | null")]
    pub venue: Option<Box<Venue>>,
    #[serde(default)]
    #[ts(type = "string | null")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    #[ts(type = "string | null")]
    pub updated: Option<DateTime<Utc>>,
}

impl Booking {
    /// First calendar day of the stay
    pub fn first_day(&self) -> NaiveDate {
        self.date_from.date_naive()
    }

    /// Last calendar day of the stay (inclusive)
    pub fn last_day(&self) -> NaiveDate {
        self.date_to.date_naive()
    }

    pub fn is_made_by(&self, profile_name: &str) -> bool {
        self.customer
            .as_ref()
            .map(|c| c.name == profile_name)
            .unwrap_or(false)
    }
}

/// Body for `POST /holidaze/bookings` (with `venue_id`) and `PUT /holidaze/bookings/{id}`
#[derive(TS, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "holidaze.ts")]
#[ts(rename_all = "camelCase")]
pub struct BookingInput {
    #[ts(type = "string")]
    pub date_from: DateTime<Utc>,
    #[ts(type = "string")]
    pub date_to: DateTime<Utc>,
    pub guests: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn booking_days_come_from_utc_dates() {
        let booking: Booking = serde_json::from_value(json!({
            "id": "b1",
            "dateFrom": "2024-06-01T00:00:00.000Z",
            "dateTo": "2024-06-03T00:00:00.000Z",
            "guests": 2,
            "customer": { "name": "kari", "email": "kari@stud.noroff.no" }
        }))
        .unwrap();

        assert_eq!(booking.first_day(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(booking.last_day(), NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert!(booking.is_made_by("kari"));
        assert!(!booking.is_made_by("ola"));
    }

    #[test]
    fn update_input_has_no_venue_id() {
        let input = BookingInput {
            date_from: "2024-06-05T00:00:00Z".parse().unwrap(),
            date_to: "2024-06-07T00:00:00Z".parse().unwrap(),
            guests: 2,
            venue_id: None,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert!(value.get("venueId").is_none());
        assert_eq!(value["guests"], 2);
    }
}
