use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::bookings::Booking;
use super::profiles::ProfileSummary;

/// A bookable listing as returned by `GET /holidaze/venues/{id}`
#[derive(TS, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "holidaze.ts")]
#[ts(rename_all = "camelCase")]
pub struct Venue {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub media: Vec<Media>,
    /// Price per night
    pub price: f64,
    pub max_guests: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    #[ts(type = "string | null")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    #[ts(type = "string | null")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub meta: VenueMeta,
    #[serde(default)]
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<ProfileSummary>,
    /// Only present when requested with `_bookings=true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookings: Option<Vec<Booking>>,
}

impl Venue {
    /// Human-readable amenity labels in display order
    pub fn amenities(&self) -> Vec<&'static str> {
        self.meta.amenities()
    }

    pub fn is_owned_by(&self, profile_name: &str) -> bool {
        self.owner
            .as_ref()
            .map(|owner| owner.name == profile_name)
            .unwrap_or(false)
    }
}

#[derive(TS, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "holidaze.ts")]
pub struct Media {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(TS, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "holidaze.ts")]
pub struct VenueMeta {
    #[serde(default)]
    pub wifi: bool,
    #[serde(default)]
    pub parking: bool,
    #[serde(default)]
    pub breakfast: bool,
    #[serde(default)]
    pub pets: bool,
}

impl VenueMeta {
    pub fn amenities(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.wifi {
            out.push("Free Wi-Fi");
        }
        if self.parking {
            out.push("Parking");
        }
        if self.breakfast {
            out.push("Breakfast included");
        }
        if self.pets {
            out.push("Pets allowed");
        }
        out
    }
}

#[derive(TS, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "holidaze.ts")]
pub struct Location {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub continent: Option<String>,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
}

impl Location {
    /// Non-empty address, city and country lines, in that order
    pub fn display_lines(&self) -> Vec<&str> {
        [&self.address, &self.city, &self.country]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect()
    }
}

/// Body sent to `POST /holidaze/venues` and `PUT /holidaze/venues/{id}`
#[derive(TS, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "holidaze.ts")]
#[ts(rename_all = "camelCase")]
pub struct VenueInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<Media>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_guests: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<VenueMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn venue_parses_api_payload_with_nulls() {
        let raw = json!({
            "id": "7a4e",
            "name": "Cabin by the fjord",
            "description": "Quiet",
            "media": [{ "url": "https://img/1.jpg", "alt": "front" }],
            "price": 100,
            "maxGuests": 4,
            "rating": 4.5,
            "created": "2024-01-10T12:00:00.000Z",
            "updated": "2024-01-10T12:00:00.000Z",
            "meta": { "wifi": true, "parking": false, "breakfast": true, "pets": false },
            "location": {
                "address": "Fjordveien 1",
                "city": null,
                "zip": null,
                "country": "Norway",
                "continent": null,
                "lat": 0,
                "lng": 0
            }
        });

        let venue: Venue = serde_json::from_value(raw).unwrap();
        assert_eq!(venue.max_guests, 4);
        assert_eq!(venue.price, 100.0);
        assert!(venue.bookings.is_none());
        assert_eq!(venue.amenities(), vec!["Free Wi-Fi", "Breakfast included"]);
        assert_eq!(venue.location.display_lines(), vec!["Fjordveien 1", "Norway"]);
    }

    #[test]
    fn venue_input_omits_unset_fields() {
        let input = VenueInput {
            price: Some(250.0),
            max_guests: Some(3),
            ..Default::default()
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value, json!({ "price": 250.0, "maxGuests": 3 }));
    }
}
