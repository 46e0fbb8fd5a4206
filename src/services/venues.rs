//! Venue listing for the home page.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::database::remote::VenueGateway;
use crate::models::venues::{Media, Venue};

/// Compact venue entry for listings
#[derive(TS, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "holidaze.ts")]
#[ts(rename_all = "camelCase")]
pub struct VenueCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub max_guests: u32,
    pub rating: f64,
    pub image: Option<Media>,
    pub location: Vec<String>,
    pub amenities: Vec<String>,
}

impl From<&Venue> for VenueCard {
    fn from(venue: &Venue) -> Self {
        Self {
            id: venue.id.clone(),
            name: venue.name.clone(),
            description: venue.description.clone(),
            price: venue.price,
            max_guests: venue.max_guests,
            rating: venue.rating,
            image: venue.media.first().cloned(),
            location: venue
                .location
                .display_lines()
                .into_iter()
                .map(str::to_string)
                .collect(),
            amenities: venue.amenities().into_iter().map(str::to_string).collect(),
        }
    }
}

pub async fn list_venue_cards<G>(gateway: &G) -> Result<Vec<VenueCard>, String>
where
    G: VenueGateway + ?Sized,
{
    let venues = gateway.list_venues().await.map_err(|err| {
        warn!("Failed to fetch venues: {}", err);
        "Failed to fetch venues".to_string()
    })?;
    debug!("fetched {} venues", venues.len());
    Ok(venues.iter().map(VenueCard::from).collect())
}
