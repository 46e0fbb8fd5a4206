//! Create-venue form and the manage-venue (update/delete) form.

use log::{info, warn};
use thiserror::Error;

use crate::database::remote::{ApiError, VenueGateway};
use crate::models::venues::{Location, Media, Venue, VenueInput, VenueMeta};
use crate::services::session::Session;

pub const MAX_GUESTS_LIMIT: u32 = 100;
pub const MAX_PRICE: f64 = 10_000.0;
pub const MAX_IMAGES: usize = 8;
pub const DEFAULT_IMAGE_ALT: &str = "Venue image";

#[derive(Debug, Error)]
pub enum VenueFormError {
    #[error("You can add a maximum of 8 images.")]
    TooManyImages,
    #[error("Please fill in all required fields.")]
    MissingFields,
    #[error("Login to create a venue")]
    NotLoggedIn,
    #[error("Confirm the deletion first")]
    DeleteNotConfirmed,
    #[error(transparent)]
    Remote(#[from] ApiError),
}

pub fn clamp_max_guests(requested: i64) -> u32 {
    requested.clamp(1, i64::from(MAX_GUESTS_LIMIT)) as u32
}

/// Caps the nightly price; negative input counts as no price
pub fn cap_price(requested: f64) -> f64 {
    if requested.is_nan() {
        return 0.0;
    }
    requested.clamp(0.0, MAX_PRICE)
}

/// Image list shared by both forms
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageList(Vec<Media>);

impl ImageList {
    pub fn from_media(media: Vec<Media>) -> Self {
        Self(media)
    }

    /// Blank URLs are ignored; a blank alt becomes the default
    pub fn add(&mut self, url: &str, alt: &str) -> Result<(), VenueFormError> {
        let url = url.trim();
        if url.is_empty() {
            return Ok(());
        }
        if self.0.len() >= MAX_IMAGES {
            return Err(VenueFormError::TooManyImages);
        }
        let alt = alt.trim();
        self.0.push(Media {
            url: url.to_string(),
            alt: if alt.is_empty() {
                DEFAULT_IMAGE_ALT.to_string()
            } else {
                alt.to_string()
            },
        });
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<Media> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn as_slice(&self) -> &[Media] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VenueDraft {
    pub name: String,
    pub description: String,
    pub images: ImageList,
    price: f64,
    max_guests: u32,
    rating: u8,
    pub meta: VenueMeta,
    pub location: Location,
}

impl Default for VenueDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            images: ImageList::default(),
            price: 0.0,
            max_guests: 1,
            rating: 0,
            meta: VenueMeta::default(),
            location: Location::default(),
        }
    }
}

impl VenueDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn max_guests(&self) -> u32 {
        self.max_guests
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn set_price(&mut self, price: f64) -> f64 {
        self.price = cap_price(price);
        self.price
    }

    pub fn set_max_guests(&mut self, requested: i64) -> u32 {
        self.max_guests = clamp_max_guests(requested);
        self.max_guests
    }

    pub fn increment_guests(&mut self) -> u32 {
        self.set_max_guests(i64::from(self.max_guests) + 1)
    }

    pub fn decrement_guests(&mut self) -> u32 {
        self.set_max_guests(i64::from(self.max_guests) - 1)
    }

    /// Star rating, 0 to 5
    pub fn set_rating(&mut self, stars: u8) -> u8 {
        self.rating = stars.min(5);
        self.rating
    }

    pub fn validate(&self) -> Result<(), VenueFormError> {
        if self.name.trim().is_empty()
            || self.description.trim().is_empty()
            || self.price <= 0.0
            || self.max_guests == 0
        {
            return Err(VenueFormError::MissingFields);
        }
        Ok(())
    }

    pub fn to_input(&self) -> VenueInput {
        VenueInput {
            name: Some(self.name.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            media: Some(self.images.as_slice().to_vec()),
            price: Some(self.price),
            max_guests: Some(self.max_guests),
            rating: Some(f64::from(self.rating)),
            meta: Some(self.meta.clone()),
            location: Some(self.location.clone()),
        }
    }
}

/// Creates the venue for the logged-in user
pub async fn create_venue<G>(
    gateway: &G,
    session: Option<&Session>,
    draft: &VenueDraft,
) -> Result<Venue, VenueFormError>
where
    G: VenueGateway + ?Sized,
{
    if session.is_none() {
        return Err(VenueFormError::NotLoggedIn);
    }
    draft.validate()?;

    let venue = gateway.create_venue(&draft.to_input()).await.map_err(|err| {
        warn!("Failed to create venue: {}", err);
        VenueFormError::from(err)
    })?;
    info!("Created venue {} ({})", venue.name, venue.id);
    Ok(venue)
}

/// Manage-venue form: edits description, images, price and capacity of an
/// existing venue, with a two-step delete
#[derive(Debug, Clone, PartialEq)]
pub struct VenueUpdateForm {
    venue_id: String,
    pub description: String,
    pub images: ImageList,
    price: f64,
    max_guests: u32,
    confirm_delete: bool,
}

impl VenueUpdateForm {
    /// Seeds the form with the venue's stored values; the caps apply only
    /// to values entered through the setters
    pub fn from_venue(venue: &Venue) -> Self {
        Self {
            venue_id: venue.id.clone(),
            description: venue.description.clone(),
            images: ImageList::from_media(venue.media.clone()),
            price: venue.price,
            max_guests: venue.max_guests,
            confirm_delete: false,
        }
    }

    pub fn venue_id(&self) -> &str {
        &self.venue_id
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn max_guests(&self) -> u32 {
        self.max_guests
    }

    pub fn set_price(&mut self, price: f64) -> f64 {
        self.price = cap_price(price);
        self.price
    }

    pub fn set_max_guests(&mut self, requested: i64) -> u32 {
        self.max_guests = clamp_max_guests(requested);
        self.max_guests
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.confirm_delete
    }

    pub fn request_delete(&mut self) {
        self.confirm_delete = true;
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = false;
    }

    /// Closing the form always leaves the delete confirmation
    pub fn close(&mut self) {
        self.confirm_delete = false;
    }

    pub fn to_input(&self) -> VenueInput {
        VenueInput {
            description: Some(self.description.clone()),
            media: Some(self.images.as_slice().to_vec()),
            price: Some(self.price),
            max_guests: Some(self.max_guests),
            ..Default::default()
        }
    }

    pub async fn submit<G>(&self, gateway: &G) -> Result<Venue, VenueFormError>
    where
        G: VenueGateway + ?Sized,
    {
        let venue = gateway
            .update_venue(&self.venue_id, &self.to_input())
            .await
            .map_err(|err| {
                warn!("Failed to update venue {}: {}", self.venue_id, err);
                VenueFormError::from(err)
            })?;
        info!("Updated venue {}", venue.id);
        Ok(venue)
    }

    /// Deletes the venue; only valid while the confirmation is showing
    pub async fn delete<G>(&mut self, gateway: &G) -> Result<(), VenueFormError>
    where
        G: VenueGateway + ?Sized,
    {
        if !self.confirm_delete {
            return Err(VenueFormError::DeleteNotConfirmed);
        }
        gateway.delete_venue(&self.venue_id).await.map_err(|err| {
            warn!("Failed to delete venue {}: {}", self.venue_id, err);
            VenueFormError::from(err)
        })?;
        info!("Deleted venue {}", self.venue_id);
        self.confirm_delete = false;
        Ok(())
    }
}
