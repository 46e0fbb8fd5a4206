// Seams between controllers and the remote API

use async_trait::async_trait;

use super::common::{ApiError, HolidazeClient};
use super::{bookings, venues};
use crate::models::bookings::{Booking, BookingInput};
use crate::models::venues::{Venue, VenueInput};

#[async_trait]
pub trait BookingGateway: Send + Sync {
    async fn create_booking(&self, input: &BookingInput) -> Result<Booking, ApiError>;
    async fn update_booking(&self, id: &str, input: &BookingInput) -> Result<Booking, ApiError>;
    async fn delete_booking(&self, id: &str) -> Result<(), ApiError>;
}

#[async_trait]
pub trait VenueGateway: Send + Sync {
    async fn list_venues(&self) -> Result<Vec<Venue>, ApiError>;
    async fn fetch_venue(&self, id: &str) -> Result<Venue, ApiError>;
    async fn create_venue(&self, input: &VenueInput) -> Result<Venue, ApiError>;
    async fn update_venue(&self, id: &str, input: &VenueInput) -> Result<Venue, ApiError>;
    async fn delete_venue(&self, id: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl BookingGateway for HolidazeClient {
    async fn create_booking(&self, input: &BookingInput) -> Result<Booking, ApiError> {
        bookings::create_booking(self, input).await
    }

    async fn update_booking(&self, id: &str, input: &BookingInput) -> Result<Booking, ApiError> {
        bookings::update_booking(self, id, input).await
    }

    async fn delete_booking(&self, id: &str) -> Result<(), ApiError> {
        bookings::delete_booking(self, id).await
    }
}

#[async_trait]
impl VenueGateway for HolidazeClient {
    async fn list_venues(&self) -> Result<Vec<Venue>, ApiError> {
        venues::list_venues(self).await
    }

    async fn fetch_venue(&self, id: &str) -> Result<Venue, ApiError> {
        venues::get_venue(self, id).await
    }

    async fn create_venue(&self, input: &VenueInput) -> Result<Venue, ApiError> {
        venues::create_venue(self, input).await
    }

    async fn update_venue(&self, id: &str, input: &VenueInput) -> Result<Venue, ApiError> {
        venues::update_venue(self, id, input).await
    }

    async fn delete_venue(&self, id: &str) -> Result<(), ApiError> {
        venues::delete_venue(self, id).await
    }
}
