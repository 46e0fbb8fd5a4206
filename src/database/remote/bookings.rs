// Remote CRUD operations for bookings

use super::common::{ApiError, HolidazeClient};
use crate::models::bookings::{Booking, BookingInput};

/// Create a booking; `input.venue_id` must be set
pub async fn create_booking(
    client: &HolidazeClient,
    input: &BookingInput,
) -> Result<Booking, ApiError> {
    client.require_access_token()?;
    client.post(&client.holidaze_url("bookings"), input).await
}

/// Move an existing booking to new dates and guest count
pub async fn update_booking(
    client: &HolidazeClient,
    id: &str,
    input: &BookingInput,
) -> Result<Booking, ApiError> {
    client.require_access_token()?;
    let payload = BookingInput {
        venue_id: None,
        ..input.clone()
    };
    let url = client.holidaze_endpoint(&["bookings", id], None)?;
    client.put(&url, &payload).await
}

/// Delete a booking; succeeds only on 204
pub async fn delete_booking(client: &HolidazeClient, id: &str) -> Result<(), ApiError> {
    client.require_access_token()?;
    let url = client.holidaze_endpoint(&["bookings", id], None)?;
    client.delete(&url).await
}
