// Remote CRUD operations for venues

use super::common::{ApiError, HolidazeClient};
use crate::models::venues::{Venue, VenueInput};

/// List venues, newest first
pub async fn list_venues(client: &HolidazeClient) -> Result<Vec<Venue>, ApiError> {
    client
        .get(&client.holidaze_url("venues?sort=created&sortOrder=desc"))
        .await
}

/// Fetch a single venue with its owner and bookings
pub async fn get_venue(client: &HolidazeClient, id: &str) -> Result<Venue, ApiError> {
    let url = client.holidaze_endpoint(&["venues", id], Some("_owner=true&_bookings=true"))?;
    client.get(&url).await
}

/// Create a venue owned by the session user
pub async fn create_venue(client: &HolidazeClient, input: &VenueInput) -> Result<Venue, ApiError> {
    client.require_access_token()?;
    client.post(&client.holidaze_url("venues"), input).await
}

/// Update an existing venue; only the fields set on `input` are sent
pub async fn update_venue(
    client: &HolidazeClient,
    id: &str,
    input: &VenueInput,
) -> Result<Venue, ApiError> {
    client.require_access_token()?;
    let url = client.holidaze_endpoint(&["venues", id], None)?;
    client.put(&url, input).await
}

/// Delete a venue
pub async fn delete_venue(client: &HolidazeClient, id: &str) -> Result<(), ApiError> {
    client.require_access_token()?;
    let url = client.holidaze_endpoint(&["venues", id], None)?;
    client.delete(&url).await
}
