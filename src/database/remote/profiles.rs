// Remote operations for profiles

use super::common::{ApiError, HolidazeClient};
use crate::models::profiles::{Profile, ProfileUpdate};

/// Fetch a profile with its venues and bookings
pub async fn get_profile(client: &HolidazeClient, name: &str) -> Result<Profile, ApiError> {
    client.require_access_token()?;
    let url = client.holidaze_endpoint(&["profiles", name], Some("_venues=true&_bookings=true"))?;
    client.get(&url).await
}

pub async fn update_profile(
    client: &HolidazeClient,
    name: &str,
    update: &ProfileUpdate,
) -> Result<Profile, ApiError> {
    client.require_access_token()?;
    let url = client.holidaze_endpoint(&["profiles", name], None)?;
    client.put(&url, update).await
}
