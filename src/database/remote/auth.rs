// Remote auth endpoints

use serde::Serialize;

use super::common::{ApiError, HolidazeClient};
use crate::models::profiles::AuthenticatedProfile;
use crate::models::venues::Media;

#[derive(Serialize)]
struct LoginPayload<'a> {
    email: &'a str,
    password: &'a str,
}

/// Payload for `POST /auth/register`; optional fields are left out when unset
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_manager: Option<bool>,
}

/// Log in and return the profile together with its access token
pub async fn login(
    client: &HolidazeClient,
    email: &str,
    password: &str,
) -> Result<AuthenticatedProfile, ApiError> {
    client
        .post(&client.auth_url("login"), &LoginPayload { email, password })
        .await
}

/// Register a profile. The API returns no token here, so callers log in next.
pub async fn register(client: &HolidazeClient, payload: &RegisterPayload) -> Result<(), ApiError> {
    client.post_unit(&client.auth_url("register"), payload).await
}
