use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::bookings::Booking;
use super::venues::{Media, Venue};

/// Profile reference embedded as a venue owner or booking customer
#[derive(TS, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "holidaze.ts")]
pub struct ProfileSummary {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<Media>,
    #[serde(default)]
    pub banner: Option<Media>,
}

/// Full profile from `GET /holidaze/profiles/{name}`
#[derive(TS, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "holidaze.ts")]
#[ts(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<Media>,
    #[serde(default)]
    pub banner: Option<Media>,
    #[serde(default)]
    pub venue_manager: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venues: Option<Vec<Venue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookings: Option<Vec<Booking>>,
    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<ProfileCount>,
}

impl Profile {
    /// First word of the name, used for greetings
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[derive(TS, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[ts(export, export_to = "holidaze.ts")]
pub struct ProfileCount {
    #[serde(default)]
    pub venues: u32,
    #[serde(default)]
    pub bookings: u32,
}

/// Body for `PUT /holidaze/profiles/{name}`
#[derive(TS, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "holidaze.ts")]
#[ts(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_manager: Option<bool>,
}

/// Profile returned by `POST /auth/login`, carrying the access token
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedProfile {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<Media>,
    #[serde(default)]
    pub banner: Option<Media>,
    #[serde(default)]
    pub venue_manager: bool,
    pub access_token: String,
}

impl AuthenticatedProfile {
    /// Splits the login payload into the stored user record and the token
    pub fn into_parts(self) -> (Profile, String) {
        let profile = Profile {
            name: self.name,
            email: self.email,
            bio: self.bio,
            avatar: self.avatar,
            banner: self.banner,
            venue_manager: self.venue_manager,
            ..Default::default()
        };
        (profile, self.access_token)
    }
}
