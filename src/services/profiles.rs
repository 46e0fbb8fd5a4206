//! Profile page: fetch and the edit-profile form.

use log::info;
use sqlx::SqlitePool;

use crate::database::local::auth as auth_db;
use crate::database::remote::profiles as profiles_api;
use crate::database::remote::HolidazeClient;
use crate::models::profiles::{Profile, ProfileUpdate};
use crate::models::venues::Media;
use crate::services::session::Session;

pub const AVATAR_ALT: &str = "User avatar";
pub const BANNER_ALT: &str = "User banner";

/// Profile with its venues and bookings
pub async fn fetch_profile(client: &HolidazeClient, name: &str) -> Result<Profile, String> {
    profiles_api::get_profile(client, name)
        .await
        .map_err(|err| format!("Failed to load profile: {err}"))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileEditForm {
    pub bio: String,
    pub avatar_url: String,
    pub banner_url: String,
    /// Ask to become a venue manager
    pub upgrade: bool,
}

impl ProfileEditForm {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            bio: profile.bio.clone().unwrap_or_default(),
            avatar_url: profile
                .avatar
                .as_ref()
                .map(|m| m.url.clone())
                .unwrap_or_default(),
            banner_url: profile
                .banner
                .as_ref()
                .map(|m| m.url.clone())
                .unwrap_or_default(),
            upgrade: false,
        }
    }

    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            bio: Some(self.bio.clone()),
            avatar: Some(Media {
                url: self.avatar_url.clone(),
                alt: AVATAR_ALT.to_string(),
            }),
            banner: Some(Media {
                url: self.banner_url.clone(),
                alt: BANNER_ALT.to_string(),
            }),
            venue_manager: self.upgrade.then_some(true),
        }
    }

    /// Saves the session user's profile and refreshes the stored user record
    pub async fn submit(
        &self,
        client: &HolidazeClient,
        pool: &SqlitePool,
        session: &mut Session,
    ) -> Result<Profile, String> {
        let updated = profiles_api::update_profile(client, &session.user.name, &self.to_update())
            .await
            .map_err(|err| format!("Failed to update profile: {err}"))?;

        session.user = Profile {
            venues: None,
            bookings: None,
            count: None,
            ..updated.clone()
        };
        auth_db::store_user(pool, &session.user).await?;
        info!("Profile {} updated", updated.name);

        Ok(updated)
    }
}
