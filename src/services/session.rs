//! Login, registration and the persisted session.

use log::{info, warn};
use sqlx::SqlitePool;

use crate::database::local::auth as auth_db;
use crate::database::remote::auth as auth_api;
use crate::database::remote::auth::RegisterPayload;
use crate::database::remote::{ApiError, HolidazeClient};
use crate::models::profiles::{Profile, ProfileSummary};
use crate::models::venues::Media;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub user: Profile,
}

impl Session {
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            name: self.user.name.clone(),
            email: self.user.email.clone(),
            bio: self.user.bio.clone(),
            avatar: self.user.avatar.clone(),
            banner: self.user.banner.clone(),
        }
    }

    /// Client carrying this session's bearer token
    pub fn client(&self, base: &HolidazeClient) -> HolidazeClient {
        base.clone()
            .with_access_token(Some(self.access_token.clone()))
    }
}

/// Registration form fields as typed by the user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub bio: String,
    pub avatar_url: String,
    pub avatar_alt: String,
    pub banner_url: String,
    pub banner_alt: String,
    pub venue_manager: bool,
}

fn media_field(url: &str, alt: &str) -> Option<Media> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    Some(Media {
        url: url.to_string(),
        alt: alt.trim().to_string(),
    })
}

impl RegisterForm {
    /// Optional fields are only sent when filled in
    pub fn to_payload(&self) -> RegisterPayload {
        let bio = self.bio.trim();
        RegisterPayload {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            bio: (!bio.is_empty()).then(|| bio.to_string()),
            avatar: media_field(&self.avatar_url, &self.avatar_alt),
            banner: media_field(&self.banner_url, &self.banner_alt),
            venue_manager: self.venue_manager.then_some(true),
        }
    }
}

/// The API's own message where it sent one, otherwise `fallback`
fn auth_error(err: ApiError, fallback: &str) -> String {
    match err {
        ApiError::Api { message, .. } if !message.trim().is_empty() => message,
        other => {
            warn!("{}: {}", fallback, other);
            fallback.to_string()
        }
    }
}

/// Stored session, if a token exists
pub async fn restore(pool: &SqlitePool) -> Result<Option<Session>, String> {
    let Some(access_token) = auth_db::get_current_access_token(pool).await? else {
        return Ok(None);
    };
    let Some(user) = auth_db::get_current_user(pool).await? else {
        warn!("Access token stored without a user record");
        return Ok(None);
    };
    Ok(Some(Session { access_token, user }))
}

pub async fn login(
    client: &HolidazeClient,
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<Session, String> {
    let authenticated = auth_api::login(client, email.trim(), password)
        .await
        .map_err(|err| auth_error(err, "Login failed"))?;

    let (user, access_token) = authenticated.into_parts();
    auth_db::store_session(pool, &access_token, &user).await?;
    info!("Logged in as {}", user.name);

    Ok(Session { access_token, user })
}

/// Registers the profile, then logs in with the same credentials
pub async fn register(
    client: &HolidazeClient,
    pool: &SqlitePool,
    form: &RegisterForm,
) -> Result<Session, String> {
    let payload = form.to_payload();
    auth_api::register(client, &payload)
        .await
        .map_err(|err| auth_error(err, "Authentication failed"))?;
    info!("Registered {}", payload.name);

    login(client, pool, &payload.email, &payload.password).await
}

pub async fn logout(pool: &SqlitePool) -> Result<(), String> {
    auth_db::clear_session(pool).await?;
    info!("Logged out");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::local::init_memory_state_db;

    #[test]
    fn blank_optional_fields_are_left_out() {
        let form = RegisterForm {
            name: " kari ".to_string(),
            email: "kari@stud.noroff.no".to_string(),
            password: "hunter22".to_string(),
            bio: "   ".to_string(),
            avatar_url: "https://img.example/kari.png".to_string(),
            banner_url: " ".to_string(),
            banner_alt: "ignored".to_string(),
            ..Default::default()
        };

        let payload = form.to_payload();
        assert_eq!(payload.name, "kari");
        assert_eq!(payload.bio, None);
        assert_eq!(
            payload.avatar,
            Some(Media {
                url: "https://img.example/kari.png".to_string(),
                alt: String::new(),
            })
        );
        assert_eq!(payload.banner, None);
        assert_eq!(payload.venue_manager, None);

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("banner").is_none());
        assert!(json.get("venueManager").is_none());
    }

    #[test]
    fn venue_manager_is_sent_only_when_set() {
        let form = RegisterForm {
            venue_manager: true,
            ..Default::default()
        };
        assert_eq!(form.to_payload().venue_manager, Some(true));
    }

    #[test]
    fn auth_errors_prefer_api_message() {
        let err = ApiError::Api {
            status: 400,
            message: "Profile already exists".to_string(),
        };
        assert_eq!(auth_error(err, "Login failed"), "Profile already exists");
        assert_eq!(
            auth_error(ApiError::RequestFailed("refused".into()), "Login failed"),
            "Login failed"
        );
        let blank = ApiError::Api {
            status: 500,
            message: " ".to_string(),
        };
        assert_eq!(auth_error(blank, "Authentication failed"), "Authentication failed");
    }

    #[tokio::test]
    async fn restore_needs_a_token() {
        let state = init_memory_state_db().await.unwrap();
        assert_eq!(restore(&state.0).await.unwrap(), None);

        let user = Profile {
            name: "kari".to_string(),
            ..Default::default()
        };
        auth_db::store_user(&state.0, &user).await.unwrap();
        assert_eq!(restore(&state.0).await.unwrap(), None);

        auth_db::store_session(&state.0, "token-1", &user).await.unwrap();
        let session = restore(&state.0).await.unwrap().unwrap();
        assert_eq!(session.access_token, "token-1");
        assert_eq!(session.summary().name, "kari");

        logout(&state.0).await.unwrap();
        assert_eq!(restore(&state.0).await.unwrap(), None);
    }

    #[test]
    fn session_client_carries_token() {
        let session = Session {
            access_token: "t".to_string(),
            user: Profile::default(),
        };
        let base = HolidazeClient::new("http://localhost", "key");
        assert!(!base.has_access_token());
        assert!(session.client(&base).has_access_token());
    }
}
