use log::{debug, warn};
use sqlx::SqlitePool;

use crate::models::profiles::Profile;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const USER_KEY: &str = "user";

pub async fn get_session_item(pool: &SqlitePool, key: &str) -> Result<Option<String>, String> {
    sqlx::query_scalar::<_, String>("SELECT value FROM auth_session WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
        .map_err(|err| format!("Failed to read session: {err}"))
}

pub async fn set_session_item(pool: &SqlitePool, key: &str, value: &str) -> Result<(), String> {
    sqlx::query(
        "INSERT INTO auth_session (key, value) VALUES (?, ?)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await
    .map_err(|err| format!("Failed to store session: {err}"))?;
    Ok(())
}

pub async fn remove_session_item(pool: &SqlitePool, key: &str) -> Result<(), String> {
    sqlx::query("DELETE FROM auth_session WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await
        .map_err(|err| format!("Failed to remove session: {err}"))?;
    Ok(())
}

pub async fn get_current_access_token(pool: &SqlitePool) -> Result<Option<String>, String> {
    get_session_item(pool, ACCESS_TOKEN_KEY).await
}

/// Stored user record. A record that no longer parses is treated as absent.
pub async fn get_current_user(pool: &SqlitePool) -> Result<Option<Profile>, String> {
    let Some(user_json) = get_session_item(pool, USER_KEY).await? else {
        return Ok(None);
    };

    match serde_json::from_str::<Profile>(&user_json) {
        Ok(user) => Ok(Some(user)),
        Err(err) => {
            warn!("Stored user record is unreadable, ignoring it: {err}");
            Ok(None)
        }
    }
}

pub async fn store_user(pool: &SqlitePool, user: &Profile) -> Result<(), String> {
    let user_json =
        serde_json::to_string(user).map_err(|err| format!("Failed to encode user: {err}"))?;
    set_session_item(pool, USER_KEY, &user_json).await
}

pub async fn store_session(pool: &SqlitePool, token: &str, user: &Profile) -> Result<(), String> {
    set_session_item(pool, ACCESS_TOKEN_KEY, token).await?;
    store_user(pool, user).await?;
    debug!("session stored for {}", user.name);
    Ok(())
}

pub async fn clear_session(pool: &SqlitePool) -> Result<(), String> {
    remove_session_item(pool, ACCESS_TOKEN_KEY).await?;
    remove_session_item(pool, USER_KEY).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::local::state::init_memory_state_db;

    fn user(name: &str) -> Profile {
        Profile {
            name: name.to_string(),
            email: format!("{name}@stud.noroff.no"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn session_items_upsert_and_remove() {
        let db = init_memory_state_db().await.unwrap();

        assert_eq!(get_session_item(&db.0, "accessToken").await.unwrap(), None);
        set_session_item(&db.0, "accessToken", "one").await.unwrap();
        set_session_item(&db.0, "accessToken", "two").await.unwrap();
        assert_eq!(
            get_session_item(&db.0, "accessToken").await.unwrap(),
            Some("two".to_string())
        );

        remove_session_item(&db.0, "accessToken").await.unwrap();
        assert_eq!(get_session_item(&db.0, "accessToken").await.unwrap(), None);
    }

    #[tokio::test]
    async fn stored_session_round_trips_and_clears() {
        let db = init_memory_state_db().await.unwrap();
        store_session(&db.0, "tok", &user("kari")).await.unwrap();

        assert_eq!(
            get_current_access_token(&db.0).await.unwrap(),
            Some("tok".to_string())
        );
        assert_eq!(get_current_user(&db.0).await.unwrap().unwrap().name, "kari");

        clear_session(&db.0).await.unwrap();
        assert_eq!(get_current_access_token(&db.0).await.unwrap(), None);
        assert!(get_current_user(&db.0).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn garbage_user_record_reads_as_missing() {
        let db = init_memory_state_db().await.unwrap();
        set_session_item(&db.0, USER_KEY, "{not json").await.unwrap();
        assert!(get_current_user(&db.0).await.unwrap().is_none());
    }
}
