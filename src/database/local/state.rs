use std::path::Path;
use std::str::FromStr;

use log::debug;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

/// Client-side key/value state, the counterpart of browser local storage
pub struct StateDb(pub SqlitePool);

/*
 * Opens (creating if needed) the state database at `db_path`. Only the
 * session lives here; venues and bookings are never cached locally.
 */
pub async fn init_state_db(db_path: &Path) -> Result<StateDb, String> {
    if let Some(dir) = db_path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| {
            format!("Failed to create state dir {}: {}", dir.display(), e)
        })?;
    }

    let connect_options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(connect_options)
        .await
        .map_err(|e| {
            format!(
                "Failed to connect to state database at {}: {}",
                db_path.display(),
                e
            )
        })?;

    debug!("state database opened at {}", db_path.display());
    create_tables(&pool).await?;
    Ok(StateDb(pool))
}

/// Private in-memory state database, gone when the pool closes
pub async fn init_memory_state_db() -> Result<StateDb, String> {
    let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(|e| format!("Invalid in-memory database url: {}", e))?;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(connect_options)
        .await
        .map_err(|e| format!("Failed to open in-memory state database: {}", e))?;

    create_tables(&pool).await?;
    Ok(StateDb(pool))
}

async fn create_tables(pool: &SqlitePool) -> Result<(), String> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS auth_session (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| format!("Failed to initialize auth session table: {}", e))?;
    Ok(())
}
