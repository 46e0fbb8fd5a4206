//! Application configuration

use std::path::PathBuf;

use log::warn;

use crate::booking::cost::SingleDayPolicy;

pub const DEFAULT_API_URL: &str = "https://v2.api.noroff.dev";

pub const API_URL_VAR: &str = "HOLIDAZE_API_URL";
pub const API_KEY_VAR: &str = "HOLIDAZE_API_KEY";
pub const STATE_DB_VAR: &str = "HOLIDAZE_STATE_DB";
pub const SINGLE_DAY_VAR: &str = "HOLIDAZE_SINGLE_DAY";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the REST API, without the `/holidaze` suffix
    pub api_url: String,
    /// Value of the vendor API-key header
    pub api_key: String,
    /// Where the session state database lives
    pub state_db_path: PathBuf,
    pub single_day_policy: SingleDayPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = get(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let api_key = get(API_KEY_VAR).unwrap_or_else(|| {
            warn!("{} is not set; venue and booking calls will be rejected", API_KEY_VAR);
            String::new()
        });

        let state_db_path = match get(STATE_DB_VAR) {
            Some(path) => PathBuf::from(path),
            None => default_state_db_path()?,
        };

        let single_day_policy = match get(SINGLE_DAY_VAR) {
            Some(raw) => raw.parse()?,
            None => SingleDayPolicy::default(),
        };

        Ok(Self {
            api_url,
            api_key,
            state_db_path,
            single_day_policy,
        })
    }
}

/// `<config dir>/holidaze/state.db`, falling back to `~/.holidaze/state.db`
pub fn default_state_db_path() -> Result<PathBuf, String> {
    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("holidaze").join("state.db"));
    }
    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(".holidaze").join("state.db"));
    }
    Err("Could not determine a directory for the state database".to_string())
}
