//! Command-line front end over the page controllers

pub mod auth;
pub mod bookings;
pub mod profile;
pub mod venues;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use log::debug;
use serde::Serialize;

use crate::config::AppConfig;
use crate::database::local::{init_state_db, StateDb};
use crate::database::remote::HolidazeClient;
use crate::services::session::{self, Session};

#[derive(Parser)]
#[command(name = "holidaze")]
#[command(about = "Browse venues, book stays and manage listings on Holidaze", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Treat this day as today when checking dates (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Browse and manage venues")]
    Venues {
        #[command(subcommand)]
        command: venues::VenueCommand,
    },

    #[command(about = "Create, change or cancel bookings")]
    Bookings {
        #[command(subcommand)]
        command: bookings::BookingCommand,
    },

    #[command(about = "Log in, register or log out")]
    Auth {
        #[command(subcommand)]
        command: auth::AuthCommand,
    },

    #[command(about = "View or edit your profile")]
    Profile {
        #[command(subcommand)]
        command: profile::ProfileCommand,
    },
}

/// Everything a command handler needs, built once per invocation
pub struct AppState {
    pub config: AppConfig,
    pub state_db: StateDb,
    pub session: Option<Session>,
    pub today: NaiveDate,
    pub json: bool,
    base_client: HolidazeClient,
}

impl AppState {
    pub async fn init(config: AppConfig, today: NaiveDate, json: bool) -> Result<Self, String> {
        let state_db = init_state_db(&config.state_db_path).await?;
        let session = session::restore(&state_db.0).await?;
        debug!(
            "session: {}",
            session
                .as_ref()
                .map(|s| s.user.name.as_str())
                .unwrap_or("none")
        );
        let base_client = HolidazeClient::from_config(&config);
        Ok(Self {
            config,
            state_db,
            session,
            today,
            json,
            base_client,
        })
    }

    /// Client carrying the session token when logged in
    pub fn client(&self) -> HolidazeClient {
        match &self.session {
            Some(session) => session.client(&self.base_client),
            None => self.base_client.clone(),
        }
    }

    pub fn require_session(&self) -> Result<&Session, String> {
        self.session
            .as_ref()
            .ok_or_else(|| "You need to log in first (holidaze auth login)".to_string())
    }

    /// Prints `value` as JSON, or `text` when JSON output is off
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<(), String> {
        if self.json {
            let out = serde_json::to_string_pretty(value)
                .map_err(|e| format!("Failed to encode output: {}", e))?;
            println!("{}", out);
        } else {
            println!("{}", text());
        }
        Ok(())
    }
}

pub async fn run(cli: Cli) -> Result<(), String> {
    let config = AppConfig::from_env()?;
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let mut state = AppState::init(config, today, cli.json).await?;

    match cli.command {
        Commands::Venues { command } => venues::handle(&mut state, command).await,
        Commands::Bookings { command } => bookings::handle(&mut state, command).await,
        Commands::Auth { command } => auth::handle(&mut state, command).await,
        Commands::Profile { command } => profile::handle(&mut state, command).await,
    }
}
