//! `holidaze auth ...`

use clap::Subcommand;

use super::AppState;
use crate::services::session::{self, RegisterForm};

#[derive(Subcommand)]
pub enum AuthCommand {
    #[command(about = "Log in with email and password")]
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    #[command(about = "Create a profile, then log in")]
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        bio: String,
        #[arg(long, default_value = "")]
        avatar_url: String,
        #[arg(long, default_value = "")]
        avatar_alt: String,
        #[arg(long, default_value = "")]
        banner_url: String,
        #[arg(long, default_value = "")]
        banner_alt: String,
        /// Register as a venue manager
        #[arg(long)]
        venue_manager: bool,
    },

    #[command(about = "Forget the stored session")]
    Logout,

    #[command(about = "Show who is logged in")]
    Whoami,
}

pub async fn handle(state: &mut AppState, command: AuthCommand) -> Result<(), String> {
    match command {
        AuthCommand::Login { email, password } => {
            let session =
                session::login(&state.client(), &state.state_db.0, &email, &password).await?;
            let greeting = format!("Welcome back, {}!", session.user.first_name());
            state.emit(&session.user, || greeting)?;
            state.session = Some(session);
            Ok(())
        }
        AuthCommand::Register {
            name,
            email,
            password,
            bio,
            avatar_url,
            avatar_alt,
            banner_url,
            banner_alt,
            venue_manager,
        } => {
            let form = RegisterForm {
                name,
                email,
                password,
                bio,
                avatar_url,
                avatar_alt,
                banner_url,
                banner_alt,
                venue_manager,
            };
            let session = session::register(&state.client(), &state.state_db.0, &form).await?;
            let greeting = format!("Welcome, {}!", session.user.first_name());
            state.emit(&session.user, || greeting)?;
            state.session = Some(session);
            Ok(())
        }
        AuthCommand::Logout => {
            session::logout(&state.state_db.0).await?;
            state.session = None;
            println!("Logged out");
            Ok(())
        }
        AuthCommand::Whoami => match &state.session {
            Some(session) => state.emit(&session.user, || {
                let role = if session.user.venue_manager {
                    "venue manager"
                } else {
                    "customer"
                };
                format!("{} <{}> ({})", session.user.name, session.user.email, role)
            }),
            None => {
                println!("Not logged in");
                Ok(())
            }
        },
    }
}
