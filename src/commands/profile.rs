//! `holidaze profile ...`

use clap::Subcommand;

use super::AppState;
use crate::models::profiles::Profile;
use crate::services::profiles::{fetch_profile, ProfileEditForm};

#[derive(Subcommand)]
pub enum ProfileCommand {
    #[command(about = "Show a profile with its venues and bookings")]
    Show {
        /// Profile name; defaults to the logged-in user
        name: Option<String>,
    },

    #[command(about = "Edit your bio, avatar or banner")]
    Edit {
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        avatar_url: Option<String>,
        #[arg(long)]
        banner_url: Option<String>,
        /// Become a venue manager
        #[arg(long)]
        upgrade: bool,
    },
}

fn profile_text(profile: &Profile) -> String {
    let mut out = vec![format!("{} <{}>", profile.name, profile.email)];
    if profile.venue_manager {
        out.push("Venue manager".to_string());
    }
    if let Some(bio) = profile.bio.as_deref().filter(|b| !b.is_empty()) {
        out.push(bio.to_string());
    }

    if let Some(venues) = profile.venues.as_deref().filter(|v| !v.is_empty()) {
        out.push("Venues:".to_string());
        for venue in venues {
            out.push(format!("  {}  {}  ${} per night", venue.id, venue.name, venue.price));
        }
    }

    if let Some(bookings) = profile.bookings.as_deref().filter(|b| !b.is_empty()) {
        out.push("Bookings:".to_string());
        for booking in bookings {
            let venue = booking
                .venue
                .as_ref()
                .map(|v| v.name.as_str())
                .unwrap_or("unknown venue");
            out.push(format!(
                "  {}  {}  {} to {}  {} guests",
                booking.id,
                venue,
                booking.first_day(),
                booking.last_day(),
                booking.guests
            ));
        }
    }
    out.join("\n")
}

pub async fn handle(state: &mut AppState, command: ProfileCommand) -> Result<(), String> {
    match command {
        ProfileCommand::Show { name } => {
            let session = state.require_session()?;
            let name = name.unwrap_or_else(|| session.user.name.clone());
            let profile = fetch_profile(&state.client(), &name).await?;
            state.emit(&profile, || profile_text(&profile))
        }
        ProfileCommand::Edit {
            bio,
            avatar_url,
            banner_url,
            upgrade,
        } => {
            let client = state.client();
            let mut session = state.require_session()?.clone();
            let current = fetch_profile(&client, &session.user.name).await?;

            let mut form = ProfileEditForm::from_profile(&current);
            if let Some(bio) = bio {
                form.bio = bio;
            }
            if let Some(url) = avatar_url {
                form.avatar_url = url;
            }
            if let Some(url) = banner_url {
                form.banner_url = url;
            }
            form.upgrade = upgrade;

            let updated = form.submit(&client, &state.state_db.0, &mut session).await?;
            state.session = Some(session);
            state.emit(&updated, || format!("Profile {} updated", updated.name))
        }
    }
}
