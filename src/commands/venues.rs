//! `holidaze venues ...`

use clap::Subcommand;
use serde_json::json;

use super::AppState;
use crate::database::remote::VenueGateway;
use crate::models::venues::Venue;
use crate::services::venue_detail::VenueDetailController;
use crate::services::venue_editor::{self, VenueDraft, VenueUpdateForm};
use crate::services::venues::{list_venue_cards, VenueCard};

#[derive(Subcommand)]
pub enum VenueCommand {
    #[command(about = "List venues, newest first")]
    List,

    #[command(about = "Show a venue with its booked dates")]
    Show { id: String },

    #[command(about = "Create a venue (venue managers)")]
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        /// Price per night, capped at 10000
        #[arg(long)]
        price: f64,
        /// Capacity, 1 to 100
        #[arg(long, default_value = "1")]
        max_guests: i64,
        /// Star rating, 0 to 5
        #[arg(long, default_value = "0")]
        rating: u8,
        /// Image URL; repeat for more (at most 8)
        #[arg(long = "image")]
        images: Vec<String>,
        /// Alt text for the image at the same position
        #[arg(long = "image-alt")]
        image_alts: Vec<String>,
        #[arg(long)]
        wifi: bool,
        #[arg(long)]
        parking: bool,
        #[arg(long)]
        breakfast: bool,
        #[arg(long)]
        pets: bool,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        continent: Option<String>,
    },

    #[command(about = "Change description, images, price or capacity of your venue")]
    Update {
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        max_guests: Option<i64>,
        /// Add an image URL; repeat for more
        #[arg(long = "add-image")]
        add_images: Vec<String>,
        /// Remove the image at this position (0-based)
        #[arg(long = "remove-image")]
        remove_images: Vec<usize>,
    },

    #[command(about = "Delete your venue")]
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

fn card_text(card: &VenueCard) -> String {
    let mut line = format!(
        "{}  {}  ${} per night  up to {} guests  {:.1}*",
        card.id, card.name, card.price, card.max_guests, card.rating
    );
    if !card.location.is_empty() {
        line.push_str(&format!("  ({})", card.location.join(", ")));
    }
    line
}

fn venue_text(page: &VenueDetailController) -> String {
    let venue = page.venue();
    let mut out = vec![
        venue.name.clone(),
        venue.description.clone(),
        format!(
            "${} per night, up to {} guests, rated {:.1}",
            venue.price, venue.max_guests, venue.rating
        ),
    ];
    let location = venue.location.display_lines();
    if !location.is_empty() {
        out.push(location.join(", "));
    }
    let amenities = venue.amenities();
    if !amenities.is_empty() {
        out.push(format!("Amenities: {}", amenities.join(", ")));
    }
    if let Some(owner) = &venue.owner {
        out.push(format!("Hosted by {}", owner.name));
    }

    let booked = page.booked_dates();
    if booked.is_empty() {
        out.push("No booked dates".to_string());
    } else {
        out.push("Booked:".to_string());
        for (from, to) in booked.ranges() {
            out.push(format!("  {} to {}", from, to));
        }
    }

    let mine = page.user_bookings();
    if !mine.is_empty() {
        out.push("Your bookings:".to_string());
        for b in mine {
            out.push(format!(
                "  {}  {} to {}  {} guests",
                b.id,
                b.first_day(),
                b.last_day(),
                b.guests
            ));
        }
    }
    out.join("\n")
}

async fn owned_venue(state: &AppState, id: &str) -> Result<Venue, String> {
    let session = state.require_session()?;
    let venue = state
        .client()
        .fetch_venue(id)
        .await
        .map_err(|e| e.to_string())?;
    if !venue.is_owned_by(&session.user.name) {
        return Err(format!("{} is not one of your venues", venue.name));
    }
    Ok(venue)
}

pub async fn handle(state: &mut AppState, command: VenueCommand) -> Result<(), String> {
    match command {
        VenueCommand::List => {
            let cards = list_venue_cards(&state.client()).await?;
            state.emit(&cards, || {
                cards.iter().map(card_text).collect::<Vec<_>>().join("\n")
            })
        }
        VenueCommand::Show { id } => {
            let viewer = state.session.as_ref().map(|s| s.summary());
            let page = VenueDetailController::load(
                &state.client(),
                &id,
                viewer,
                state.today,
                state.config.single_day_policy,
            )
            .await
            .map_err(|e| e.to_string())?;

            let value = json!({
                "venue": page.venue(),
                "bookings": page.bookings(),
                "bookedRanges": page.booked_dates().ranges(),
            });
            state.emit(&value, || venue_text(&page))
        }
        VenueCommand::Create {
            name,
            description,
            price,
            max_guests,
            rating,
            images,
            image_alts,
            wifi,
            parking,
            breakfast,
            pets,
            address,
            city,
            country,
            continent,
        } => {
            let mut draft = VenueDraft::new(name, description);
            draft.set_price(price);
            draft.set_max_guests(max_guests);
            draft.set_rating(rating);
            for (i, url) in images.iter().enumerate() {
                let alt = image_alts.get(i).map(String::as_str).unwrap_or("");
                draft.images.add(url, alt).map_err(|e| e.to_string())?;
            }
            draft.meta.wifi = wifi;
            draft.meta.parking = parking;
            draft.meta.breakfast = breakfast;
            draft.meta.pets = pets;
            draft.location.address = address;
            draft.location.city = city;
            draft.location.country = country;
            draft.location.continent = continent;

            let venue =
                venue_editor::create_venue(&state.client(), state.session.as_ref(), &draft)
                    .await
                    .map_err(|e| e.to_string())?;
            state.emit(&venue, || format!("Created {} ({})", venue.name, venue.id))
        }
        VenueCommand::Update {
            id,
            description,
            price,
            max_guests,
            add_images,
            mut remove_images,
        } => {
            let venue = owned_venue(state, &id).await?;
            let mut form = VenueUpdateForm::from_venue(&venue);

            if let Some(description) = description {
                form.description = description;
            }
            if let Some(price) = price {
                form.set_price(price);
            }
            if let Some(max_guests) = max_guests {
                form.set_max_guests(max_guests);
            }
            // highest index first; a removal shifts every later position
            remove_images.sort_unstable_by(|a, b| b.cmp(a));
            remove_images.dedup();
            for index in remove_images {
                if form.images.remove(index).is_none() {
                    return Err(format!("No image at position {}", index));
                }
            }
            for url in &add_images {
                form.images.add(url, "").map_err(|e| e.to_string())?;
            }

            let updated = form
                .submit(&state.client())
                .await
                .map_err(|e| e.to_string())?;
            state.emit(&updated, || format!("Updated {}", updated.name))
        }
        VenueCommand::Delete { id, yes } => {
            let venue = owned_venue(state, &id).await?;
            let mut form = VenueUpdateForm::from_venue(&venue);
            if !yes {
                println!(
                    "This permanently deletes {}. Re-run with --yes to confirm.",
                    venue.name
                );
                return Ok(());
            }
            form.request_delete();
            form.delete(&state.client())
                .await
                .map_err(|e| e.to_string())?;
            println!("Deleted {}", venue.name);
            Ok(())
        }
    }
}
