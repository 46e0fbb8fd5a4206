//! `holidaze bookings ...`

use chrono::NaiveDate;
use clap::Subcommand;

use super::AppState;
use crate::booking::modal::{BookingModal, BookingOutcome};
use crate::services::venue_detail::VenueDetailController;

#[derive(Subcommand)]
pub enum BookingCommand {
    #[command(about = "Book a venue")]
    Create {
        #[arg(long)]
        venue: String,
        /// First day of the stay (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,
        /// Last day of the stay; defaults to the first day
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long, default_value = "1")]
        guests: i64,
    },

    #[command(about = "Change the dates or guests of one of your bookings")]
    Update {
        #[arg(long)]
        venue: String,
        #[arg(long)]
        booking: String,
        /// New first day; keep the current dates when omitted
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
        /// Keep the current guest count when omitted
        #[arg(long)]
        guests: Option<i64>,
    },

    #[command(about = "Cancel one of your bookings")]
    Delete {
        #[arg(long)]
        venue: String,
        #[arg(long)]
        booking: String,
        /// Confirm the cancellation
        #[arg(long)]
        yes: bool,
    },
}

async fn load_page(state: &AppState, venue_id: &str) -> Result<VenueDetailController, String> {
    let viewer = state.require_session()?.summary();
    VenueDetailController::load(
        &state.client(),
        venue_id,
        Some(viewer),
        state.today,
        state.config.single_day_policy,
    )
    .await
    .map_err(|e| e.to_string())
}

fn select(modal: &mut BookingModal, from: NaiveDate, to: Option<NaiveDate>) -> Result<(), String> {
    match to {
        Some(to) => modal.select_range(from, to),
        None => modal.pick_day(from),
    }
    .map(|_| ())
    .map_err(|e| e.to_string())
}

pub async fn handle(state: &mut AppState, command: BookingCommand) -> Result<(), String> {
    match command {
        BookingCommand::Create {
            venue,
            from,
            to,
            guests,
        } => {
            let mut page = load_page(state, &venue).await?;
            let modal = page.open_new_booking().map_err(|e| e.to_string())?;
            select(modal, from, to)?;
            let guests = modal.set_guests(guests);

            let outcome = page
                .confirm_booking(&state.client())
                .await
                .map_err(|e| e.to_string())?;
            let view = page.modal().map(BookingModal::view);

            let BookingOutcome::Created(booking) = outcome else {
                return Err("Unexpected booking result".to_string());
            };
            state.emit(&view, || {
                let mut lines = vec![format!(
                    "Booking confirmed! {} to {} for {} guests at {}",
                    booking.first_day(),
                    booking.last_day(),
                    guests,
                    page.venue().name
                )];
                if let Some(quote) = view.as_ref().and_then(|v| v.total_cost) {
                    lines.push(format!(
                        "Total: ${} ({} nights)",
                        quote.total, quote.nights
                    ));
                }
                lines.join("\n")
            })
        }
        BookingCommand::Update {
            venue,
            booking,
            from,
            to,
            guests,
        } => {
            let mut page = load_page(state, &venue).await?;
            let modal = page.edit_booking(&booking).map_err(|e| e.to_string())?;
            if let Some(from) = from {
                select(modal, from, to)?;
            }
            if let Some(guests) = guests {
                modal.set_guests(guests);
            }

            let outcome = page
                .confirm_booking(&state.client())
                .await
                .map_err(|e| e.to_string())?;
            let BookingOutcome::Updated { booking, comparison } = outcome else {
                return Err("Unexpected booking result".to_string());
            };
            state.emit(&comparison, || {
                format!(
                    "Booking updated! {} to {}\n{}",
                    booking.first_day(),
                    booking.last_day(),
                    comparison
                )
            })
        }
        BookingCommand::Delete {
            venue,
            booking,
            yes,
        } => {
            let mut page = load_page(state, &venue).await?;
            page.edit_booking(&booking).map_err(|e| e.to_string())?;
            page.request_delete().map_err(|e| e.to_string())?;
            if !yes {
                page.cancel_delete();
                println!("Re-run with --yes to cancel booking {}", booking);
                return Ok(());
            }
            page.delete_booking(&state.client())
                .await
                .map_err(|e| e.to_string())?;
            println!("Booking deleted!");
            Ok(())
        }
    }
}
