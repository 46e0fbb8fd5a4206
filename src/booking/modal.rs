//! Booking modal state machine
//!
//! ```text
//! Selecting --confirm ok--------------------------> Confirmed
//! Selecting --request_delete--> DeleteConfirm --ok--> Confirmed
//!                                   |
//!                                   +--cancel_delete--> Selecting
//! ```
//!
//! Failed remote calls leave the state where it was and keep the message for
//! inline display. Nothing is retried.

use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use super::availability::BookedDates;
use super::cost::{midnight_utc, CostComparison, CostQuote, SingleDayPolicy};
use super::selector::{DateRangeSelector, SelectedRange, SelectionError};
use crate::database::remote::{ApiError, BookingGateway};
use crate::models::bookings::{Booking, BookingInput};
use crate::models::venues::Venue;

#[derive(TS, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "holidaze.ts")]
pub enum ModalState {
    Selecting,
    DeleteConfirm,
    Confirmed,
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Please select the dates for your stay")]
    IncompleteSelection,
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("Log in to book this venue")]
    NotLoggedIn,
    #[error("No booking with id {0} on this venue")]
    UnknownBooking(String),
    #[error("Only an existing booking can be deleted")]
    NotEditing,
    #[error("Not available while the booking modal is {0:?}")]
    InvalidState(ModalState),
    #[error("The booking modal is not open")]
    ModalClosed,
    #[error(transparent)]
    Remote(#[from] ApiError),
}

/// What a successful remote call did, for the owner to patch its bookings
#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    Created(Booking),
    Updated {
        booking: Booking,
        comparison: CostComparison,
    },
    Deleted {
        id: String,
    },
}

/// Guest count limited to `[1, max_guests]`
pub fn clamp_guests(requested: i64, max_guests: u32) -> u32 {
    let max = i64::from(max_guests.max(1));
    requested.clamp(1, max) as u32
}

/// Snapshot handed to the view layer
#[derive(TS, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "holidaze.ts")]
#[ts(rename_all = "camelCase")]
pub struct ModalView {
    pub state: ModalState,
    pub editing: bool,
    pub title: String,
    pub selection: SelectedRange,
    pub guests: u32,
    pub max_guests: u32,
    pub total_cost: Option<CostQuote>,
    pub comparison: Option<CostComparison>,
    pub error: Option<String>,
    pub confirmation: Option<String>,
}

#[derive(Debug)]
pub struct BookingModal {
    venue_id: String,
    price: f64,
    max_guests: u32,
    policy: SingleDayPolicy,
    editing: Option<Booking>,
    selector: DateRangeSelector,
    guests: u32,
    state: ModalState,
    error: Option<String>,
    confirmation: Option<String>,
}

impl BookingModal {
    /// Modal for a new booking on `venue`
    pub fn create(
        venue: &Venue,
        booked: BookedDates,
        today: NaiveDate,
        policy: SingleDayPolicy,
    ) -> Self {
        Self {
            venue_id: venue.id.clone(),
            price: venue.price,
            max_guests: venue.max_guests,
            policy,
            editing: None,
            selector: DateRangeSelector::new(booked, today),
            guests: 1,
            state: ModalState::Selecting,
            error: None,
            confirmation: None,
        }
    }

    /// Modal seeded from an existing booking
    pub fn edit(
        venue: &Venue,
        booking: Booking,
        booked: BookedDates,
        today: NaiveDate,
        policy: SingleDayPolicy,
    ) -> Self {
        let mut modal = Self::create(venue, booked, today, policy);
        modal
            .selector
            .sync(SelectedRange::new(booking.first_day(), booking.last_day()));
        modal.guests = clamp_guests(i64::from(booking.guests), venue.max_guests);
        modal.editing = Some(booking);
        modal
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn editing(&self) -> Option<&Booking> {
        self.editing.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn guests(&self) -> u32 {
        self.guests
    }

    pub fn selection(&self) -> SelectedRange {
        self.selector.selection()
    }

    pub fn selector(&self) -> &DateRangeSelector {
        &self.selector
    }

    pub fn pick_day(&mut self, day: NaiveDate) -> Result<SelectedRange, BookingError> {
        self.require(ModalState::Selecting)?;
        let picked = self.selector.pick(day);
        self.record(picked.map_err(BookingError::from))
    }

    pub fn select_range(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<SelectedRange, BookingError> {
        self.require(ModalState::Selecting)?;
        let picked = self.selector.pick_range(start, end);
        self.record(picked.map_err(BookingError::from))
    }

    /// Adopts a range chosen elsewhere, replacing any stale selection
    pub fn on_date_change(&mut self, range: SelectedRange) {
        self.selector.sync(range);
    }

    pub fn set_guests(&mut self, requested: i64) -> u32 {
        self.guests = clamp_guests(requested, self.max_guests);
        self.guests
    }

    /// Total for a new booking, once both dates are chosen
    pub fn total_cost(&self) -> Option<CostQuote> {
        if self.editing.is_some() {
            return None;
        }
        let (start, end) = self.selection().bounds()?;
        Some(CostQuote::for_days(start, end, self.price, self.policy))
    }

    /// Original against new cost while editing, once both dates are chosen
    pub fn cost_comparison(&self) -> Option<CostComparison> {
        let booking = self.editing.as_ref()?;
        let updated = self.selection().bounds()?;
        Some(CostComparison::for_edit(
            (booking.first_day(), booking.last_day()),
            updated,
            self.price,
            self.policy,
        ))
    }

    /// Creates or updates the booking, depending on the editing pointer
    pub async fn confirm<G>(&mut self, gateway: &G) -> Result<BookingOutcome, BookingError>
    where
        G: BookingGateway + ?Sized,
    {
        self.require(ModalState::Selecting)?;

        let range = self.selector.finish();
        let Some((start, end)) = range.bounds() else {
            return self.record(Err(BookingError::IncompleteSelection));
        };

        let input = BookingInput {
            date_from: midnight_utc(start),
            date_to: midnight_utc(end),
            guests: self.guests,
            // an update never moves the booking to another venue
            venue_id: self.editing.is_none().then(|| self.venue_id.clone()),
        };

        let result = match &self.editing {
            None => gateway
                .create_booking(&input)
                .await
                .map(BookingOutcome::Created),
            Some(original) => {
                let comparison = CostComparison::for_edit(
                    (original.first_day(), original.last_day()),
                    (start, end),
                    self.price,
                    self.policy,
                );
                gateway
                    .update_booking(&original.id, &input)
                    .await
                    .map(|booking| BookingOutcome::Updated {
                        booking,
                        comparison,
                    })
            }
        };

        match result {
            Ok(outcome) => {
                let message = if self.editing.is_some() {
                    "Booking updated!"
                } else {
                    "Booking confirmed!"
                };
                info!("{} venue {} {} to {}", message, self.venue_id, start, end);
                self.finish_with(message);
                Ok(outcome)
            }
            Err(err) => {
                warn!("booking for venue {} failed: {}", self.venue_id, err);
                self.record(Err(err.into()))
            }
        }
    }

    pub fn request_delete(&mut self) -> Result<(), BookingError> {
        self.require(ModalState::Selecting)?;
        if self.editing.is_none() {
            return self.record(Err(BookingError::NotEditing));
        }
        self.error = None;
        self.state = ModalState::DeleteConfirm;
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        if self.state == ModalState::DeleteConfirm {
            self.error = None;
            self.state = ModalState::Selecting;
        }
    }

    /// Deletes the booking being edited; only valid after `request_delete`
    pub async fn delete<G>(&mut self, gateway: &G) -> Result<BookingOutcome, BookingError>
    where
        G: BookingGateway + ?Sized,
    {
        self.require(ModalState::DeleteConfirm)?;
        let Some(id) = self.editing.as_ref().map(|b| b.id.clone()) else {
            return self.record(Err(BookingError::NotEditing));
        };

        match gateway.delete_booking(&id).await {
            Ok(()) => {
                info!("booking {} deleted", id);
                self.finish_with("Booking deleted!");
                Ok(BookingOutcome::Deleted { id })
            }
            Err(err) => {
                warn!("deleting booking {} failed: {}", id, err);
                self.record(Err(err.into()))
            }
        }
    }

    pub fn view(&self) -> ModalView {
        ModalView {
            state: self.state,
            editing: self.is_editing(),
            title: if self.is_editing() {
                "Edit your booking".to_string()
            } else {
                "Confirm your booking".to_string()
            },
            selection: self.selection(),
            guests: self.guests,
            max_guests: self.max_guests,
            total_cost: self.total_cost(),
            comparison: self.cost_comparison(),
            error: self.error.clone(),
            confirmation: self.confirmation.clone(),
        }
    }

    fn require(&self, expected: ModalState) -> Result<(), BookingError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(BookingError::InvalidState(self.state))
        }
    }

    fn finish_with(&mut self, message: &str) {
        self.error = None;
        self.confirmation = Some(message.to_string());
        self.state = ModalState::Confirmed;
    }

    /// Keeps the failure message for inline display
    fn record<T>(&mut self, result: Result<T, BookingError>) -> Result<T, BookingError> {
        match &result {
            Ok(_) => self.error = None,
            Err(err) => self.error = Some(err.to_string()),
        }
        result
    }
}
