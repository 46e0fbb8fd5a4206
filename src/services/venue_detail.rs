//! Venue detail page state: the venue, its bookings and the booking modal.

use chrono::NaiveDate;
use log::{debug, info};

use crate::booking::availability::BookedDates;
use crate::booking::cost::SingleDayPolicy;
use crate::booking::modal::{BookingError, BookingModal, BookingOutcome};
use crate::database::remote::{ApiError, BookingGateway, VenueGateway};
use crate::models::bookings::Booking;
use crate::models::profiles::ProfileSummary;
use crate::models::venues::Venue;

/// Page controller for one venue visit.
///
/// Bookings are fetched once on load and then patched in place after each
/// successful mutation; the server copy is not re-read until the next load.
#[derive(Debug)]
pub struct VenueDetailController {
    venue: Venue,
    bookings: Vec<Booking>,
    viewer: Option<ProfileSummary>,
    today: NaiveDate,
    policy: SingleDayPolicy,
    modal: Option<BookingModal>,
}

impl VenueDetailController {
    pub async fn load<G>(
        gateway: &G,
        venue_id: &str,
        viewer: Option<ProfileSummary>,
        today: NaiveDate,
        policy: SingleDayPolicy,
    ) -> Result<Self, ApiError>
    where
        G: VenueGateway + ?Sized,
    {
        let venue = gateway.fetch_venue(venue_id).await?;
        debug!(
            "loaded venue {} with {} bookings",
            venue.id,
            venue.bookings.as_ref().map(Vec::len).unwrap_or(0)
        );
        Ok(Self::from_venue(venue, viewer, today, policy))
    }

    pub fn from_venue(
        mut venue: Venue,
        viewer: Option<ProfileSummary>,
        today: NaiveDate,
        policy: SingleDayPolicy,
    ) -> Self {
        let bookings = venue.bookings.take().unwrap_or_default();
        Self {
            venue,
            bookings,
            viewer,
            today,
            policy,
            modal: None,
        }
    }

    pub fn venue(&self) -> &Venue {
        &self.venue
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn viewer(&self) -> Option<&ProfileSummary> {
        self.viewer.as_ref()
    }

    /// The viewer's own bookings on this venue
    pub fn user_bookings(&self) -> Vec<&Booking> {
        let Some(viewer) = &self.viewer else {
            return Vec::new();
        };
        self.bookings
            .iter()
            .filter(|b| b.is_made_by(&viewer.name))
            .collect()
    }

    pub fn booked_dates(&self) -> BookedDates {
        BookedDates::from_bookings(&self.bookings)
    }

    pub fn modal(&self) -> Option<&BookingModal> {
        self.modal.as_ref()
    }

    pub fn modal_mut(&mut self) -> Option<&mut BookingModal> {
        self.modal.as_mut()
    }

    pub fn open_new_booking(&mut self) -> Result<&mut BookingModal, BookingError> {
        if self.viewer.is_none() {
            return Err(BookingError::NotLoggedIn);
        }
        let modal = BookingModal::create(&self.venue, self.booked_dates(), self.today, self.policy);
        Ok(self.modal.insert(modal))
    }

    /// Opens the modal seeded with an existing booking. Every booking on the
    /// venue, this one included, stays blocked in the calendar.
    pub fn edit_booking(&mut self, booking_id: &str) -> Result<&mut BookingModal, BookingError> {
        if self.viewer.is_none() {
            return Err(BookingError::NotLoggedIn);
        }
        let booking = self
            .bookings
            .iter()
            .find(|b| b.id == booking_id)
            .cloned()
            .ok_or_else(|| BookingError::UnknownBooking(booking_id.to_string()))?;

        let modal = BookingModal::edit(
            &self.venue,
            booking,
            self.booked_dates(),
            self.today,
            self.policy,
        );
        Ok(self.modal.insert(modal))
    }

    /// Drops the modal along with its selection, guests and errors
    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub async fn confirm_booking<G>(&mut self, gateway: &G) -> Result<BookingOutcome, BookingError>
    where
        G: BookingGateway + ?Sized,
    {
        let modal = self.modal.as_mut().ok_or(BookingError::ModalClosed)?;
        let outcome = modal.confirm(gateway).await?;
        self.apply(&outcome);
        Ok(outcome)
    }

    pub fn request_delete(&mut self) -> Result<(), BookingError> {
        self.modal
            .as_mut()
            .ok_or(BookingError::ModalClosed)?
            .request_delete()
    }

    pub fn cancel_delete(&mut self) {
        if let Some(modal) = self.modal.as_mut() {
            modal.cancel_delete();
        }
    }

    pub async fn delete_booking<G>(&mut self, gateway: &G) -> Result<BookingOutcome, BookingError>
    where
        G: BookingGateway + ?Sized,
    {
        let modal = self.modal.as_mut().ok_or(BookingError::ModalClosed)?;
        let outcome = modal.delete(gateway).await?;
        self.apply(&outcome);
        Ok(outcome)
    }

    fn apply(&mut self, outcome: &BookingOutcome) {
        match outcome {
            BookingOutcome::Created(booking) => {
                let mut booking = booking.clone();
                booking.venue_id.get_or_insert_with(|| self.venue.id.clone());
                if booking.customer.is_none() {
                    booking.customer = self.viewer.clone();
                }
                info!("booking {} added to venue {}", booking.id, self.venue.id);
                self.bookings.push(booking);
            }
            BookingOutcome::Updated { booking, .. } => {
                if let Some(slot) = self.bookings.iter_mut().find(|b| b.id == booking.id) {
                    let customer = slot.customer.take();
                    *slot = booking.clone();
                    if slot.customer.is_none() {
                        slot.customer = customer;
                    }
                    slot.venue_id.get_or_insert_with(|| self.venue.id.clone());
                }
            }
            BookingOutcome::Deleted { id } => {
                self.bookings.retain(|b| &b.id != id);
            }
        }

        let booked = self.booked_dates();
        debug!("venue {} now has {} booked days", self.venue.id, booked.day_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::modal::ModalState;
    use crate::booking::test_support::{booking, d, profile, venue, RecordingGateway};
    use crate::booking::SelectedRange;

    fn controller(bookings: Vec<Booking>) -> VenueDetailController {
        VenueDetailController::from_venue(
            venue(100.0, 4, bookings),
            Some(profile("kari")),
            d(2024, 5, 20),
            SingleDayPolicy::ZeroCost,
        )
    }

    #[tokio::test]
    async fn load_takes_bookings_out_of_the_venue() {
        let gateway =
            RecordingGateway::serving(venue(100.0, 4, vec![booking("b1", d(2024, 6, 1), d(2024, 6, 3))]));
        let page = VenueDetailController::load(
            &gateway,
            "v1",
            None,
            d(2024, 5, 20),
            SingleDayPolicy::default(),
        )
        .await
        .unwrap();

        assert_eq!(page.bookings().len(), 1);
        assert!(page.venue().bookings.is_none());
        assert!(page.booked_dates().contains(d(2024, 6, 2)));
        assert_eq!(gateway.venue_calls(), vec!["v1".to_string()]);
    }

    #[tokio::test]
    async fn missing_venue_is_a_load_error() {
        let gateway = RecordingGateway::default();
        let err = VenueDetailController::load(
            &gateway,
            "nope",
            None,
            d(2024, 5, 20),
            SingleDayPolicy::default(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn booking_needs_a_viewer() {
        let mut page = VenueDetailController::from_venue(
            venue(100.0, 4, vec![]),
            None,
            d(2024, 5, 20),
            SingleDayPolicy::default(),
        );
        assert!(matches!(page.open_new_booking(), Err(BookingError::NotLoggedIn)));
    }

    #[test]
    fn user_bookings_are_the_viewers_own() {
        let mut other = booking("b2", d(2024, 7, 1), d(2024, 7, 2));
        other.customer = Some(profile("ola"));
        let page = controller(vec![booking("b1", d(2024, 6, 1), d(2024, 6, 3)), other]);

        let mine: Vec<&str> = page.user_bookings().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(mine, vec!["b1"]);
    }

    #[tokio::test]
    async fn create_appends_to_local_bookings() {
        let gateway = RecordingGateway::default();
        let mut page = controller(vec![booking("b1", d(2024, 6, 1), d(2024, 6, 3))]);

        let modal = page.open_new_booking().unwrap();
        assert!(modal.pick_day(d(2024, 6, 2)).is_err());
        modal.select_range(d(2024, 6, 5), d(2024, 6, 7)).unwrap();
        assert_eq!(modal.total_cost().unwrap().total, 200.0);

        page.confirm_booking(&gateway).await.unwrap();

        assert_eq!(page.bookings().len(), 2);
        let added = &page.bookings()[1];
        assert_eq!(added.venue_id.as_deref(), Some("v1"));
        assert!(added.is_made_by("kari"));
        assert!(page.booked_dates().contains(d(2024, 6, 6)));
        assert_eq!(page.modal().unwrap().state(), ModalState::Confirmed);
        assert_eq!(gateway.created().len(), 1);
        assert!(gateway.venue_calls().is_empty());
    }

    #[tokio::test]
    async fn edit_replaces_booking_by_id() {
        let gateway = RecordingGateway::default();
        let mut page = controller(vec![booking("b1", d(2024, 6, 1), d(2024, 6, 3))]);

        let modal = page.edit_booking("b1").unwrap();
        assert_eq!(
            modal.selection(),
            SelectedRange::new(d(2024, 6, 1), d(2024, 6, 3))
        );
        // the booking's own nights stay blocked while it is edited
        assert!(!modal.selector().is_selectable(d(2024, 6, 2)));
        assert!(modal.pick_day(d(2024, 6, 2)).is_err());
        modal.select_range(d(2024, 6, 5), d(2024, 6, 8)).unwrap();
        assert_eq!(modal.cost_comparison().unwrap().to_string(), "Original Cost: $200 | New Cost: $300 (+100)");

        page.confirm_booking(&gateway).await.unwrap();

        assert_eq!(page.bookings().len(), 1);
        let edited = &page.bookings()[0];
        assert_eq!(edited.first_day(), d(2024, 6, 5));
        assert_eq!(edited.last_day(), d(2024, 6, 8));
        assert!(edited.is_made_by("kari"));
        assert!(!page.booked_dates().contains(d(2024, 6, 2)));
        assert_eq!(gateway.updated(), vec!["b1".to_string()]);
        assert!(gateway.venue_calls().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_booking_by_id() {
        let gateway = RecordingGateway::default();
        let mut page = controller(vec![
            booking("b1", d(2024, 6, 1), d(2024, 6, 3)),
            booking("b2", d(2024, 7, 1), d(2024, 7, 2)),
        ]);

        page.edit_booking("b1").unwrap();
        page.request_delete().unwrap();
        page.delete_booking(&gateway).await.unwrap();

        let ids: Vec<&str> = page.bookings().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b2"]);
        assert_eq!(page.modal().unwrap().state(), ModalState::Confirmed);
        assert_eq!(gateway.deleted(), vec!["b1".to_string()]);
        assert!(gateway.venue_calls().is_empty());
    }

    #[tokio::test]
    async fn failed_mutation_leaves_bookings_untouched() {
        let gateway = RecordingGateway::failing(400, "Guests exceed venue capacity");
        let mut page = controller(vec![booking("b1", d(2024, 6, 1), d(2024, 6, 3))]);

        page.open_new_booking()
            .unwrap()
            .select_range(d(2024, 6, 5), d(2024, 6, 7))
            .unwrap();
        assert!(page.confirm_booking(&gateway).await.is_err());

        assert_eq!(page.bookings().len(), 1);
        let modal = page.modal().unwrap();
        assert_eq!(modal.state(), ModalState::Selecting);
        assert_eq!(modal.error(), Some("Guests exceed venue capacity"));
    }

    #[tokio::test]
    async fn closing_discards_modal_state() {
        let mut page = controller(vec![booking("b1", d(2024, 6, 1), d(2024, 6, 3))]);
        let modal = page.open_new_booking().unwrap();
        modal.pick_day(d(2024, 6, 5)).unwrap();
        modal.set_guests(3);

        page.close_modal();
        assert!(page.modal().is_none());
        assert!(matches!(
            page.confirm_booking(&RecordingGateway::default()).await,
            Err(BookingError::ModalClosed)
        ));

        let reopened = page.open_new_booking().unwrap();
        assert!(reopened.selection().is_empty());
        assert_eq!(reopened.guests(), 1);
    }

    #[test]
    fn unknown_booking_cannot_be_edited() {
        let mut page = controller(vec![]);
        assert!(matches!(
            page.edit_booking("missing"),
            Err(BookingError::UnknownBooking(_))
        ));
    }
}
