//! Booking calendar, pricing and the booking modal
pub mod availability;
pub mod cost;
pub mod modal;
pub mod selector;

pub use availability::BookedDates;
pub use cost::{CostComparison, CostQuote, SingleDayPolicy};
pub use modal::{BookingError, BookingModal, BookingOutcome, ModalState, ModalView};
pub use selector::{DateRangeSelector, SelectedRange, SelectionError};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::cost::midnight_utc;
    use crate::database::remote::{ApiError, BookingGateway, VenueGateway};
    use crate::models::bookings::{Booking, BookingInput};
    use crate::models::profiles::ProfileSummary;
    use crate::models::venues::{Location, Venue, VenueInput, VenueMeta};

    pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    pub fn profile(name: &str) -> ProfileSummary {
        ProfileSummary {
            name: name.to_string(),
            email: format!("{name}@stud.noroff.no"),
            ..Default::default()
        }
    }

    pub fn booking(id: &str, from: NaiveDate, to: NaiveDate) -> Booking {
        Booking {
            id: id.to_string(),
            date_from: midnight_utc(from),
            date_to: midnight_utc(to),
            guests: 2,
            venue_id: None,
            customer: Some(profile("kari")),
            venue: None,
            created: None,
            updated: None,
        }
    }

    pub fn venue(price: f64, max_guests: u32, bookings: Vec<Booking>) -> Venue {
        Venue {
            id: "v1".to_string(),
            name: "Fjord cabin".to_string(),
            description: "Quiet cabin by the water".to_string(),
            media: Vec::new(),
            price,
            max_guests,
            rating: 4.0,
            created: None,
            updated: None,
            meta: VenueMeta::default(),
            location: Location::default(),
            owner: Some(profile("ola")),
            bookings: Some(bookings),
        }
    }

    #[derive(Debug, Clone)]
    enum Call {
        Create(BookingInput),
        Update(String, BookingInput),
        Delete(String),
        Venue(String),
    }

    /// In-memory gateway that records every call and either echoes the
    /// input back or fails with a fixed API error
    #[derive(Debug, Default)]
    pub struct RecordingGateway {
        calls: Mutex<Vec<Call>>,
        failure: Option<(u16, String)>,
        venue: Option<Venue>,
    }

    impl RecordingGateway {
        pub fn failing(status: u16, message: &str) -> Self {
            Self {
                failure: Some((status, message.to_string())),
                ..Default::default()
            }
        }

        pub fn serving(venue: Venue) -> Self {
            Self {
                venue: Some(venue),
                ..Default::default()
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn created(&self) -> Vec<BookingInput> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter_map(|c| match c {
                    Call::Create(input) => Some(input.clone()),
                    _ => None,
                })
                .collect()
        }

        pub fn updated(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter_map(|c| match c {
                    Call::Update(id, _) => Some(id.clone()),
                    _ => None,
                })
                .collect()
        }

        pub fn update_inputs(&self) -> Vec<BookingInput> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter_map(|c| match c {
                    Call::Update(_, input) => Some(input.clone()),
                    _ => None,
                })
                .collect()
        }

        pub fn deleted(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter_map(|c| match c {
                    Call::Delete(id) => Some(id.clone()),
                    _ => None,
                })
                .collect()
        }

        fn record(&self, call: Call) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(call);
            match &self.failure {
                Some((status, message)) => Err(ApiError::Api {
                    status: *status,
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }

        fn echo(id: &str, input: &BookingInput) -> Booking {
            Booking {
                id: id.to_string(),
                date_from: input.date_from,
                date_to: input.date_to,
                guests: input.guests,
                venue_id: None,
                customer: None,
                venue: None,
                created: None,
                updated: None,
            }
        }
    }

    #[async_trait]
    impl BookingGateway for RecordingGateway {
        async fn create_booking(&self, input: &BookingInput) -> Result<Booking, ApiError> {
            self.record(Call::Create(input.clone()))?;
            Ok(Self::echo("created-1", input))
        }

        async fn update_booking(&self, id: &str, input: &BookingInput) -> Result<Booking, ApiError> {
            self.record(Call::Update(id.to_string(), input.clone()))?;
            Ok(Self::echo(id, input))
        }

        async fn delete_booking(&self, id: &str) -> Result<(), ApiError> {
            self.record(Call::Delete(id.to_string()))
        }
    }

    #[async_trait]
    impl VenueGateway for RecordingGateway {
        async fn list_venues(&self) -> Result<Vec<Venue>, ApiError> {
            self.record(Call::Venue("list".to_string()))?;
            Ok(self.venue.clone().into_iter().collect())
        }

        async fn fetch_venue(&self, id: &str) -> Result<Venue, ApiError> {
            self.record(Call::Venue(id.to_string()))?;
            self.venue.clone().ok_or(ApiError::Api {
                status: 404,
                message: "No venue with such ID".to_string(),
            })
        }

        async fn create_venue(&self, input: &VenueInput) -> Result<Venue, ApiError> {
            self.record(Call::Venue("create".to_string()))?;
            let mut created = venue(input.price.unwrap_or_default(), 1, Vec::new());
            created.name = input.name.clone().unwrap_or_default();
            created.bookings = None;
            Ok(created)
        }

        async fn update_venue(&self, id: &str, input: &VenueInput) -> Result<Venue, ApiError> {
            self.record(Call::Venue(format!("update:{id}")))?;
            let mut updated = self.venue.clone().unwrap_or_else(|| venue(0.0, 1, Vec::new()));
            if let Some(name) = &input.name {
                updated.name = name.clone();
            }
            if let Some(price) = input.price {
                updated.price = price;
            }
            Ok(updated)
        }

        async fn delete_venue(&self, id: &str) -> Result<(), ApiError> {
            self.record(Call::Venue(format!("delete:{id}")))
        }
    }

    impl RecordingGateway {
        pub fn venue_calls(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter_map(|c| match c {
                    Call::Venue(what) => Some(what.clone()),
                    _ => None,
                })
                .collect()
        }
    }
}
