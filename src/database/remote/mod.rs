// Remote operations against the Holidaze REST API
//
// Each module wraps one resource. All calls carry the API key header and,
// when a session exists, the bearer token. Nothing is retried: a failure is
// returned to the caller as-is.
//
// Controllers talk to the API through the `BookingGateway` and
// `VenueGateway` traits so they can be driven without a network.

pub mod common;
pub mod gateway;

pub mod auth;
pub mod bookings;
pub mod profiles;
pub mod venues;

pub use common::{ApiError, HolidazeClient};
pub use gateway::{BookingGateway, VenueGateway};
