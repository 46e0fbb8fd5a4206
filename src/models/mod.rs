pub mod bookings;
pub mod profiles;
pub mod venues;
