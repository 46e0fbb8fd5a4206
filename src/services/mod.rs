pub mod profiles;
pub mod session;
pub mod venue_detail;
pub mod venue_editor;
pub mod venues;
