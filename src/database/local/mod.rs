pub mod auth;
pub mod state;

pub use state::{init_memory_state_db, init_state_db, StateDb};
