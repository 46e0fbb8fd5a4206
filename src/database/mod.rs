pub mod local;
pub mod remote;

pub use local::{init_memory_state_db, init_state_db, StateDb};
