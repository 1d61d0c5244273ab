pub mod errors;
pub mod launch;
pub mod routes;
pub mod startup;
pub mod state;

pub use launch::launch;
pub use startup::{run, Service};
pub use state::AppState;
