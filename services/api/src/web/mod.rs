pub mod generation_task;
pub mod protocol;
pub mod rest;
pub mod state;

// Re-export the router so the binary and the integration tests can build the app.
pub use rest::{router, ApiDoc};
pub use state::AppState;
