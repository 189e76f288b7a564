//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::web::generation_task::{GenerationContext, SingleFlight};
use course_studio_core::{
    catalog::{Catalog, CatalogLoad},
    ports::CompletionService,
    prompt::PromptError,
    session::GenerationSession,
};
use std::sync::Arc;
use tokio::sync::Mutex;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
///
/// The server hosts a single session: one conversation history and one set of
/// generation records, reset through `DELETE /session`.
pub struct AppState {
    pub completion: Arc<dyn CompletionService>,
    /// Read-only after startup.
    pub catalog: Arc<Catalog>,
    /// Problems hit while loading the catalog, surfaced on the stats endpoint.
    pub load_warnings: Vec<String>,
    pub session: Arc<Mutex<GenerationSession>>,
    pub flight: SingleFlight,
}

impl AppState {
    pub fn new(
        completion: Arc<dyn CompletionService>,
        load: CatalogLoad,
        history_window: Option<usize>,
    ) -> Result<Self, PromptError> {
        Ok(Self {
            completion,
            catalog: Arc::new(load.catalog),
            load_warnings: load.warnings,
            session: Arc::new(Mutex::new(GenerationSession::new(history_window)?)),
            flight: SingleFlight::new(),
        })
    }

    /// The handles a spawned generation needs.
    pub fn generation_context(&self) -> GenerationContext {
        GenerationContext {
            completion: self.completion.clone(),
            catalog: self.catalog.clone(),
            session: self.session.clone(),
            flight: self.flight.clone(),
        }
    }
}
