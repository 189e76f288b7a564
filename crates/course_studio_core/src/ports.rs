//! crates/course_studio_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, keeping the core
//! independent of the model endpoint and of where the catalog files live.

use crate::catalog::CatalogLoad;
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// The reasons a call through a port can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    /// The endpoint rejected the credential or is misconfigured.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// The request never produced a response (network, timeout, TLS).
    #[error("Transport failure: {0}")]
    Transport(String),
    /// The endpoint answered without any usable text.
    #[error("The model returned an empty response")]
    EmptyResponse,
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends one prompt and returns the model's text. Single-shot, no retry.
    async fn complete(&self, prompt: &str) -> PortResult<String>;
}

pub trait CatalogSource: Send + Sync {
    /// Loads the record store. Never fails: unreadable tables are replaced by
    /// fallback data and reported in [`CatalogLoad::warnings`].
    fn load(&self) -> CatalogLoad;
}
