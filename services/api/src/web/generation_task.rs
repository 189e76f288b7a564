//! services/api/src/web/generation_task.rs
//!
//! This module contains the asynchronous worker responsible for one generation
//! cycle: build the prompt, call the model, then fold the result into the session.
//!
//! At most one generation runs per session. The session lock is only taken to
//! prepare and to commit, never across the model call, so a failed or cancelled
//! completion leaves history and records exactly as they were.

use chrono::Utc;
use course_studio_core::{
    catalog::Catalog,
    domain::{GenerationRecord, GenerationRequest},
    ports::{CompletionService, PortError},
    prompt::PromptError,
    session::GenerationSession,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Accepted range for the advisory duration hint, in hours.
pub const MIN_DURATION_HOURS: u32 = 1;
pub const MAX_DURATION_HOURS: u32 = 20;

/// Why a generation did not produce a record.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("A generation is already in progress for this session")]
    Busy,

    #[error("Invalid generation request: {0}")]
    InvalidRequest(String),

    #[error("Prompt assembly failed: {0}")]
    Prompt(#[from] PromptError),

    /// The model call failed; nothing was recorded.
    #[error("Completion failed: {0}")]
    Completion(#[from] PortError),

    #[error("The generation was cancelled")]
    Cancelled,

    #[error("The generation task failed: {0}")]
    TaskFailed(String),
}

/// The result of a successful generation.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub record: GenerationRecord,
    /// Filter values that were ignored because no course matched them.
    pub warnings: Vec<String>,
}

//=========================================================================================
// Single-flight Guard
//=========================================================================================

/// Refuses a second generation while one is outstanding. Backed by a one-permit
/// semaphore; the permit is held for the lifetime of one generation.
#[derive(Clone, Debug)]
pub struct SingleFlight {
    permits: Arc<Semaphore>,
}

impl Default for SingleFlight {
    fn default() -> Self {
        Self {
            permits: Arc::new(Semaphore::new(1)),
        }
    }
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot, or returns `None` if it is already taken.
    /// Dropping the permit frees the slot.
    pub fn try_acquire(&self) -> Option<OwnedSemaphorePermit> {
        self.permits.clone().try_acquire_owned().ok()
    }

    pub fn is_busy(&self) -> bool {
        self.permits.available_permits() == 0
    }
}

//=========================================================================================
// Task Handle
//=========================================================================================

/// An awaitable, cancellable handle to a spawned generation.
pub struct GenerationHandle {
    task: JoinHandle<Result<GenerationOutcome, GenerationError>>,
    cancellation_token: CancellationToken,
}

impl GenerationHandle {
    /// Waits for the generation to finish.
    pub async fn wait(self) -> Result<GenerationOutcome, GenerationError> {
        match self.task.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(GenerationError::Cancelled),
            Err(e) => Err(GenerationError::TaskFailed(e.to_string())),
        }
    }

    /// Abandons the generation. If the model has not answered yet, nothing is recorded.
    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }
}

/// Everything a generation needs, cloned out of the shared state.
#[derive(Clone)]
pub struct GenerationContext {
    pub completion: Arc<dyn CompletionService>,
    pub catalog: Arc<Catalog>,
    pub session: Arc<Mutex<GenerationSession>>,
    pub flight: SingleFlight,
}

/// Checks the request before any work is spawned.
pub fn validate_request(request: &GenerationRequest) -> Result<(), GenerationError> {
    if request.request.trim().is_empty() {
        return Err(GenerationError::InvalidRequest(
            "the request text is empty".to_string(),
        ));
    }
    let hours = request.filters.duration_hours;
    if !(MIN_DURATION_HOURS..=MAX_DURATION_HOURS).contains(&hours) {
        return Err(GenerationError::InvalidRequest(format!(
            "duration_hours must be between {} and {}, got {}",
            MIN_DURATION_HOURS, MAX_DURATION_HOURS, hours
        )));
    }
    Ok(())
}

/// Starts one generation in the background.
///
/// Fails immediately with [`GenerationError::Busy`] if another generation holds
/// the session, or with [`GenerationError::InvalidRequest`] if the request is unusable.
pub fn spawn_generation(
    context: GenerationContext,
    request: GenerationRequest,
) -> Result<GenerationHandle, GenerationError> {
    validate_request(&request)?;
    let permit = context.flight.try_acquire().ok_or(GenerationError::Busy)?;

    let cancellation_token = CancellationToken::new();
    let token = cancellation_token.clone();

    let task = tokio::spawn(async move {
        let _permit = permit;
        tokio::select! {
            _ = token.cancelled() => {
                warn!("Generation cancelled before it was recorded.");
                Err(GenerationError::Cancelled)
            }
            result = run_generation(context, request) => result,
        }
    });

    Ok(GenerationHandle {
        task,
        cancellation_token,
    })
}

async fn run_generation(
    context: GenerationContext,
    request: GenerationRequest,
) -> Result<GenerationOutcome, GenerationError> {
    let start_time = Instant::now();
    info!("Generation started: {}", request.generation_type.label());

    let prepared = {
        let session = context.session.lock().await;
        session.prepare(&context.catalog, &request)?
    };

    let llm_start = Instant::now();
    let content = match context.completion.complete(&prepared.prompt.text).await {
        Ok(content) => content,
        Err(e) => {
            error!("Completion failed, session left unchanged: {}", e);
            return Err(e.into());
        }
    };
    info!("⏱️ Completion took: {:?}", llm_start.elapsed());

    let warnings = prepared.warnings.clone();
    let record = {
        let mut session = context.session.lock().await;
        session.commit(prepared, content, Utc::now())
    };

    info!(
        "⏱️ Generation {} recorded in {:?}",
        record.id,
        start_time.elapsed()
    );
    Ok(GenerationOutcome { record, warnings })
}
