//! Shared fakes for the integration tests.
#![allow(dead_code)]

use api_lib::web::AppState;
use async_trait::async_trait;
use course_studio_core::{
    catalog::{Catalog, CatalogLoad},
    ports::{CompletionService, PortError, PortResult},
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Replies from a script, in order, and remembers every prompt it was sent.
/// Once the script runs out it echoes a fixed reply.
#[derive(Default)]
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<PortResult<String>>>,
    pub prompts: Mutex<Vec<String>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedCompletion {
    pub fn new(replies: Vec<PortResult<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    /// Every call waits for a `notify_one` on `gate` before answering.
    pub fn gated(replies: Vec<PortResult<String>>, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(replies)
        }
    }

    pub fn failing(error: PortError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(&self, prompt: &str) -> PortResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let next = self.replies.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok("# Generated content".to_string()))
    }
}

pub fn app_state(completion: Arc<ScriptedCompletion>) -> Arc<AppState> {
    app_state_with(completion, Catalog::fallback(), vec![])
}

pub fn app_state_with(
    completion: Arc<ScriptedCompletion>,
    catalog: Catalog,
    warnings: Vec<String>,
) -> Arc<AppState> {
    Arc::new(
        AppState::new(completion, CatalogLoad { catalog, warnings }, None)
            .expect("built-in template is valid"),
    )
}
