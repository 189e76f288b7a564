//! crates/course_studio_core/src/session.rs
//!
//! The explicit session context: conversation history plus generation records,
//! created once per session and reset at teardown. Building a prompt reads the
//! session; only a successful completion is committed back into it.

use crate::catalog::Catalog;
use crate::domain::{GenerationRecord, GenerationRequest, Role};
use crate::filter::filter_courses;
use crate::history::ConversationHistory;
use crate::prompt::{self, generation_template, AssembledPrompt, PromptError, PromptTemplate};
use crate::recorder::SessionRecorder;
use crate::table::{render_courses, render_exercises, render_modules};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};
use uuid::Uuid;

/// Rendered in the domain/level slots when no value was chosen.
const ANY_VALUE: &str = "Any";

/// A prompt ready to send, with the provenance that goes into its record.
#[derive(Debug, Clone)]
pub struct PreparedGeneration {
    pub request: GenerationRequest,
    pub prompt: AssembledPrompt,
    pub sources_used: Vec<String>,
    pub courses_per_source: BTreeMap<String, usize>,
    pub filtered_course_count: usize,
    /// Filter values that were ignored because they match no course.
    pub warnings: Vec<String>,
}

pub struct GenerationSession {
    template: PromptTemplate,
    history: ConversationHistory,
    recorder: SessionRecorder,
    history_window: Option<usize>,
}

impl GenerationSession {
    /// Creates an empty session. `history_window` caps how many recent turns are
    /// rendered into each prompt; `None` renders them all.
    pub fn new(history_window: Option<usize>) -> Result<Self, PromptError> {
        Ok(Self {
            template: generation_template()?,
            history: ConversationHistory::new(),
            recorder: SessionRecorder::new(),
            history_window,
        })
    }

    /// Builds the prompt for `request` against `catalog`. Does not touch the session.
    pub fn prepare(
        &self,
        catalog: &Catalog,
        request: &GenerationRequest,
    ) -> Result<PreparedGeneration, PromptError> {
        let filters = &request.filters;
        let outcome = filter_courses(
            &catalog.courses,
            filters.domain.as_deref(),
            filters.level.as_deref(),
        );
        let warnings = outcome.warnings();
        for warning in &warnings {
            warn!("{}", warning);
        }

        let history = match self.history_window {
            Some(max_turns) => self.history.render_last(max_turns),
            None => self.history.render(),
        };

        let bindings: HashMap<String, String> = [
            (prompt::SLOT_COURSES, render_courses(&outcome.courses)),
            (prompt::SLOT_MODULES, render_modules(&catalog.modules)),
            (prompt::SLOT_EXERCISES, render_exercises(&catalog.exercises)),
            (prompt::SLOT_GENERATION_TYPE, request.generation_type.label().to_string()),
            (prompt::SLOT_DOMAIN, filters.domain.clone().unwrap_or_else(|| ANY_VALUE.to_string())),
            (prompt::SLOT_LEVEL, filters.level.clone().unwrap_or_else(|| ANY_VALUE.to_string())),
            (prompt::SLOT_DURATION, filters.duration_hours.to_string()),
            (prompt::SLOT_OUTPUT_FORMAT, filters.output_format.label().to_string()),
            (prompt::SLOT_HISTORY, history),
            (prompt::SLOT_REQUEST, request.request.clone()),
        ]
        .into_iter()
        .map(|(slot, value)| (slot.to_string(), value))
        .collect();

        let prompt = self.template.assemble(&bindings)?;
        debug!(
            "Assembled prompt of {} chars from {} filtered courses",
            prompt.text.len(),
            outcome.courses.len()
        );

        Ok(PreparedGeneration {
            request: request.clone(),
            prompt,
            sources_used: outcome.sources(),
            courses_per_source: outcome.source_counts(),
            filtered_course_count: outcome.courses.len(),
            warnings,
        })
    }

    /// Folds a successful completion back into the session: the user turn, then the
    /// assistant turn, then the generation record.
    pub fn commit(
        &mut self,
        prepared: PreparedGeneration,
        content: String,
        timestamp: DateTime<Utc>,
    ) -> GenerationRecord {
        let PreparedGeneration {
            request,
            sources_used,
            courses_per_source,
            filtered_course_count,
            ..
        } = prepared;

        self.history.append(Role::User, request.request.clone());
        self.history.append(Role::Assistant, content.clone());

        let record = GenerationRecord {
            id: Uuid::new_v4(),
            timestamp,
            generation_type: request.generation_type,
            domain: request.filters.domain,
            level: request.filters.level,
            duration_hours: request.filters.duration_hours,
            output_format: request.filters.output_format,
            request: request.request,
            content,
            sources_used,
            courses_per_source,
            filtered_course_count,
        };
        self.recorder.record(record.clone());
        record
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn recorder(&self) -> &SessionRecorder {
        &self.recorder
    }

    /// Session teardown: empties history and records.
    pub fn reset(&mut self) {
        self.history.clear();
        self.recorder.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FilterParameters, GenerationType, OutputFormat};
    use crate::table::EMPTY_TABLE;

    fn request(text: &str, domain: Option<&str>) -> GenerationRequest {
        GenerationRequest {
            generation_type: GenerationType::InteractiveQuiz,
            filters: FilterParameters {
                domain: domain.map(str::to_string),
                level: None,
                duration_hours: 4,
                output_format: OutputFormat::Markdown,
            },
            request: text.to_string(),
        }
    }

    #[test]
    fn prepare_fills_every_slot() {
        let session = GenerationSession::new(None).unwrap();
        let prepared = session
            .prepare(&Catalog::fallback(), &request("Make a pandas quiz", Some("Data Science")))
            .unwrap();
        let text = &prepared.prompt.text;

        assert!(text.contains("Pandas Data Analysis"));
        assert!(!text.contains("Python Basics  Programming"));
        assert!(text.contains("- Content type: Interactive quiz"));
        assert!(text.contains("- Domain: Data Science"));
        assert!(text.contains("- Level: Any"));
        assert!(text.contains("- Duration: 4h"));
        assert!(text.contains("- Format: Markdown"));
        assert!(text.contains("USER REQUEST:\nMake a pandas quiz"));
        assert!(prepared.prompt.unused_bindings.is_empty());
        assert_eq!(prepared.filtered_course_count, 1);
        assert_eq!(prepared.sources_used, vec!["Sample Data"]);
        assert_eq!(prepared.courses_per_source.get("Sample Data"), Some(&1));
    }

    #[test]
    fn empty_module_table_renders_placeholder() {
        let mut catalog = Catalog::fallback();
        catalog.modules.clear();
        let session = GenerationSession::new(None).unwrap();
        let prepared = session.prepare(&catalog, &request("anything", None)).unwrap();

        assert!(prepared
            .prompt
            .text
            .contains(&format!("=== MODULES ===\n{}\n", EMPTY_TABLE)));
    }

    #[test]
    fn unknown_domain_is_a_warning_not_an_error() {
        let session = GenerationSession::new(None).unwrap();
        let prepared = session
            .prepare(&Catalog::fallback(), &request("x", Some("Cooking")))
            .unwrap();
        assert_eq!(prepared.filtered_course_count, 2);
        assert_eq!(prepared.warnings.len(), 1);
    }

    #[test]
    fn prepare_does_not_mutate_the_session() {
        let session = GenerationSession::new(None).unwrap();
        session.prepare(&Catalog::fallback(), &request("x", None)).unwrap();
        assert!(session.history().is_empty());
        assert!(session.recorder().is_empty());
    }

    #[test]
    fn commit_appends_turns_and_record_and_feeds_next_prompt() {
        let catalog = Catalog::fallback();
        let mut session = GenerationSession::new(None).unwrap();

        let prepared = session.prepare(&catalog, &request("First course", None)).unwrap();
        let record = session.commit(prepared, "# Generated\nbody".to_string(), Utc::now());

        assert_eq!(record.request, "First course");
        assert_eq!(record.filtered_course_count, 2);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.recorder().len(), 1);

        let next = session.prepare(&catalog, &request("Follow up", None)).unwrap();
        assert!(next
            .prompt
            .text
            .contains("CONVERSATION SO FAR:\nuser: First course\nassistant: # Generated\\nbody\n"));
    }

    #[test]
    fn history_window_limits_rendered_turns() {
        let catalog = Catalog::fallback();
        let mut session = GenerationSession::new(Some(2)).unwrap();
        for i in 0..3 {
            let prepared = session.prepare(&catalog, &request(&format!("ask {}", i), None)).unwrap();
            session.commit(prepared, format!("answer {}", i), Utc::now());
        }

        let next = session.prepare(&catalog, &request("again", None)).unwrap();
        assert!(next.prompt.text.contains("user: ask 2\nassistant: answer 2"));
        assert!(!next.prompt.text.contains("ask 1"));
        assert_eq!(session.history().len(), 6);
    }

    #[test]
    fn three_generations_then_recent_two() {
        let catalog = Catalog::fallback();
        let mut session = GenerationSession::new(None).unwrap();
        for i in 1..=3 {
            let prepared = session.prepare(&catalog, &request(&format!("req {}", i), None)).unwrap();
            session.commit(prepared, format!("content {}", i), Utc::now());
        }

        let recent: Vec<&str> = session
            .recorder()
            .recent(2)
            .iter()
            .map(|r| r.request.as_str())
            .collect();
        assert_eq!(session.recorder().len(), 3);
        assert_eq!(recent, vec!["req 3", "req 2"]);
    }

    #[test]
    fn reset_clears_everything() {
        let catalog = Catalog::fallback();
        let mut session = GenerationSession::new(None).unwrap();
        let prepared = session.prepare(&catalog, &request("x", None)).unwrap();
        session.commit(prepared, "y".to_string(), Utc::now());

        session.reset();
        assert!(session.history().is_empty());
        assert!(session.recorder().is_empty());
    }
}
