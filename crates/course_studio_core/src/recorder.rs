//! crates/course_studio_core/src/recorder.rs
//!
//! Session-scoped list of successful generations, kept for display and export.

use crate::domain::GenerationRecord;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct SessionRecorder {
    records: Vec<GenerationRecord>,
}

impl SessionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record. No deduplication.
    pub fn record(&mut self, generation: GenerationRecord) {
        self.records.push(generation);
    }

    /// The last `n` records, most recent first.
    pub fn recent(&self, n: usize) -> Vec<&GenerationRecord> {
        self.records.iter().rev().take(n).collect()
    }

    pub fn get(&self, id: Uuid) -> Option<&GenerationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GenerationType, OutputFormat};
    use chrono::Utc;

    fn record(request: &str) -> GenerationRecord {
        GenerationRecord {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            generation_type: GenerationType::FullCourse,
            domain: None,
            level: None,
            duration_hours: 6,
            output_format: OutputFormat::Markdown,
            request: request.to_string(),
            content: format!("content for {}", request),
            sources_used: vec![],
            courses_per_source: Default::default(),
            filtered_course_count: 0,
        }
    }

    #[test]
    fn recent_is_most_recent_first() {
        let mut recorder = SessionRecorder::new();
        for request in ["first", "second", "third"] {
            recorder.record(record(request));
        }

        let recent: Vec<&str> = recorder.recent(2).iter().map(|r| r.request.as_str()).collect();
        assert_eq!(recent, vec!["third", "second"]);
        assert_eq!(recorder.len(), 3);
    }

    #[test]
    fn recent_with_large_n_returns_everything() {
        let mut recorder = SessionRecorder::new();
        recorder.record(record("only"));
        assert_eq!(recorder.recent(10).len(), 1);
        assert!(recorder.recent(0).is_empty());
    }

    #[test]
    fn duplicates_are_kept_and_lookup_by_id_works() {
        let mut recorder = SessionRecorder::new();
        let first = record("same");
        let id = first.id;
        recorder.record(first);
        recorder.record(record("same"));

        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.get(id).map(|r| r.id), Some(id));
        assert!(recorder.get(Uuid::new_v4()).is_none());
    }
}
