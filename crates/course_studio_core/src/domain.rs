//! crates/course_studio_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs carry serde derives for export and transport but are
//! independent of any file layout or endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

//=========================================================================================
// Catalog Records
//=========================================================================================

/// A training course, as listed in the course table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: u32,
    pub title: String,
    pub domain: String,
    pub level: String,
    /// Normalized from free text such as `"7.5h"`. `None` when unparseable.
    pub duration_hours: Option<f64>,
    pub prerequisites: String,
    pub description: Option<String>,
    pub source: String,
}

/// One ranked module of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: u32,
    pub course_id: u32,
    pub order: u32,
    pub title: String,
    pub duration_minutes: u32,
    pub concepts: String,
    pub example: Option<String>,
    pub level: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starter_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub test_cases: Vec<String>,
}

/// A named group of exercises at one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseCategory {
    pub category: String,
    pub level: String,
    pub exercises: Vec<Exercise>,
}

/// Parses a free-text duration such as `"8"`, `"7.5h"`, `"1,5 hours"` into hours.
pub fn normalize_hours(raw: &str) -> Option<f64> {
    let lowered = raw.trim().to_lowercase();
    let number = lowered
        .strip_suffix("hours")
        .or_else(|| lowered.strip_suffix("hour"))
        .or_else(|| lowered.strip_suffix('h'))
        .unwrap_or(&lowered)
        .trim()
        .replace(',', ".");

    match number.parse::<f64>() {
        Ok(hours) if hours.is_finite() && hours >= 0.0 => Some(hours),
        _ => None,
    }
}

//=========================================================================================
// Conversation
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Assistant => f.write_str("assistant"),
        }
    }
}

/// One role-tagged message in the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub message: String,
}

//=========================================================================================
// Generation Parameters
//=========================================================================================

/// The kind of educational content the user asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationType {
    #[default]
    FullCourse,
    SpecificModule,
    InteractiveQuiz,
    PracticalExercises,
    PersonalizedPlan,
}

impl GenerationType {
    pub fn label(&self) -> &'static str {
        match self {
            GenerationType::FullCourse => "Full course",
            GenerationType::SpecificModule => "Specific module",
            GenerationType::InteractiveQuiz => "Interactive quiz",
            GenerationType::PracticalExercises => "Practical exercises",
            GenerationType::PersonalizedPlan => "Personalized training plan",
        }
    }
}

/// How the finished content is exported. Does not change the prompt's scaffold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    StructuredText,
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::StructuredText => "Structured text",
            OutputFormat::Json => "JSON",
            OutputFormat::Markdown => "Markdown",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::StructuredText => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::StructuredText => "text/plain; charset=utf-8",
            OutputFormat::Json => "application/json",
            OutputFormat::Markdown => "text/markdown; charset=utf-8",
        }
    }
}

/// Domain/level narrow the course table; duration is advisory only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterParameters {
    pub domain: Option<String>,
    pub level: Option<String>,
    pub duration_hours: u32,
    pub output_format: OutputFormat,
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            domain: None,
            level: None,
            duration_hours: 6,
            output_format: OutputFormat::default(),
        }
    }
}

/// Everything the user submits for one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub generation_type: GenerationType,
    pub filters: FilterParameters,
    pub request: String,
}

//=========================================================================================
// Generation Record
//=========================================================================================

/// The outcome of one successful prompt-to-response cycle, with provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub generation_type: GenerationType,
    pub domain: Option<String>,
    pub level: Option<String>,
    pub duration_hours: u32,
    pub output_format: OutputFormat,
    pub request: String,
    pub content: String,
    pub sources_used: Vec<String>,
    /// Filtered course count per source label.
    #[serde(default)]
    pub courses_per_source: BTreeMap<String, usize>,
    pub filtered_course_count: usize,
}

/// Length of the content excerpt shown in generation listings, in characters.
pub const PREVIEW_CHARS: usize = 500;

impl GenerationRecord {
    /// The first `max_chars` characters of the content, with `...` appended when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        match self.content.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &self.content[..cut]),
            None => self.content.clone(),
        }
    }
}
