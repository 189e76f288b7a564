//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between clients and the REST API.

use crate::seed::ExampleRequest;
use chrono::{DateTime, Utc};
use course_studio_core::{
    catalog::CatalogStats,
    domain::{
        Course, ExerciseCategory, FilterParameters, GenerationRecord, GenerationRequest,
        GenerationType, OutputFormat, Turn, PREVIEW_CHARS,
    },
};
use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

pub const DEFAULT_RECENT_LIMIT: usize = 5;

fn default_duration_hours() -> u32 {
    FilterParameters::default().duration_hours
}

//=========================================================================================
// Requests
//=========================================================================================

/// The body of `POST /generations`.
#[derive(Deserialize, Debug, ToSchema)]
pub struct GenerateRequest {
    /// One of `full_course`, `specific_module`, `interactive_quiz`,
    /// `practical_exercises`, `personalized_plan`.
    #[serde(default)]
    #[schema(value_type = String, example = "full_course")]
    pub generation_type: GenerationType,
    /// Exact-match course domain. Omit for all domains.
    #[serde(default)]
    pub domain: Option<String>,
    /// Exact-match course level. Omit for all levels.
    #[serde(default)]
    pub level: Option<String>,
    /// Advisory length of the generated content, 1 to 20 hours.
    #[serde(default = "default_duration_hours")]
    pub duration_hours: u32,
    /// One of `structured_text`, `json`, `markdown`. Only affects export.
    #[serde(default)]
    #[schema(value_type = String, example = "markdown")]
    pub output_format: OutputFormat,
    /// The free-text request.
    pub request: String,
}

impl From<GenerateRequest> for GenerationRequest {
    fn from(body: GenerateRequest) -> Self {
        Self {
            generation_type: body.generation_type,
            filters: FilterParameters {
                domain: body.domain.filter(|d| !d.trim().is_empty()),
                level: body.level.filter(|l| !l.trim().is_empty()),
                duration_hours: body.duration_hours,
                output_format: body.output_format,
            },
            request: body.request,
        }
    }
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentQuery {
    /// How many records to return, most recent first. Defaults to 5.
    pub limit: Option<usize>,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExportQuery {
    /// Overrides the record's own output format.
    #[param(value_type = Option<String>, example = "json")]
    pub format: Option<OutputFormat>,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseQuery {
    pub domain: Option<String>,
    pub level: Option<String>,
}

//=========================================================================================
// Responses
//=========================================================================================

/// The response payload sent after a successful generation.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct GenerationResponse {
    #[schema(value_type = Object)]
    pub record: GenerationRecord,
    /// Filter values that matched no course and were ignored.
    pub warnings: Vec<String>,
}

/// One row of the generation listing: the record without its full content.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct GenerationSummary {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[schema(value_type = String)]
    pub generation_type: GenerationType,
    pub domain: Option<String>,
    pub level: Option<String>,
    pub duration_hours: u32,
    #[schema(value_type = String)]
    pub output_format: OutputFormat,
    pub request: String,
    pub sources_used: Vec<String>,
    pub courses_per_source: BTreeMap<String, usize>,
    pub filtered_course_count: usize,
    /// The first 500 characters of the content.
    pub preview: String,
}

impl From<&GenerationRecord> for GenerationSummary {
    fn from(record: &GenerationRecord) -> Self {
        Self {
            id: record.id,
            timestamp: record.timestamp,
            generation_type: record.generation_type,
            domain: record.domain.clone(),
            level: record.level.clone(),
            duration_hours: record.duration_hours,
            output_format: record.output_format,
            request: record.request.clone(),
            sources_used: record.sources_used.clone(),
            courses_per_source: record.courses_per_source.clone(),
            filtered_course_count: record.filtered_course_count,
            preview: record.preview(PREVIEW_CHARS),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct GenerationListResponse {
    pub records: Vec<GenerationSummary>,
    /// Number of records held by the session.
    pub total: usize,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HistoryResponse {
    #[schema(value_type = Vec<Object>)]
    pub turns: Vec<Turn>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct CourseListResponse {
    #[schema(value_type = Vec<Object>)]
    pub courses: Vec<Course>,
    pub warnings: Vec<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CatalogStatsResponse {
    #[schema(value_type = Object)]
    pub stats: CatalogStats,
    /// Problems hit while loading the catalog files.
    pub load_warnings: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ExerciseListResponse {
    #[schema(value_type = Vec<Object>)]
    pub categories: Vec<ExerciseCategory>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ExampleListResponse {
    #[schema(value_type = Vec<Object>)]
    pub examples: Vec<ExampleRequest>,
}
