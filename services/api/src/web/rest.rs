//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints, the router that wires
//! them together, and the master definition for the OpenAPI specification.

use crate::web::{
    generation_task::{spawn_generation, GenerationError},
    protocol::{
        CatalogStatsResponse, CourseListResponse, CourseQuery, ExampleListResponse,
        ExerciseListResponse, ExportQuery, GenerateRequest, GenerationListResponse,
        GenerationResponse, GenerationSummary, HistoryResponse, RecentQuery, DEFAULT_RECENT_LIMIT,
    },
    state::AppState,
};
use crate::seed::EXAMPLE_REQUESTS;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{delete, get},
    Router,
};
use course_studio_core::{
    catalog::CatalogStats,
    domain::GenerationRequest,
    export::export_record,
    filter::filter_courses,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::OpenApi;
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        create_generation_handler,
        list_generations_handler,
        export_generation_handler,
        history_handler,
        reset_session_handler,
        list_courses_handler,
        catalog_stats_handler,
        list_exercises_handler,
        list_examples_handler,
    ),
    components(
        schemas(
            GenerateRequest,
            GenerationResponse,
            GenerationListResponse,
            GenerationSummary,
            HistoryResponse,
            CourseListResponse,
            CatalogStatsResponse,
            ExerciseListResponse,
            ExampleListResponse,
        )
    ),
    tags(
        (name = "Course Studio API", description = "Generate training content grounded in the course catalog.")
    )
)]
pub struct ApiDoc;

/// Builds the API router. CORS and Swagger UI are layered on by the binary.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/generations",
            get(list_generations_handler).post(create_generation_handler),
        )
        .route("/generations/{id}/export", get(export_generation_handler))
        .route("/history", get(history_handler))
        .route("/session", delete(reset_session_handler))
        .route("/catalog/courses", get(list_courses_handler))
        .route("/catalog/stats", get(catalog_stats_handler))
        .route("/catalog/exercises", get(list_exercises_handler))
        .route("/catalog/examples", get(list_examples_handler))
        .with_state(app_state)
}

fn generation_status(e: &GenerationError) -> StatusCode {
    match e {
        GenerationError::Busy => StatusCode::CONFLICT,
        GenerationError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        GenerationError::Completion(_) => StatusCode::BAD_GATEWAY,
        GenerationError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        GenerationError::Prompt(_) | GenerationError::TaskFailed(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

//=========================================================================================
// Generation Handlers
//=========================================================================================

/// Generate content for one request.
///
/// Filters the catalog, assembles the prompt with the conversation so far, calls the
/// model and records the result. Only one generation may run at a time.
#[utoipa::path(
    post,
    path = "/generations",
    request_body = GenerateRequest,
    responses(
        (status = 201, description = "Content generated and recorded", body = GenerationResponse),
        (status = 400, description = "Empty request or duration out of range"),
        (status = 409, description = "A generation is already in progress"),
        (status = 502, description = "The model endpoint failed; nothing was recorded"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_generation_handler(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<GenerateRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let request = GenerationRequest::from(body);

    let result = match spawn_generation(app_state.generation_context(), request) {
        Ok(handle) => handle.wait().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(outcome) => Ok((
            StatusCode::CREATED,
            Json(GenerationResponse {
                record: outcome.record,
                warnings: outcome.warnings,
            }),
        )),
        Err(e) => {
            let status = generation_status(&e);
            if status.is_server_error() {
                error!("Generation failed: {}", e);
            } else {
                warn!("Generation refused: {}", e);
            }
            Err((status, e.to_string()))
        }
    }
}

/// List the most recent generations, newest first.
#[utoipa::path(
    get,
    path = "/generations",
    params(RecentQuery),
    responses(
        (status = 200, description = "Recent generations with a content preview", body = GenerationListResponse)
    )
)]
pub async fn list_generations_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<RecentQuery>,
) -> Json<GenerationListResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let session = app_state.session.lock().await;
    let recorder = session.recorder();
    Json(GenerationListResponse {
        records: recorder
            .recent(limit)
            .into_iter()
            .map(GenerationSummary::from)
            .collect(),
        total: recorder.len(),
    })
}

/// Download one generation as a file.
#[utoipa::path(
    get,
    path = "/generations/{id}/export",
    params(
        ("id" = Uuid, Path, description = "The generation record id."),
        ExportQuery
    ),
    responses(
        (status = 200, description = "The exported document"),
        (status = 404, description = "No such generation in this session"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn export_generation_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = app_state.session.lock().await;
    let record = session.recorder().get(id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            format!("No generation with id {}", id),
        )
    })?;

    let format = query.format.unwrap_or(record.output_format);
    let document = export_record(record, format).map_err(|e| {
        error!("Failed to export generation {}: {}", id, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to export generation".to_string(),
        )
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, document.mime_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", document.file_name),
            ),
        ],
        document.body,
    ))
}

//=========================================================================================
// Session Handlers
//=========================================================================================

/// The conversation so far, oldest turn first.
#[utoipa::path(
    get,
    path = "/history",
    responses(
        (status = 200, description = "Conversation turns in order", body = HistoryResponse)
    )
)]
pub async fn history_handler(State(app_state): State<Arc<AppState>>) -> Json<HistoryResponse> {
    let session = app_state.session.lock().await;
    Json(HistoryResponse {
        turns: session.history().turns().to_vec(),
    })
}

/// Clear the conversation history and every generation record.
#[utoipa::path(
    delete,
    path = "/session",
    responses(
        (status = 204, description = "Session reset"),
        (status = 409, description = "A generation is in progress")
    )
)]
pub async fn reset_session_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<StatusCode, (StatusCode, String)> {
    let _permit = app_state.flight.try_acquire().ok_or_else(|| {
        (
            StatusCode::CONFLICT,
            GenerationError::Busy.to_string(),
        )
    })?;
    app_state.session.lock().await.reset();
    info!("Session reset.");
    Ok(StatusCode::NO_CONTENT)
}

//=========================================================================================
// Catalog Handlers
//=========================================================================================

/// Courses matching the optional domain and level filters.
#[utoipa::path(
    get,
    path = "/catalog/courses",
    params(CourseQuery),
    responses(
        (status = 200, description = "Filtered course rows", body = CourseListResponse)
    )
)]
pub async fn list_courses_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<CourseQuery>,
) -> Json<CourseListResponse> {
    let outcome = filter_courses(
        &app_state.catalog.courses,
        query.domain.as_deref().filter(|d| !d.is_empty()),
        query.level.as_deref().filter(|l| !l.is_empty()),
    );
    let warnings = outcome.warnings();
    Json(CourseListResponse {
        courses: outcome.courses,
        warnings,
    })
}

/// Catalog counts and breakdowns, plus any problems hit while loading it.
#[utoipa::path(
    get,
    path = "/catalog/stats",
    responses(
        (status = 200, description = "Catalog statistics", body = CatalogStatsResponse)
    )
)]
pub async fn catalog_stats_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<CatalogStatsResponse> {
    Json(CatalogStatsResponse {
        stats: CatalogStats::from_catalog(&app_state.catalog),
        load_warnings: app_state.load_warnings.clone(),
    })
}

/// The practice exercise collection.
#[utoipa::path(
    get,
    path = "/catalog/exercises",
    responses(
        (status = 200, description = "Exercise categories", body = ExerciseListResponse)
    )
)]
pub async fn list_exercises_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<ExerciseListResponse> {
    Json(ExerciseListResponse {
        categories: app_state.catalog.exercises.clone(),
    })
}

/// Ready-made requests a client can offer as starting points.
#[utoipa::path(
    get,
    path = "/catalog/examples",
    responses(
        (status = 200, description = "Example requests", body = ExampleListResponse)
    )
)]
pub async fn list_examples_handler() -> Json<ExampleListResponse> {
    Json(ExampleListResponse {
        examples: EXAMPLE_REQUESTS.to_vec(),
    })
}
