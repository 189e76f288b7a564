mod common;

use api_lib::web::{protocol::GenerationResponse, router, ApiDoc};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use common::{app_state, app_state_with, ScriptedCompletion};
use course_studio_core::{catalog::Catalog, ports::PortError};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use utoipa::OpenApi;

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, headers, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_generation(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generations")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

#[tokio::test]
async fn generate_then_list_history_and_export() {
    let completion = Arc::new(ScriptedCompletion::new(vec![Ok("# Pandas course".to_string())]));
    let app = router(app_state(completion));

    let (status, _, body) = send(
        &app,
        post_generation(json!({
            "request": "Build a pandas course",
            "domain": "Data Science",
            "output_format": "markdown"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: GenerationResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(created.record.content, "# Pandas course");
    assert_eq!(created.record.sources_used, vec!["Sample Data"]);
    assert_eq!(created.record.filtered_course_count, 1);

    let (status, _, body) = send(&app, get("/history")).await;
    assert_eq!(status, StatusCode::OK);
    let turns = json_body(&body)["turns"].as_array().unwrap().clone();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0]["role"], "user");
    assert_eq!(turns[1]["message"], "# Pandas course");

    let (status, _, body) = send(&app, get("/generations")).await;
    assert_eq!(status, StatusCode::OK);
    let listed = json_body(&body);
    assert_eq!(listed["total"], 1);
    assert_eq!(listed["records"][0]["preview"], "# Pandas course");
    assert_eq!(listed["records"][0]["courses_per_source"]["Sample Data"], 1);
    assert!(listed["records"][0].get("content").is_none());

    let export_uri = format!("/generations/{}/export", created.record.id);
    let (status, headers, body) = send(&app, get(&export_uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/markdown; charset=utf-8");
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\"generation_"));
    assert!(disposition.ends_with(".md\""));
    assert_eq!(body, b"# Pandas course");

    let (status, headers, body) = send(&app, get(&format!("{}?format=json", export_uri))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(json_body(&body)["request"], "Build a pandas course");
}

#[tokio::test]
async fn recent_generations_are_newest_first() {
    let app = router(app_state(Arc::new(ScriptedCompletion::default())));
    for n in 1..=3 {
        let (status, _, _) = send(&app, post_generation(json!({ "request": format!("req {}", n) }))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, _, body) = send(&app, get("/generations?limit=2")).await;
    let listed = json_body(&body);
    let requests: Vec<&str> = listed["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["request"].as_str().unwrap())
        .collect();
    assert_eq!(requests, vec!["req 3", "req 2"]);
    assert_eq!(listed["total"], 3);
}

#[tokio::test]
async fn completion_failure_is_a_bad_gateway_and_records_nothing() {
    let completion = Arc::new(ScriptedCompletion::failing(PortError::Unauthorized(
        "invalid api key".to_string(),
    )));
    let app = router(app_state(completion));

    let (status, _, body) = send(&app, post_generation(json!({ "request": "anything" }))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(String::from_utf8(body).unwrap().contains("invalid api key"));

    let (_, _, body) = send(&app, get("/history")).await;
    assert!(json_body(&body)["turns"].as_array().unwrap().is_empty());
    let (_, _, body) = send(&app, get("/generations")).await;
    assert_eq!(json_body(&body)["total"], 0);
}

#[tokio::test]
async fn invalid_requests_are_rejected() {
    let app = router(app_state(Arc::new(ScriptedCompletion::default())));

    let (status, _, _) = send(&app, post_generation(json!({ "request": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) =
        send(&app, post_generation(json!({ "request": "x", "duration_hours": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_domain_is_ignored_with_a_warning() {
    let app = router(app_state(Arc::new(ScriptedCompletion::default())));

    let (status, _, body) = send(
        &app,
        post_generation(json!({ "request": "x", "domain": "Cooking" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created = json_body(&body);
    assert_eq!(created["record"]["filtered_course_count"], 2);
    assert_eq!(created["warnings"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn reset_clears_the_session() {
    let app = router(app_state(Arc::new(ScriptedCompletion::default())));
    send(&app, post_generation(json!({ "request": "x" }))).await;

    let request = Request::builder()
        .method("DELETE")
        .uri("/session")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, _, body) = send(&app, get("/history")).await;
    assert!(json_body(&body)["turns"].as_array().unwrap().is_empty());
    let (_, _, body) = send(&app, get("/generations")).await;
    assert_eq!(json_body(&body)["total"], 0);
}

#[tokio::test]
async fn reset_is_refused_during_a_generation() {
    let state = app_state(Arc::new(ScriptedCompletion::default()));
    let app = router(state.clone());
    let _held = state.flight.try_acquire().unwrap();

    let request = Request::builder()
        .method("DELETE")
        .uri("/session")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _, _) = send(&app, post_generation(json!({ "request": "x" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_export_id_is_not_found() {
    let app = router(app_state(Arc::new(ScriptedCompletion::default())));
    let (status, _, _) = send(
        &app,
        get("/generations/00000000-0000-0000-0000-000000000000/export"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn catalog_endpoints() {
    let state = app_state_with(
        Arc::new(ScriptedCompletion::default()),
        Catalog::fallback(),
        vec!["Module table unavailable".to_string()],
    );
    let app = router(state);

    let (status, _, body) = send(&app, get("/catalog/courses?domain=Programming")).await;
    assert_eq!(status, StatusCode::OK);
    let listed = json_body(&body);
    let courses = listed["courses"].as_array().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["title"], "Python Basics");
    assert!(listed["warnings"].as_array().unwrap().is_empty());

    let (_, _, body) = send(&app, get("/catalog/courses?level=Expert")).await;
    let listed = json_body(&body);
    assert_eq!(listed["courses"].as_array().unwrap().len(), 2);
    assert_eq!(listed["warnings"].as_array().unwrap().len(), 1);

    let (status, _, body) = send(&app, get("/catalog/stats")).await;
    assert_eq!(status, StatusCode::OK);
    let stats = json_body(&body);
    assert_eq!(stats["stats"]["course_count"], 2);
    assert_eq!(stats["load_warnings"][0], "Module table unavailable");

    let (status, _, body) = send(&app, get("/catalog/exercises")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["categories"][0]["category"], "Python Basics");
}

#[tokio::test]
async fn long_content_is_previewed_in_listings() {
    let long = "x".repeat(800);
    let completion = Arc::new(ScriptedCompletion::new(vec![Ok(long.clone())]));
    let app = router(app_state(completion));
    send(&app, post_generation(json!({ "request": "long one" }))).await;

    let (_, _, body) = send(&app, get("/generations")).await;
    let preview = json_body(&body)["records"][0]["preview"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(preview, format!("{}...", &long[..500]));
}

#[tokio::test]
async fn example_requests_are_listed() {
    let app = router(app_state(Arc::new(ScriptedCompletion::default())));

    let (status, _, body) = send(&app, get("/catalog/examples")).await;
    assert_eq!(status, StatusCode::OK);
    let listed = json_body(&body);
    let examples = listed["examples"].as_array().unwrap();
    let labels: Vec<&str> = examples.iter().map(|e| e["label"].as_str().unwrap()).collect();
    assert_eq!(
        labels,
        vec!["Kaggle Python course", "Pandas training", "Machine learning quiz"]
    );
    assert_eq!(examples[2]["generation_type"], "interactive_quiz");
    assert!(examples[0]["request"].as_str().unwrap().contains("Python"));
}

#[test]
fn api_doc_lists_every_route() {
    let doc = ApiDoc::openapi();
    for path in [
        "/generations",
        "/generations/{id}/export",
        "/history",
        "/session",
        "/catalog/courses",
        "/catalog/stats",
        "/catalog/exercises",
        "/catalog/examples",
    ] {
        assert!(doc.paths.paths.contains_key(path), "missing {}", path);
    }
}
