//! services/api/src/bin/openapi.rs
//!
//! Dumps the Course Studio OpenAPI document so clients can be generated without
//! starting the server.
//!
//! Usage: `openapi [OUTPUT]`. Writes to `openapi.json` by default; `-` prints to stdout.

use api_lib::{error::ApiError, web::ApiDoc};
use std::path::Path;
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

/// The shared `ApiDoc`, stamped with this crate's version.
fn course_studio_doc() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = "Course Studio API".to_string();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    doc
}

fn main() -> Result<(), ApiError> {
    let output = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let doc = course_studio_doc();
    let json = doc.to_pretty_json()?;

    if output == "-" {
        println!("{}", json);
        return Ok(());
    }

    if let Some(parent) = Path::new(&output).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&output, json)?;
    eprintln!(
        "Wrote {} paths for Course Studio API v{} to {}",
        doc.paths.paths.len(),
        doc.info.version,
        output
    );
    Ok(())
}
