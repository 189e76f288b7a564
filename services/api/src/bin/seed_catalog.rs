//! services/api/src/bin/seed_catalog.rs
//!
//! Writes the built-in seed catalog (courses, modules and practice exercises)
//! into the data directory read by the `api` server.
//!
//! The target directory is `DATA_DIR`, or the first command-line argument.

use api_lib::{adapters::catalog_files::write_catalog, error::ApiError, seed::seed_catalog};
use course_studio_core::catalog::CatalogStats;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), ApiError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_dir = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("DATA_DIR").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./data"));

    let catalog = seed_catalog();
    write_catalog(&data_dir, &catalog)?;

    let stats = CatalogStats::from_catalog(&catalog);
    info!("Courses per source: {:?}", stats.courses_per_source);
    info!("Courses per level: {:?}", stats.courses_per_level);
    if let Some(minutes) = stats.average_module_minutes {
        info!("Average module length: {:.1} minutes", minutes);
    }
    Ok(())
}
