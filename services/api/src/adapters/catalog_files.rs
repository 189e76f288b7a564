//! services/api/src/adapters/catalog_files.rs
//!
//! This module contains the adapter that reads and writes the catalog tables on disk.
//! It implements the `CatalogSource` port from the `core` crate.
//!
//! Layout inside the data directory:
//! - `courses.csv`: id, title, domain, level, duration_hours, prerequisites, description, source
//! - `modules.csv`: id, course_id, order, title, duration_minutes, concepts, example, level, source
//! - `exercises.json`: an array of `{category, level, exercises: [...]}`

use crate::error::ApiError;
use course_studio_core::{
    catalog::{Catalog, CatalogLoad},
    domain::{normalize_hours, Course, ExerciseCategory, Module},
    ports::CatalogSource,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const COURSES_FILE: &str = "courses.csv";
pub const MODULES_FILE: &str = "modules.csv";
pub const EXERCISES_FILE: &str = "exercises.json";

/// Why one of the tables could not be read.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("{0} not found")]
    Missing(String),
    #[error("failed to read {0}: {1}")]
    Io(String, std::io::Error),
    #[error("malformed table {0}: {1}")]
    Csv(String, csv::Error),
    #[error("malformed document {0}: {1}")]
    Json(String, serde_json::Error),
}

/// The course table as stored: the duration column is free text.
#[derive(Debug, Serialize, Deserialize)]
struct CourseRow {
    id: u32,
    title: String,
    domain: String,
    level: String,
    duration_hours: String,
    #[serde(default)]
    prerequisites: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    source: String,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            domain: row.domain,
            level: row.level,
            duration_hours: normalize_hours(&row.duration_hours),
            prerequisites: row.prerequisites,
            description: row.description,
            source: row.source,
        }
    }
}

impl From<&Course> for CourseRow {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            title: course.title.clone(),
            domain: course.domain.clone(),
            level: course.level.clone(),
            duration_hours: course.duration_hours.map(|h| h.to_string()).unwrap_or_default(),
            prerequisites: course.prerequisites.clone(),
            description: course.description.clone(),
            source: course.source.clone(),
        }
    }
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// Reads the three catalog files from one directory.
#[derive(Clone, Debug)]
pub struct FileCatalogSource {
    data_dir: PathBuf,
}

impl FileCatalogSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

impl CatalogSource for FileCatalogSource {
    /// A missing or malformed course table swaps in the whole fallback dataset.
    /// A missing or malformed module or exercise table becomes empty.
    fn load(&self) -> CatalogLoad {
        let mut warnings = Vec::new();

        let courses = match read_courses(&self.data_dir.join(COURSES_FILE)) {
            Ok(courses) => {
                info!("Loaded {} courses from {}", courses.len(), self.data_dir.display());
                courses
            }
            Err(e) => {
                let message = format!("Course table unavailable ({}); using the built-in sample data", e);
                warn!("{}", message);
                return CatalogLoad {
                    catalog: Catalog::fallback(),
                    warnings: vec![message],
                };
            }
        };

        let modules = read_modules(&self.data_dir.join(MODULES_FILE)).unwrap_or_else(|e| {
            warnings.push(format!("Module table unavailable ({}); continuing without modules", e));
            Vec::new()
        });

        let exercises = read_exercises(&self.data_dir.join(EXERCISES_FILE)).unwrap_or_else(|e| {
            warnings.push(format!("Exercise collection unavailable ({}); continuing without exercises", e));
            Vec::new()
        });

        let catalog = Catalog {
            courses,
            modules,
            exercises,
        };
        warnings.extend(catalog.integrity_warnings());
        for warning in &warnings {
            warn!("{}", warning);
        }

        CatalogLoad { catalog, warnings }
    }
}

fn file_label(path: &Path) -> String {
    path.display().to_string()
}

fn ensure_exists(path: &Path) -> Result<(), DataLoadError> {
    if path.exists() {
        Ok(())
    } else {
        Err(DataLoadError::Missing(file_label(path)))
    }
}

pub fn read_courses(path: &Path) -> Result<Vec<Course>, DataLoadError> {
    ensure_exists(path)?;
    let mut reader = csv::Reader::from_path(path).map_err(|e| DataLoadError::Csv(file_label(path), e))?;
    reader
        .deserialize::<CourseRow>()
        .map(|row| row.map(Course::from).map_err(|e| DataLoadError::Csv(file_label(path), e)))
        .collect()
}

pub fn read_modules(path: &Path) -> Result<Vec<Module>, DataLoadError> {
    ensure_exists(path)?;
    let mut reader = csv::Reader::from_path(path).map_err(|e| DataLoadError::Csv(file_label(path), e))?;
    reader
        .deserialize::<Module>()
        .map(|row| row.map_err(|e| DataLoadError::Csv(file_label(path), e)))
        .collect()
}

pub fn read_exercises(path: &Path) -> Result<Vec<ExerciseCategory>, DataLoadError> {
    ensure_exists(path)?;
    let raw = fs::read_to_string(path).map_err(|e| DataLoadError::Io(file_label(path), e))?;
    serde_json::from_str(&raw).map_err(|e| DataLoadError::Json(file_label(path), e))
}

//=========================================================================================
// Writing
//=========================================================================================

/// Writes the three tables into `data_dir`, creating it if needed.
pub fn write_catalog(data_dir: &Path, catalog: &Catalog) -> Result<(), ApiError> {
    fs::create_dir_all(data_dir)?;

    let mut courses = csv::Writer::from_path(data_dir.join(COURSES_FILE))?;
    for course in &catalog.courses {
        courses.serialize(CourseRow::from(course))?;
    }
    courses.flush()?;

    let mut modules = csv::Writer::from_path(data_dir.join(MODULES_FILE))?;
    for module in &catalog.modules {
        modules.serialize(module)?;
    }
    modules.flush()?;

    let exercises = serde_json::to_string_pretty(&catalog.exercises)?;
    fs::write(data_dir.join(EXERCISES_FILE), exercises)?;

    info!(
        "Wrote {} courses, {} modules and {} exercise categories to {}",
        catalog.courses.len(),
        catalog.modules.len(),
        catalog.exercises.len(),
        data_dir.display()
    );
    Ok(())
}
