//! crates/course_studio_core/src/catalog.rs
//!
//! The record store: the course, module and exercise tables loaded once per
//! session, plus the built-in fallback dataset and summary statistics.

use crate::domain::{Course, Exercise, ExerciseCategory, Module};
use serde::Serialize;
use std::collections::BTreeMap;

pub const FALLBACK_SOURCE: &str = "Sample Data";

/// The three tables. Treated as read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    pub courses: Vec<Course>,
    pub modules: Vec<Module>,
    pub exercises: Vec<ExerciseCategory>,
}

/// A loaded catalog together with the non-fatal problems hit while loading it.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    pub warnings: Vec<String>,
}

impl Catalog {
    /// A small dataset with the same schema, used when the course table is unavailable.
    pub fn fallback() -> Self {
        Self {
            courses: vec![
                Course {
                    id: 1,
                    title: "Python Basics".to_string(),
                    domain: "Programming".to_string(),
                    level: "Beginner".to_string(),
                    duration_hours: Some(8.0),
                    prerequisites: "None".to_string(),
                    description: None,
                    source: FALLBACK_SOURCE.to_string(),
                },
                Course {
                    id: 2,
                    title: "Pandas Data Analysis".to_string(),
                    domain: "Data Science".to_string(),
                    level: "Intermediate".to_string(),
                    duration_hours: Some(6.0),
                    prerequisites: "Python".to_string(),
                    description: None,
                    source: FALLBACK_SOURCE.to_string(),
                },
            ],
            modules: vec![
                Module {
                    id: 1,
                    course_id: 1,
                    order: 1,
                    title: "Variables and Types".to_string(),
                    duration_minutes: 60,
                    concepts: "int, float, string, boolean".to_string(),
                    example: None,
                    level: None,
                    source: None,
                },
                Module {
                    id: 2,
                    course_id: 2,
                    order: 1,
                    title: "DataFrame Basics".to_string(),
                    duration_minutes: 90,
                    concepts: "read_csv, head, info, describe".to_string(),
                    example: None,
                    level: None,
                    source: None,
                },
            ],
            exercises: vec![ExerciseCategory {
                category: "Python Basics".to_string(),
                level: "Beginner".to_string(),
                exercises: vec![Exercise {
                    title: "Hello World".to_string(),
                    description: "Create a program that prints Hello World".to_string(),
                    starter_code: None,
                    solution: None,
                    test_cases: vec![],
                }],
            }],
        }
    }

    /// Distinct domain values in first-appearance order.
    pub fn domains(&self) -> Vec<String> {
        distinct(self.courses.iter().map(|c| c.domain.as_str()))
    }

    /// Distinct level values in first-appearance order.
    pub fn levels(&self) -> Vec<String> {
        distinct(self.courses.iter().map(|c| c.level.as_str()))
    }

    /// Reports duplicate course ids, modules whose order indices do not run 1..=n
    /// within their course, and modules that point at a course missing from the table.
    pub fn integrity_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let mut seen_ids = Vec::with_capacity(self.courses.len());
        for course in &self.courses {
            if seen_ids.contains(&course.id) {
                warnings.push(format!("Duplicate course id {}", course.id));
            } else {
                seen_ids.push(course.id);
            }
        }

        let mut by_course: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
        for module in &self.modules {
            by_course.entry(module.course_id).or_default().push(module.order);
        }

        for (course_id, mut orders) in by_course {
            if !self.courses.is_empty() && !self.courses.iter().any(|c| c.id == course_id) {
                warnings.push(format!("Modules reference unknown course {}", course_id));
            }
            orders.sort_unstable();
            let expected: Vec<u32> = (1..=orders.len() as u32).collect();
            if orders != expected {
                warnings.push(format!(
                    "Module order for course {} is not contiguous from 1: {:?}",
                    course_id, orders
                ));
            }
        }
        warnings
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|v| v == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

//=========================================================================================
// Statistics
//=========================================================================================

/// Counts and breakdowns shown on the catalog dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    pub course_count: usize,
    pub module_count: usize,
    pub exercise_category_count: usize,
    pub exercise_count: usize,
    pub courses_per_source: BTreeMap<String, usize>,
    pub courses_per_level: BTreeMap<String, usize>,
    pub courses_per_domain: BTreeMap<String, usize>,
    pub modules_per_course: BTreeMap<u32, usize>,
    pub average_module_minutes: Option<f64>,
    pub total_course_hours: f64,
    pub domains: Vec<String>,
    pub levels: Vec<String>,
}

impl CatalogStats {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut courses_per_source = BTreeMap::new();
        let mut courses_per_level = BTreeMap::new();
        let mut courses_per_domain = BTreeMap::new();
        for course in &catalog.courses {
            *courses_per_source.entry(course.source.clone()).or_insert(0) += 1;
            *courses_per_level.entry(course.level.clone()).or_insert(0) += 1;
            *courses_per_domain.entry(course.domain.clone()).or_insert(0) += 1;
        }

        let mut modules_per_course = BTreeMap::new();
        for module in &catalog.modules {
            *modules_per_course.entry(module.course_id).or_insert(0) += 1;
        }

        let average_module_minutes = if catalog.modules.is_empty() {
            None
        } else {
            let total: u64 = catalog.modules.iter().map(|m| u64::from(m.duration_minutes)).sum();
            Some(total as f64 / catalog.modules.len() as f64)
        };

        Self {
            course_count: catalog.courses.len(),
            module_count: catalog.modules.len(),
            exercise_category_count: catalog.exercises.len(),
            exercise_count: catalog.exercises.iter().map(|c| c.exercises.len()).sum(),
            courses_per_source,
            courses_per_level,
            courses_per_domain,
            modules_per_course,
            average_module_minutes,
            total_course_hours: catalog.courses.iter().filter_map(|c| c.duration_hours).sum(),
            domains: catalog.domains(),
            levels: catalog.levels(),
        }
    }
}
