//! crates/course_studio_core/src/filter.rs
//!
//! Narrows the course table by domain and level before it is embedded in a prompt.
//! A value that does not occur in the table is a no-op, never an error; the outcome
//! reports it so callers can surface a warning.

use crate::domain::Course;
use std::collections::BTreeMap;

/// The rows kept by [`filter_courses`] plus any filter values that were ignored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterOutcome {
    pub courses: Vec<Course>,
    pub ignored_domain: Option<String>,
    pub ignored_level: Option<String>,
}

impl FilterOutcome {
    /// Human-readable notes for every ignored filter value.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(domain) = &self.ignored_domain {
            warnings.push(format!("Unknown domain '{}' ignored; no domain filter applied", domain));
        }
        if let Some(level) = &self.ignored_level {
            warnings.push(format!("Unknown level '{}' ignored; no level filter applied", level));
        }
        warnings
    }

    /// Distinct source labels of the kept courses, in first-appearance order.
    pub fn sources(&self) -> Vec<String> {
        let mut sources: Vec<String> = Vec::new();
        for course in &self.courses {
            if !sources.contains(&course.source) {
                sources.push(course.source.clone());
            }
        }
        sources
    }

    /// How many kept courses come from each source.
    pub fn source_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for course in &self.courses {
            *counts.entry(course.source.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// Keeps the courses matching `domain`, then those matching `level`.
///
/// Each value only applies when it occurs somewhere in `courses`; otherwise that
/// filter passes rows through unchanged. The input slice is never modified and row
/// order is preserved.
pub fn filter_courses(courses: &[Course], domain: Option<&str>, level: Option<&str>) -> FilterOutcome {
    let mut outcome = FilterOutcome {
        courses: courses.to_vec(),
        ..Default::default()
    };
    if courses.is_empty() {
        return outcome;
    }

    if let Some(domain) = domain {
        if courses.iter().any(|c| c.domain == domain) {
            outcome.courses.retain(|c| c.domain == domain);
        } else {
            outcome.ignored_domain = Some(domain.to_string());
        }
    }

    if let Some(level) = level {
        if courses.iter().any(|c| c.level == level) {
            outcome.courses.retain(|c| c.level == level);
        } else {
            outcome.ignored_level = Some(level.to_string());
        }
    }

    outcome
}
