//! crates/course_studio_core/src/table.rs
//!
//! Text renderings of the catalog tables for the prompt's table slots.
//! Rows keep their current order. An empty table renders as [`EMPTY_TABLE`]
//! so the model always gets an explicit signal instead of a blank.

use crate::domain::{Course, ExerciseCategory, Module};
use tracing::warn;

pub const EMPTY_TABLE: &str = "no records";

const COLUMN_GAP: &str = "  ";

pub fn render_courses(courses: &[Course]) -> String {
    let rows = courses
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.title.clone(),
                c.domain.clone(),
                c.level.clone(),
                c.duration_hours
                    .map(|h| h.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                c.prerequisites.clone(),
                c.source.clone(),
            ]
        })
        .collect::<Vec<_>>();
    render_fixed_width(
        &["id", "title", "domain", "level", "duration_hours", "prerequisites", "source"],
        &rows,
    )
}

pub fn render_modules(modules: &[Module]) -> String {
    let rows = modules
        .iter()
        .map(|m| {
            vec![
                m.id.to_string(),
                m.course_id.to_string(),
                m.order.to_string(),
                m.title.clone(),
                m.duration_minutes.to_string(),
                m.concepts.clone(),
            ]
        })
        .collect::<Vec<_>>();
    render_fixed_width(
        &["id", "course_id", "order", "title", "duration_minutes", "concepts"],
        &rows,
    )
}

/// Exercises are nested, so they go in as pretty-printed JSON.
pub fn render_exercises(categories: &[ExerciseCategory]) -> String {
    if categories.is_empty() {
        return EMPTY_TABLE.to_string();
    }
    match serde_json::to_string_pretty(categories) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to serialize exercises for the prompt: {}", e);
            EMPTY_TABLE.to_string()
        }
    }
}

/// Left-aligned columns sized to their widest cell, header first.
fn render_fixed_width(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return EMPTY_TABLE.to_string();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP)
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_line(headers.to_vec()));
    for row in rows {
        lines.push(format_line(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Exercise;

    fn course(id: u32, title: &str, hours: Option<f64>) -> Course {
        Course {
            id,
            title: title.to_string(),
            domain: "Data Science".to_string(),
            level: "Beginner".to_string(),
            duration_hours: hours,
            prerequisites: "None".to_string(),
            description: None,
            source: "Kaggle Learn".to_string(),
        }
    }

    #[test]
    fn empty_tables_render_the_placeholder() {
        assert_eq!(render_courses(&[]), EMPTY_TABLE);
        assert_eq!(render_modules(&[]), EMPTY_TABLE);
        assert_eq!(render_exercises(&[]), EMPTY_TABLE);
    }

    #[test]
    fn courses_render_header_then_rows_in_order() {
        let rendered = render_courses(&[course(2, "Pandas", Some(6.0)), course(1, "Intro to SQL", Some(7.5))]);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id  title         domain"));
        assert!(lines[1].starts_with("2   Pandas        Data Science"));
        assert!(lines[2].starts_with("1   Intro to SQL  Data Science"));
        assert!(lines[2].contains("  7.5  "));
        assert!(lines.iter().all(|l| !l.ends_with(' ')));
    }

    #[test]
    fn unknown_duration_renders_as_dash() {
        let rendered = render_courses(&[course(1, "Python", None)]);
        assert!(rendered.lines().nth(1).unwrap().contains("  -  "));
    }

    #[test]
    fn modules_keep_their_columns() {
        let module = Module {
            id: 1,
            course_id: 2,
            order: 1,
            title: "DataFrame Basics".to_string(),
            duration_minutes: 90,
            concepts: "read_csv, head, info, describe".to_string(),
            example: None,
            level: None,
            source: None,
        };
        let rendered = render_modules(&[module]);
        assert_eq!(
            rendered,
            "id  course_id  order  title             duration_minutes  concepts\n\
             1   2          1      DataFrame Basics  90                read_csv, head, info, describe"
        );
    }

    #[test]
    fn exercises_render_as_json() {
        let categories = vec![ExerciseCategory {
            category: "Python Basics".to_string(),
            level: "Beginner".to_string(),
            exercises: vec![Exercise {
                title: "Hello World".to_string(),
                description: "Print Hello World".to_string(),
                starter_code: None,
                solution: None,
                test_cases: vec![],
            }],
        }];
        let rendered = render_exercises(&categories);
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed[0]["exercises"][0]["title"], "Hello World");
        assert!(parsed[0]["exercises"][0].get("solution").is_none());
    }
}
