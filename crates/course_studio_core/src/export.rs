//! crates/course_studio_core/src/export.rs
//!
//! Serializes a generation record into a downloadable document.

use crate::domain::{GenerationRecord, OutputFormat};

/// A ready-to-save document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub mime_type: &'static str,
    pub body: String,
}

/// Markdown and structured text carry the content verbatim; JSON carries the whole record.
pub fn export_record(
    record: &GenerationRecord,
    format: OutputFormat,
) -> Result<ExportDocument, serde_json::Error> {
    let body = match format {
        OutputFormat::Markdown | OutputFormat::StructuredText => record.content.clone(),
        OutputFormat::Json => serde_json::to_string_pretty(record)?,
    };

    Ok(ExportDocument {
        file_name: export_file_name(record, format),
        mime_type: format.mime_type(),
        body,
    })
}

/// `generation_YYYYMMDD_HHMM.<ext>`, from the record's timestamp.
pub fn export_file_name(record: &GenerationRecord, format: OutputFormat) -> String {
    format!(
        "generation_{}.{}",
        record.timestamp.format("%Y%m%d_%H%M"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GenerationType;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn record() -> GenerationRecord {
        GenerationRecord {
            id: Uuid::new_v4(),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 14, 9, 5, 0).unwrap(),
            generation_type: GenerationType::FullCourse,
            domain: Some("Data Science".to_string()),
            level: Some("Beginner".to_string()),
            duration_hours: 8,
            output_format: OutputFormat::Json,
            request: "Build a SQL course".to_string(),
            content: "# Intro to SQL\n\n## Programme".to_string(),
            sources_used: vec!["Kaggle Learn".to_string()],
            courses_per_source: Default::default(),
            filtered_course_count: 2,
        }
    }

    #[test]
    fn markdown_is_content_verbatim() {
        let doc = export_record(&record(), OutputFormat::Markdown).unwrap();
        assert_eq!(doc.body, "# Intro to SQL\n\n## Programme");
        assert_eq!(doc.file_name, "generation_20260314_0905.md");
        assert!(doc.mime_type.starts_with("text/markdown"));
    }

    #[test]
    fn json_carries_the_full_record() {
        let original = record();
        let doc = export_record(&original, OutputFormat::Json).unwrap();
        assert_eq!(doc.file_name, "generation_20260314_0905.json");

        let parsed: GenerationRecord = serde_json::from_str(&doc.body).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn structured_text_uses_txt() {
        let doc = export_record(&record(), OutputFormat::StructuredText).unwrap();
        assert_eq!(doc.file_name, "generation_20260314_0905.txt");
    }
}
