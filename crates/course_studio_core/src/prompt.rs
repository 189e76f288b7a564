//! crates/course_studio_core/src/prompt.rs
//!
//! Named-slot prompt templates. A template is parsed once into literal text and
//! `{slot}` placeholders; assembling it substitutes every placeholder by name in a
//! single pass, so bound values are never re-scanned for placeholders.

use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

//=========================================================================================
// The Generation Template
//=========================================================================================

pub const SLOT_COURSES: &str = "courses_table";
pub const SLOT_MODULES: &str = "modules_table";
pub const SLOT_EXERCISES: &str = "exercises_table";
pub const SLOT_GENERATION_TYPE: &str = "generation_type";
pub const SLOT_DOMAIN: &str = "domain";
pub const SLOT_LEVEL: &str = "level";
pub const SLOT_DURATION: &str = "duration";
pub const SLOT_OUTPUT_FORMAT: &str = "output_format";
pub const SLOT_HISTORY: &str = "history";
pub const SLOT_REQUEST: &str = "request";

/// Every slot [`GENERATION_TEMPLATE`] references.
pub const GENERATION_SLOTS: [&str; 10] = [
    SLOT_COURSES,
    SLOT_MODULES,
    SLOT_EXERCISES,
    SLOT_GENERATION_TYPE,
    SLOT_DOMAIN,
    SLOT_LEVEL,
    SLOT_DURATION,
    SLOT_OUTPUT_FORMAT,
    SLOT_HISTORY,
    SLOT_REQUEST,
];

pub const GENERATION_TEMPLATE: &str = r#"You are an instructional design expert who produces high-quality training content from the catalog data below.

AVAILABLE CATALOG DATA:
=== COURSES ===
{courses_table}

=== MODULES ===
{modules_table}

=== PRACTICE EXERCISES ===
{exercises_table}

GENERATION PARAMETERS:
- Content type: {generation_type}
- Domain: {domain}
- Level: {level}
- Duration: {duration}h
- Format: {output_format}

CONVERSATION SO FAR:
{history}

USER REQUEST:
{request}

INSTRUCTIONS:
1. Build precise, well-structured teaching content from the catalog data.
2. Cite the exact sources of the data you use (Kaggle Learn, Python Documentation, ...).
3. Reuse the provided exercises and code samples.
4. Respect the real durations of the modules.
5. State the exact prerequisites of the courses you draw on.
6. When you produce a course, base its programme on the real modules above.

When producing a FULL COURSE, use this structure:
# Course title taken from the catalog data

## Source and facts
- **Source**: exact source of the data
- **Duration**: duration from the catalog data
- **Level**: level from the catalog data
- **Prerequisites**: real prerequisites

## Objectives
objectives drawn from the catalog data

## Programme
the real modules with their durations and key concepts

## Practice
the collected exercises

## References
- Based on data from: the sources used

GENERATE THE CONTENT:"#;

/// Parses [`GENERATION_TEMPLATE`] and checks it against [`GENERATION_SLOTS`].
pub fn generation_template() -> Result<PromptTemplate, PromptError> {
    let template = PromptTemplate::parse(GENERATION_TEMPLATE)?;
    template.expect_slots(&GENERATION_SLOTS)?;
    Ok(template)
}

//=========================================================================================
// Errors and Results
//=========================================================================================

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// The template references slots the bindings do not supply.
    #[error("Template slots left unbound: {}", .0.join(", "))]
    MissingSlot(Vec<String>),

    /// The template's placeholders disagree with its declared slot set.
    #[error("Template slots do not match the declaration: {0}")]
    SlotMismatch(String),

    #[error("Invalid slot pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// A fully substituted prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPrompt {
    pub text: String,
    /// Binding keys the template never referenced, sorted. Non-fatal, but always a
    /// caller bug worth fixing.
    pub unused_bindings: Vec<String>,
}

//=========================================================================================
// PromptTemplate
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(String),
}

#[derive(Debug, Clone)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
    slots: BTreeSet<String>,
}

impl PromptTemplate {
    /// Splits `text` into literal runs and `{slot_name}` placeholders.
    ///
    /// Slot names are lowercase identifiers (`[a-z_][a-z0-9_]*`); any other brace
    /// usage, such as a JSON sample, stays literal.
    pub fn parse(text: &str) -> Result<Self, PromptError> {
        let placeholder = Regex::new(r"\{([a-z_][a-z0-9_]*)\}")?;

        let mut segments = Vec::new();
        let mut slots = BTreeSet::new();
        let mut cursor = 0;
        for caps in placeholder.captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > cursor {
                segments.push(Segment::Text(text[cursor..whole.start()].to_string()));
            }
            segments.push(Segment::Slot(name.as_str().to_string()));
            slots.insert(name.as_str().to_string());
            cursor = whole.end();
        }
        if cursor < text.len() {
            segments.push(Segment::Text(text[cursor..].to_string()));
        }

        Ok(Self { segments, slots })
    }

    /// The distinct slot names this template references, sorted.
    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(String::as_str)
    }

    /// Fails unless the template references exactly the `declared` slots.
    pub fn expect_slots(&self, declared: &[&str]) -> Result<(), PromptError> {
        let declared: BTreeSet<&str> = declared.iter().copied().collect();
        let found: BTreeSet<&str> = self.slots().collect();
        if declared == found {
            return Ok(());
        }

        let undeclared: Vec<&str> = found.difference(&declared).copied().collect();
        let absent: Vec<&str> = declared.difference(&found).copied().collect();
        Err(PromptError::SlotMismatch(format!(
            "undeclared [{}], never referenced [{}]",
            undeclared.join(", "),
            absent.join(", ")
        )))
    }

    /// Substitutes every slot with its binding.
    ///
    /// Values are inserted verbatim: no escaping, no truncation. Fails with
    /// [`PromptError::MissingSlot`] when any referenced slot is unbound.
    pub fn assemble(&self, bindings: &HashMap<String, String>) -> Result<AssembledPrompt, PromptError> {
        let missing: Vec<String> = self
            .slots
            .iter()
            .filter(|slot| !bindings.contains_key(slot.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(PromptError::MissingSlot(missing));
        }

        let mut unused_bindings: Vec<String> = bindings
            .keys()
            .filter(|key| !self.slots.contains(key.as_str()))
            .cloned()
            .collect();
        unused_bindings.sort();
        if !unused_bindings.is_empty() {
            warn!("Prompt bindings not referenced by the template: {:?}", unused_bindings);
        }

        let mut text = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(literal) => text.push_str(literal),
                Segment::Slot(name) => {
                    if let Some(value) = bindings.get(name) {
                        text.push_str(value);
                    }
                }
            }
        }

        Ok(AssembledPrompt {
            text,
            unused_bindings,
        })
    }
}
