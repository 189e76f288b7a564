//! crates/course_studio_core/src/history.rs
//!
//! The append-only conversation log shared by every prompt built in one session.

use crate::domain::{Role, Turn};

#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one turn at the end of the log.
    pub fn append(&mut self, role: Role, message: impl Into<String>) {
        self.turns.push(Turn {
            role,
            message: message.into(),
        });
    }

    /// One `"{role}: {message}"` line per turn, in append order. Line breaks inside a
    /// message are written as a literal `\n` so each turn stays on a single line
    /// while indentation and blank lines survive.
    /// Returns an empty string when no turn has been recorded.
    pub fn render(&self) -> String {
        render_turns(&self.turns)
    }

    /// Renders only the most recent `max_turns` turns.
    pub fn render_last(&self, max_turns: usize) -> String {
        let start = self.turns.len().saturating_sub(max_turns);
        render_turns(&self.turns[start..])
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

fn render_turns(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|turn| format!("{}: {}", turn.role, single_line(&turn.message)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn single_line(message: &str) -> String {
    message.replace("\r\n", "\\n").replace(['\n', '\r'], "\\n")
}
