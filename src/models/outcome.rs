use serde::{Deserialize, Serialize};

/// Question tally captured when a slot is marked complete.
///
/// All counts default to zero; the whole struct travels inside the
/// completion mutation, never on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub correct: u32,
    pub wrong: u32,
    pub blank: u32,
}

impl QuestionOutcome {
    /// Build an outcome from raw capture-form fields. Empty or unparseable
    /// input (including negative numbers) counts as zero.
    pub fn from_form(correct: &str, wrong: &str, blank: &str) -> Self {
        Self {
            correct: parse_count(correct),
            wrong: parse_count(wrong),
            blank: parse_count(blank),
        }
    }

    pub fn total(&self) -> u32 {
        self.correct + self.wrong + self.blank
    }
}

fn parse_count(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}
