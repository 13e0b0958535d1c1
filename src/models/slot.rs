use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::outcome::QuestionOutcome;

/// A single scheduled study interval inside a plan day.
///
/// Times are same-day wall clock; `start_time < end_time` is guaranteed by
/// ingestion. Duration is always recomputed from the two times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudySlot {
    pub id: Uuid,
    pub subject: SubjectRef,
    pub topic: Option<TopicRef>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub kind: SlotKind,
    pub completed: bool,
    pub note: String,
    pub rationale: String,
    pub outcome: Option<QuestionOutcome>,
}

impl StudySlot {
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Study,
    Review,
    Practice,
    Break,
}

impl Default for SlotKind {
    fn default() -> Self {
        Self::Study
    }
}

impl SlotKind {
    /// Break slots don't count toward studied minutes.
    pub fn counts_toward_goal(&self) -> bool {
        !matches!(self, Self::Break)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectRef {
    pub id: Uuid,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicRef {
    pub id: Uuid,
    pub name: String,
}
