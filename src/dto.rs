//! # AceIt Planner wire-format payloads
//!
//! Everything that crosses the plan-service boundary lives here. Incoming
//! payloads are loose (`*Payload`, deserialized with defaults for optional
//! fields) and are converted into the typed model exactly once via
//! [`PlanPayload::into_plan`]; malformed data is rejected there instead of
//! leaking `Option`s into the rest of the crate.
//!
//! Conventions:
//! - `*Payload` → deserialized from service JSON
//! - `*Request` → serialized to service JSON
//! - Dates cross the boundary as `YYYY-MM-DD` (local calendar fields),
//!   times as `HH:MM[:SS]` 24-hour, same-day only.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::outcome::QuestionOutcome;
use crate::models::plan::{PlanDay, StudyPlan};
use crate::models::slot::{SlotKind, StudySlot, SubjectRef, TopicRef};

// ============================================================================
// Incoming payloads
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PlanPayload {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub ai_generated: bool,
    #[serde(default)]
    pub days: Vec<DayPayload>,
}

#[derive(Debug, Deserialize)]
pub struct DayPayload {
    pub date: NaiveDate,
    #[serde(default)]
    pub goal_minutes: Option<u32>,
    #[serde(default)]
    pub slots: Vec<SlotPayload>,
}

#[derive(Debug, Deserialize)]
pub struct SlotPayload {
    pub id: Uuid,
    pub subject: SubjectPayload,
    #[serde(default)]
    pub topic: Option<TopicPayload>,
    #[serde(deserialize_with = "flex_time::deserialize")]
    pub start_time: NaiveTime,
    #[serde(deserialize_with = "flex_time::deserialize")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub kind: SlotKind,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub rationale: Option<String>,
    #[serde(default)]
    pub outcome: Option<QuestionOutcome>,
}

#[derive(Debug, Deserialize)]
pub struct SubjectPayload {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TopicPayload {
    pub id: Uuid,
    pub name: String,
}

/// Fallback subject color when the service sends none.
const DEFAULT_SUBJECT_COLOR: &str = "#6b7280";

impl PlanPayload {
    /// Normalize the payload into the typed model. This is the only place
    /// optional fields receive defaults and invariants are checked.
    pub fn into_plan(self) -> AppResult<StudyPlan> {
        if self.start_date > self.end_date {
            return Err(AppError::Validation(format!(
                "plan {} has start date after end date",
                self.id
            )));
        }

        let mut days = BTreeMap::new();
        for day in self.days {
            let date = day.date;
            let mut slots = Vec::with_capacity(day.slots.len());
            for slot in day.slots {
                slots.push(slot.into_slot()?);
            }
            let goal_minutes = day.goal_minutes.unwrap_or_else(|| {
                slots
                    .iter()
                    .filter(|s| s.kind.counts_toward_goal())
                    .map(|s| s.duration_minutes() as u32)
                    .sum()
            });
            let previous = days.insert(
                date,
                PlanDay {
                    date,
                    goal_minutes,
                    slots,
                },
            );
            if previous.is_some() {
                return Err(AppError::Validation(format!(
                    "plan {} has more than one day entry for {}",
                    self.id, date
                )));
            }
        }

        Ok(StudyPlan {
            id: self.id,
            title: self.title,
            description: self.description.unwrap_or_default(),
            start_date: self.start_date,
            end_date: self.end_date,
            is_active: self.is_active,
            ai_generated: self.ai_generated,
            days,
        })
    }
}

impl SlotPayload {
    fn into_slot(self) -> AppResult<StudySlot> {
        if self.start_time >= self.end_time {
            return Err(AppError::Validation(format!(
                "slot {} has non-positive duration ({} .. {})",
                self.id, self.start_time, self.end_time
            )));
        }

        Ok(StudySlot {
            id: self.id,
            subject: SubjectRef {
                id: self.subject.id,
                name: self.subject.name,
                color: self
                    .subject
                    .color
                    .unwrap_or_else(|| DEFAULT_SUBJECT_COLOR.into()),
            },
            topic: self.topic.map(|t| TopicRef {
                id: t.id,
                name: t.name,
            }),
            start_time: self.start_time,
            end_time: self.end_time,
            kind: self.kind,
            completed: self.completed,
            note: self.note.unwrap_or_default(),
            rationale: self.rationale.unwrap_or_default(),
            outcome: self.outcome,
        })
    }
}

// ============================================================================
// Outgoing requests
// ============================================================================

/// POST /api/slots/:id/completion
///
/// Completion flag and outcome travel together; the mutation is atomic from
/// the client's point of view. `outcome` is omitted entirely when clearing a
/// completion.
#[derive(Debug, Clone, Serialize)]
pub struct SlotCompletionRequest {
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<QuestionOutcome>,
}

// ============================================================================
// AI daily analysis
// ============================================================================

/// GET /api/analysis/daily: AI-authored study analysis for one date.
/// Serializes both ways because results are cached locally per (user, date).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyAnalysis {
    pub summary: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weak_topics: Vec<String>,
    #[serde(default)]
    pub recommendation: String,
}

// ============================================================================
// Time parsing
// ============================================================================

/// The service emits `HH:MM:SS` but older plan payloads carry `HH:MM`;
/// accept both.
mod flex_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M"))
            .map_err(|_| serde::de::Error::custom(format!("invalid time of day: {raw}")))
    }
}
