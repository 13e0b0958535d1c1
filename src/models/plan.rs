use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::slot::StudySlot;

/// A user's study schedule over a date range.
///
/// Days are keyed by their local calendar date. The canonical date key is
/// computed once at ingestion, so lookups never re-parse or reformat
/// timestamps. The whole value is replaced wholesale on every refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyPlan {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub ai_generated: bool,
    pub days: BTreeMap<NaiveDate, PlanDay>,
}

impl StudyPlan {
    pub fn day(&self, date: NaiveDate) -> Option<&PlanDay> {
        self.days.get(&date)
    }

    pub fn find_slot(&self, slot_id: Uuid) -> Option<&StudySlot> {
        self.days
            .values()
            .flat_map(|day| day.slots.iter())
            .find(|slot| slot.id == slot_id)
    }
}

/// One calendar date within a plan, holding that day's slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDay {
    pub date: NaiveDate,
    pub goal_minutes: u32,
    pub slots: Vec<StudySlot>,
}
