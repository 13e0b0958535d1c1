//! Monday-aligned week view over a plan's days.
//!
//! Building a grid is pure and total: any reference date maps to the 7
//! consecutive dates of its ISO week, and each date picks up the matching
//! plan day by its canonical calendar-date key. Days with no data stay in
//! the grid as empty entries; the renderer decides what an empty day looks
//! like.

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

use crate::models::plan::PlanDay;
use crate::models::slot::StudySlot;

/// Monday of the ISO week containing `reference`. Sunday counts as the
/// seventh day of the week, so it shifts back six days rather than forward.
pub fn week_start(reference: NaiveDate) -> NaiveDate {
    reference - Duration::days(reference.weekday().num_days_from_monday() as i64)
}

#[derive(Debug, Clone)]
pub struct WeekEntry<'a> {
    pub date: NaiveDate,
    pub day: Option<&'a PlanDay>,
}

impl WeekEntry<'_> {
    /// Canonical `YYYY-MM-DD` key for this entry, from local calendar fields.
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// The 7-entry week structure the calendar view renders, Monday first.
#[derive(Debug, Clone)]
pub struct WeekGrid<'a> {
    pub entries: [WeekEntry<'a>; 7],
}

impl<'a> WeekGrid<'a> {
    pub fn build(days: &'a BTreeMap<NaiveDate, PlanDay>, reference: NaiveDate) -> Self {
        let monday = week_start(reference);
        let entries = std::array::from_fn(|offset| {
            let date = monday + Duration::days(offset as i64);
            WeekEntry {
                date,
                day: days.get(&date),
            }
        });
        Self { entries }
    }

    /// Every slot in the week, in day order then insertion order.
    pub fn slots(&self) -> impl Iterator<Item = &'a StudySlot> + '_ {
        self.entries
            .iter()
            .filter_map(|entry| entry.day)
            .flat_map(|day| day.slots.iter())
    }
}
