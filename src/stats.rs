//! Weekly progress aggregation.
//!
//! Pure summary over one plan week: planned vs completed study minutes,
//! question-outcome totals, and the strongest/weakest day. Break slots
//! never count toward studied time.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::grid::week::{week_start, WeekGrid};
use crate::models::outcome::QuestionOutcome;
use crate::models::plan::StudyPlan;

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, Serialize)]
pub struct WeekSummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub planned_minutes: i64,
    pub completed_minutes: i64,
    pub completion_rate: f64,
    pub questions: QuestionOutcome,
    pub best_day: Option<String>,
    pub worst_day: Option<String>,
    pub days: Vec<DaySummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub goal_minutes: u32,
    pub planned_minutes: i64,
    pub completed_minutes: i64,
    pub slots_total: usize,
    pub slots_completed: usize,
}

pub fn week_summary(plan: &StudyPlan, reference: NaiveDate) -> WeekSummary {
    let grid = WeekGrid::build(&plan.days, reference);

    let mut days = Vec::with_capacity(7);
    let mut planned_minutes = 0i64;
    let mut completed_minutes = 0i64;
    let mut questions = QuestionOutcome::default();

    for entry in &grid.entries {
        let mut summary = DaySummary {
            date: entry.date,
            goal_minutes: 0,
            planned_minutes: 0,
            completed_minutes: 0,
            slots_total: 0,
            slots_completed: 0,
        };
        if let Some(day) = entry.day {
            summary.goal_minutes = day.goal_minutes;
            for slot in &day.slots {
                if !slot.kind.counts_toward_goal() {
                    continue;
                }
                summary.slots_total += 1;
                summary.planned_minutes += slot.duration_minutes();
                if slot.completed {
                    summary.slots_completed += 1;
                    summary.completed_minutes += slot.duration_minutes();
                    if let Some(outcome) = slot.outcome {
                        questions.correct += outcome.correct;
                        questions.wrong += outcome.wrong;
                        questions.blank += outcome.blank;
                    }
                }
            }
        }
        planned_minutes += summary.planned_minutes;
        completed_minutes += summary.completed_minutes;
        days.push(summary);
    }

    // Best/worst by completed minutes, among days that planned any work.
    let best_day = days
        .iter()
        .enumerate()
        .filter(|(_, d)| d.planned_minutes > 0)
        .max_by_key(|(_, d)| d.completed_minutes)
        .map(|(i, _)| DAY_NAMES[i].to_string());
    let worst_day = days
        .iter()
        .enumerate()
        .filter(|(_, d)| d.planned_minutes > 0)
        .min_by_key(|(_, d)| d.completed_minutes)
        .map(|(i, _)| DAY_NAMES[i].to_string());

    let completion_rate = if planned_minutes > 0 {
        completed_minutes as f64 / planned_minutes as f64
    } else {
        0.0
    };

    let monday = week_start(reference);
    WeekSummary {
        week_start: monday,
        week_end: monday + Duration::days(6),
        planned_minutes,
        completed_minutes,
        completion_rate,
        questions,
        best_day,
        worst_day,
        days,
    }
}
