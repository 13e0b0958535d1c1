//! Time-axis bounds and per-slot geometry for the week view.
//!
//! Geometry is monotonic in start time. Overlapping slots on the same day
//! are not special-cased: they render in insertion order, which the week
//! view inherits from the source data.

use chrono::{NaiveTime, Timelike};

use super::week::WeekGrid;
use crate::models::slot::StudySlot;

/// Short slots are clamped to this height so they stay legible and tappable.
pub const MIN_SLOT_HEIGHT_PX: f64 = 24.0;

/// Axis window used when a week holds no slots at all.
pub const DEFAULT_START_HOUR: u32 = 8;
pub const DEFAULT_END_HOUR: u32 = 22;

const PADDING_HOURS: u32 = 1;

/// Inclusive hour window `[min_hour, max_hour]` the week view draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBounds {
    pub min_hour: u32,
    pub max_hour: u32,
}

impl TimeBounds {
    /// Scan every slot across the week: minimum start hour to maximum end
    /// hour (rounded up past a partial hour), padded by one hour each side
    /// and clamped to [0, 24]. Slotless weeks fall back to the default
    /// window.
    pub fn for_week(grid: &WeekGrid<'_>) -> Self {
        let mut span: Option<(u32, u32)> = None;
        for slot in grid.slots() {
            let start = slot.start_time.hour();
            let end = end_hour_rounded_up(slot.end_time);
            span = Some(match span {
                Some((min, max)) => (min.min(start), max.max(end)),
                None => (start, end),
            });
        }
        let (min_hour, max_hour) = span.unwrap_or((DEFAULT_START_HOUR, DEFAULT_END_HOUR));
        Self {
            min_hour: min_hour.saturating_sub(PADDING_HOURS),
            max_hour: (max_hour + PADDING_HOURS).min(24),
        }
    }

    pub fn span_hours(&self) -> u32 {
        self.max_hour - self.min_hour
    }
}

fn end_hour_rounded_up(end: NaiveTime) -> u32 {
    if end.minute() > 0 || end.second() > 0 {
        end.hour() + 1
    } else {
        end.hour()
    }
}

/// Minutes elapsed between `min_hour:00` and `time`.
pub fn offset_minutes(time: NaiveTime, min_hour: u32) -> i64 {
    time.num_seconds_from_midnight() as i64 / 60 - (min_hour as i64) * 60
}

/// Vertical placement of one slot inside its day column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotGeometry {
    pub top: f64,
    pub height: f64,
}

pub fn slot_geometry(slot: &StudySlot, min_hour: u32, pixels_per_hour: f64) -> SlotGeometry {
    let top = offset_minutes(slot.start_time, min_hour) as f64 / 60.0 * pixels_per_hour;
    let height =
        (slot.duration_minutes() as f64 / 60.0 * pixels_per_hour).max(MIN_SLOT_HEIGHT_PX);
    SlotGeometry { top, height }
}
