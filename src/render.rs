//! Terminal rendering of the week grid.
//!
//! Placement comes entirely from the layout engine: each slot's pixel
//! geometry is mapped onto 15-minute character rows, so what prints here is
//! exactly what a graphical view would draw, just coarser. Completed slots
//! are marked `[x]`.

use chrono::NaiveDate;

use crate::grid::layout::{slot_geometry, TimeBounds};
use crate::grid::week::WeekGrid;
use crate::models::plan::StudyPlan;

const ROWS_PER_HOUR: usize = 4;
const COL_WIDTH: usize = 14;
const GUTTER: usize = 6;

pub fn render_week(plan: &StudyPlan, reference: NaiveDate, pixels_per_hour: f64) -> String {
    let grid = WeekGrid::build(&plan.days, reference);
    let bounds = TimeBounds::for_week(&grid);
    let rows = bounds.span_hours() as usize * ROWS_PER_HOUR;
    let px_per_row = pixels_per_hour / ROWS_PER_HOUR as f64;

    // Paint each day column off-screen, then stitch rows together.
    let mut columns: Vec<Vec<String>> = Vec::with_capacity(7);
    for entry in &grid.entries {
        let mut column = vec![" ".repeat(COL_WIDTH); rows];
        if let Some(day) = entry.day {
            for slot in &day.slots {
                let geometry = slot_geometry(slot, bounds.min_hour, pixels_per_hour);
                let top = (geometry.top / px_per_row).round() as usize;
                let height = ((geometry.height / px_per_row).round() as usize).max(1);
                let marker = if slot.completed { "[x]" } else { "[ ]" };
                for row in top..(top + height).min(rows) {
                    column[row] = if row == top {
                        pad(&format!("{marker} {}", slot.subject.name))
                    } else {
                        pad("|")
                    };
                }
            }
        }
        columns.push(column);
    }

    let mut out = String::new();
    out.push_str(&" ".repeat(GUTTER));
    for entry in &grid.entries {
        out.push_str(&pad(&entry.date.format("%a").to_string()));
        out.push(' ');
    }
    out.push('\n');
    out.push_str(&" ".repeat(GUTTER));
    for entry in &grid.entries {
        out.push_str(&pad(&entry.date_key()));
        out.push(' ');
    }
    out.push('\n');

    for row in 0..rows {
        if row % ROWS_PER_HOUR == 0 {
            let hour = bounds.min_hour as usize + row / ROWS_PER_HOUR;
            out.push_str(&format!("{hour:02}:00 "));
        } else {
            out.push_str(&" ".repeat(GUTTER));
        }
        for column in &columns {
            out.push_str(&column[row]);
            out.push(' ');
        }
        out.push('\n');
    }

    out
}

fn pad(text: &str) -> String {
    let truncated: String = text.chars().take(COL_WIDTH).collect();
    format!("{:<1$}", truncated, COL_WIDTH)
}
