//! Streak calendar cells.

use chrono::{Days, NaiveDate};

pub const CURRENT_STREAK: u32 = 15;
pub const CALENDAR_DAYS: u32 = 21;
pub const GLOW_MS: u32 = 1000;
pub const GLOW_SHADOW: &str = "0 0 15px rgba(255, 107, 53, 0.8)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreakDay {
    pub date: NaiveDate,
    /// Days before today; 0 is today.
    pub offset: u32,
    pub active: bool,
    pub today: bool,
}

impl StreakDay {
    /// Day-of-month shown in the cell.
    pub fn label(&self) -> String {
        self.date.format("%-d").to_string()
    }

    pub fn class_name(&self) -> String {
        let mut class = String::from("calendar-day");
        if self.active {
            class.push_str(" active");
        }
        if self.today {
            class.push_str(" today");
        }
        class
    }

    /// Line logged when an active day is clicked.
    pub fn describe(&self) -> String {
        format!("Streak day: {}", self.date.format("%a %b %d %Y"))
    }
}

/// Cells for the `days` days ending at `today`, oldest first. A day is active
/// when its offset is within the current streak.
pub fn build(today: NaiveDate, current_streak: u32, days: u32) -> Vec<StreakDay> {
    (0..days)
        .rev()
        .filter_map(|offset| {
            let date = today.checked_sub_days(Days::new(offset.into()))?;
            Some(StreakDay { date, offset, active: offset <= current_streak, today: offset == 0 })
        })
        .collect()
}
