//! Hero stat counters (`.stat-number[data-target]`).

use crate::stage::leading_int;

pub const DURATION_MS: u32 = 2000;
pub const FRAME_MS: u32 = 16;

/// Fixed-step count-up from 0 to `target`, one step per frame.
#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: u64,
    increment: f64,
    current: f64,
    done: bool,
}

impl CounterAnimation {
    pub fn new(target: u64, duration_ms: u32, frame_ms: u32) -> Self {
        let frames = (duration_ms as f64 / frame_ms.max(1) as f64).max(1.0);
        Self { target, increment: target as f64 / frames, current: 0.0, done: false }
    }

    /// Advance one frame and return the text to display.
    pub fn tick(&mut self) -> String {
        self.current += self.increment;
        if self.current >= self.target as f64 {
            self.current = self.target as f64;
            self.done = true;
        }
        format_count(self.current.floor() as u64, self.target)
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Run every remaining frame; returns the final text.
    pub fn finish(mut self) -> String {
        let mut text = format_count(0, self.target);
        while !self.done {
            text = self.tick();
        }
        text
    }
}

/// Suffix rules pick their unit from the target, not the current value:
/// millions get one decimal and `M`, thousands are rounded to `K`, targets
/// under 100 are percentages, anything else is shown as is.
pub fn format_count(value: u64, target: u64) -> String {
    if target >= 1_000_000 {
        let tenths = (value as f64 / 100_000.0).round() / 10.0;
        format!("{tenths:.1}M")
    } else if target >= 1_000 {
        format!("{}K", (value as f64 / 1_000.0).round() as u64)
    } else if target < 100 {
        format!("{value}%")
    } else {
        value.to_string()
    }
}

/// `data-target` value; malformed or negative reads as 0.
pub fn parse_target(raw: Option<&str>) -> u64 {
    leading_int(raw).and_then(|v| u64::try_from(v).ok()).unwrap_or(0)
}
