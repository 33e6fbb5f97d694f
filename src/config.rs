//! Runtime knobs, loadable from JSON. Every field has a default, so `{}` and
//! partial objects are valid.

use serde::Deserialize;

use crate::error::PageError;
use crate::{counter, effects, mascot, streak};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub counter_duration_ms: u32,
    pub counter_frame_ms: u32,
    pub mascot_frames: Vec<String>,
    pub mascot_frame_ms: u32,
    pub mascot_fade_ms: u32,
    pub current_streak: u32,
    pub calendar_days: u32,
    pub confetti_pieces: usize,
    pub background_particles: usize,
    /// Upper bound of the random start delay of floating elements, seconds.
    pub float_max_phase: f64,
    /// `log` level name; unknown names fall back to `info`.
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            counter_duration_ms: counter::DURATION_MS,
            counter_frame_ms: counter::FRAME_MS,
            mascot_frames: mascot::default_frames(),
            mascot_frame_ms: mascot::FRAME_MS,
            mascot_fade_ms: mascot::FADE_MS,
            current_streak: streak::CURRENT_STREAK,
            calendar_days: streak::CALENDAR_DAYS,
            confetti_pieces: effects::CONFETTI_PIECES,
            background_particles: effects::BACKGROUND_PARTICLES,
            float_max_phase: 2.0,
            log_level: "info".to_string(),
        }
    }
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self, PageError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_default() {
        assert_eq!(PageConfig::from_json("").unwrap(), PageConfig::default());
        assert_eq!(PageConfig::from_json("{}").unwrap(), PageConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = PageConfig::from_json(r#"{"current_streak": 3, "log_level": "debug"}"#).unwrap();
        assert_eq!(cfg.current_streak, 3);
        assert_eq!(cfg.calendar_days, 21);
        assert_eq!(cfg.level(), log::Level::Debug);
        assert_eq!(cfg.mascot_frames.len(), 3);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(PageConfig::from_json("{nope"), Err(PageError::Config(_))));
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let cfg = PageConfig { log_level: "chatty".into(), ..PageConfig::default() };
        assert_eq!(cfg.level(), log::Level::Info);
    }
}
