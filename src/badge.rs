//! Badge copy and the poses used by the badge widgets.

use rand::seq::IndexedRandom;

use crate::motion::{Ease, Pose, Track, Tween};
use crate::rng::PhaseRng;

pub const XP_REWARD: u32 = 50;

const DEFAULT_DESCRIPTION: &str = "Achievement unlocked through dedication and learning!";

const DEFAULT_REQUIREMENTS: &[&str] = &["Complete required learning activities", "Maintain consistent progress"];

const EARNED_DATES: &[&str] = &["Today", "Yesterday", "3 days ago", "1 week ago", "2 weeks ago"];

pub const HOVER_SHADOW: &str = "0 10px 25px rgba(0, 242, 254, 0.4)";

pub fn description(name: &str) -> &'static str {
    match name.trim() {
        "Streak Master" => "Maintain a 7-day learning streak without missing a day.",
        "Math Wizard" => "Complete 20 math lessons with 90% accuracy.",
        "Science Explorer" => "Discover 15 fascinating science facts through lessons.",
        "Reading Champion" => "Read and comprehend 10 literature passages.",
        "History Buff" => "Master 25 historical events and their significance.",
        "Art Master" => "Create and analyze 12 different art pieces.",
        _ => DEFAULT_DESCRIPTION,
    }
}

pub fn requirements(name: &str) -> &'static [&'static str] {
    match name.trim() {
        "Streak Master" => &["Learn for 7 consecutive days", "Complete at least 1 lesson per day"],
        "Math Wizard" => &[
            "Complete 20 math lessons",
            "Achieve 90% average accuracy",
            "Master basic algebra concepts",
        ],
        "Science Explorer" => &[
            "Complete 15 science lessons",
            "Pass all science quizzes",
            "Conduct 3 virtual experiments",
        ],
        "Reading Champion" => &[
            "Read 10 literature passages",
            "Score 85% on comprehension tests",
            "Write 3 book reports",
        ],
        _ => DEFAULT_REQUIREMENTS,
    }
}

/// Everything the badge modal shows.
#[derive(Clone, Debug, PartialEq)]
pub struct BadgeDetails {
    pub name: String,
    pub icon: String,
    pub description: &'static str,
    pub requirements: &'static [&'static str],
    pub earned: &'static str,
    pub xp_reward: u32,
}

impl BadgeDetails {
    pub fn new(name: &str, icon: &str, rng: &mut PhaseRng) -> Self {
        Self {
            name: name.trim().to_string(),
            icon: icon.trim().to_string(),
            description: description(name),
            requirements: requirements(name),
            earned: EARNED_DATES.choose(rng).copied().unwrap_or(EARNED_DATES[0]),
            xp_reward: XP_REWARD,
        }
    }

    pub fn reward_text(&self) -> String {
        format!("+{} XP", self.xp_reward)
    }
}

pub fn tooltip_track() -> Track {
    Track::tween(Some(Pose::new().opacity(0.0).y(10.0)), Pose::new().opacity(1.0).y(0.0), Tween::new(0.2, Ease::Linear))
}

pub fn earned_hover() -> Pose {
    Pose::new().scale(1.1).rotation(5.0)
}

pub fn earned_rest() -> Pose {
    Pose::new().scale(1.0).rotation(0.0)
}

pub const MODAL_FADE: f64 = 0.3;

pub fn modal_open_track() -> Track {
    Track::tween(Some(Pose::new().opacity(0.0)), Pose::new().opacity(1.0), Tween::new(MODAL_FADE, Ease::Linear))
}

pub fn modal_content_track() -> Track {
    Track::tween(
        Some(Pose::new().scale(0.8).y(50.0)),
        Pose::new().scale(1.0).y(0.0),
        Tween::new(0.4, Ease::BACK),
    )
}

pub fn modal_close_track() -> Track {
    Track::tween(None, Pose::new().opacity(0.0), Tween::new(MODAL_FADE, Ease::Linear))
}
