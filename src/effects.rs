//! Transient visual nodes: ripples, confetti, background particles and the
//! celebration burst. Everything here only plans; `web::fx` creates the nodes
//! and schedules their removal.

use std::f64::consts::TAU;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::motion::{Ease, Pose, Track, Tween};
use crate::rng::PhaseRng;
use crate::stage::{Point, Rect};

pub const RIPPLE_MS: u32 = 600;
pub const CONFETTI_PIECES: usize = 50;
pub const CONFETTI_SPAWN_MS: u32 = 50;
pub const CONFETTI_LIFE_MS: u32 = 5000;
pub const CONFETTI_COLORS: [&str; 5] = ["#00f2fe", "#667eea", "#f093fb", "#00ff88", "#ff6b35"];
pub const BACKGROUND_PARTICLES: usize = 30;
pub const PARTICLE_LIFE_MS: u32 = 20_000;
pub const BURST_PARTICLES: usize = 12;
pub const BURST_DISTANCE: f64 = 100.0;
pub const BURST_MS: u32 = 1000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

impl Ripple {
    /// Square ripple covering the element, centred on the pointer. `rect` and
    /// `pointer` share a coordinate space.
    pub fn at(rect: &Rect, pointer: Point) -> Self {
        let size = rect.width.max(rect.height);
        Self { size, left: pointer.x - rect.left - size / 2.0, top: pointer.y - rect.top - size / 2.0 }
    }

    pub fn css(&self) -> String {
        format!(
            "position: absolute; border-radius: 50%; transform: scale(0); animation: ripple 0.6s linear; \
             background-color: rgba(255, 255, 255, 0.3); width: {size}px; height: {size}px; \
             left: {left}px; top: {top}px; pointer-events: none;",
            size = self.size,
            left = self.left,
            top = self.top,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfettiPiece {
    /// Delay before the piece is appended.
    pub spawn_ms: u32,
    pub left_pct: f64,
    pub color: &'static str,
    pub delay_s: f64,
    pub duration_s: f64,
}

pub fn confetti(count: usize, rng: &mut PhaseRng) -> Vec<ConfettiPiece> {
    (0..count)
        .map(|i| ConfettiPiece {
            spawn_ms: i as u32 * CONFETTI_SPAWN_MS,
            left_pct: rng.random_range(0.0..100.0),
            color: CONFETTI_COLORS.choose(rng).copied().unwrap_or(CONFETTI_COLORS[0]),
            delay_s: rng.random_range(0.0..2.0),
            duration_s: rng.random_range(3.0..5.0),
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub width: f64,
    pub height: f64,
    pub alpha: f64,
    pub left_pct: f64,
    pub top_pct: f64,
    pub float_s: f64,
}

impl Particle {
    pub fn random(rng: &mut PhaseRng) -> Self {
        Self {
            width: rng.random_range(2.0..6.0),
            height: rng.random_range(2.0..6.0),
            alpha: rng.random_range(0.2..1.0),
            left_pct: rng.random_range(0.0..100.0),
            top_pct: rng.random_range(0.0..100.0),
            float_s: rng.random_range(10.0..20.0),
        }
    }

    pub fn css(&self) -> String {
        format!(
            "position: absolute; width: {}px; height: {}px; background: rgba(0, 242, 254, {}); \
             border-radius: 50%; left: {}%; top: {}%; animation: float-particle {}s linear infinite;",
            self.width, self.height, self.alpha, self.left_pct, self.top_pct, self.float_s
        )
    }
}

pub fn particles(count: usize, rng: &mut PhaseRng) -> Vec<Particle> {
    (0..count).map(|_| Particle::random(rng)).collect()
}

/// Ring of particles flying out from `center` and shrinking away.
pub fn burst(center: Point) -> Vec<(String, Track)> {
    (0..BURST_PARTICLES)
        .map(|i| {
            let angle = i as f64 / BURST_PARTICLES as f64 * TAU;
            let to = Pose::new()
                .x(angle.cos() * BURST_DISTANCE)
                .y(angle.sin() * BURST_DISTANCE)
                .scale(0.0);
            let css = format!(
                "position: fixed; width: 6px; height: 6px; background: #00f2fe; border-radius: 50%; \
                 left: {}px; top: {}px; pointer-events: none; z-index: 10000;",
                center.x, center.y
            );
            (css, Track::tween(None, to, Tween::new(BURST_MS as f64 / 1000.0, Ease::Power2Out)))
        })
        .collect()
}

/// Pop-in for a newly unlocked badge.
pub fn badge_unlock() -> (Pose, Track) {
    let hidden = Pose::new().scale(0.0).rotation(180.0).opacity(0.0);
    let track = Track::tween(
        Some(hidden),
        Pose::new().scale(1.2).rotation(0.0).opacity(1.0),
        Tween::new(0.5, Ease::BACK),
    )
    .then(Pose::new().scale(1.0), 0.3, Ease::Power2Out);
    (hidden, track)
}

/// Box-shadow writes after the unlock starts, in ms.
pub const UNLOCK_GLOW: [(u32, &str); 2] = [
    (500, "0 0 25px rgba(0, 242, 254, 0.8)"),
    (1000, "0 0 10px rgba(0, 242, 254, 0.4)"),
];
