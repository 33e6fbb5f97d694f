//! Registers every page animation against a [`Stage`].
//!
//! `install` is the whole page in one place: the load timeline, the XP bar
//! and flame loops, every scroll trigger and the floating loops. The browser
//! layer only adds event listeners and timers on top.

use rand::Rng;

use crate::config::PageConfig;
use crate::counter::parse_target;
use crate::error::PageError;
use crate::intro;
use crate::motion::{Ease, Pose, Track, Tween};
use crate::nav::NAVBAR_RGB;
use crate::rng::PhaseRng;
use crate::scroll::{Cue, Orchestrator, Reveal, Scrub, ScrollRange};
use crate::stage::{percent_attribute, Animator, Stage};
use crate::typewriter::parse_speed;

pub const CARD_GRIDS: [&str; 3] = [".dashboard-grid", ".subjects-grid", ".features-grid"];
pub const FLOATING: [&str; 2] = [".badge-item.earned", ".subject-icon"];

pub const XP_FILL_SECS: f64 = 2.0;
pub const XP_GLOW_EVERY_MS: u32 = 3000;
pub const XP_GLOW_MS: u32 = 300;
pub const XP_SHIMMER_EVERY_MS: u32 = 4000;
pub const XP_SHIMMER_MS: u32 = 500;
pub const XP_SHIMMER: [&str; 2] = [
    "linear-gradient(90deg, #4facfe 0%, #00f2fe 50%, #4facfe 100%)",
    "linear-gradient(135deg, #4facfe 0%, #00f2fe 100%)",
];
pub const FLAME_HUE_EVERY_MS: u32 = 2000;

/// `filter` value for the next flame tint, in [-30°, 30°).
pub fn flame_hue(rng: &mut PhaseRng) -> String {
    format!("hue-rotate({}deg)", rng.random_range(-30.0_f64..30.0))
}

/// Fill and spark tracks for an XP bar showing `progress` percent. The spark
/// follows the linear tween progress, not the eased width.
pub fn xp_tracks(progress: f64) -> (Track, Track) {
    let fill = Track::tween(
        Some(Pose::new().width_pct(0.0)),
        Pose::new().width_pct(progress),
        Tween::new(XP_FILL_SECS, Ease::Power2Out),
    );
    let spark = Track::tween(
        Some(Pose::new().left_pct(0.0)),
        Pose::new().left_pct(progress),
        Tween::new(XP_FILL_SECS, Ease::Linear),
    );
    (fill, spark)
}

pub fn flame_morph() -> Track {
    Track::tween(None, Pose::new().scale(1.2).rotation(5.0), Tween::new(1.0, Ease::SineInOut))
        .then(Pose::new().scale(1.0).rotation(-5.0), 1.0, Ease::SineInOut)
        .then(Pose::new().scale(1.1).rotation(0.0), 1.0, Ease::SineInOut)
        .forever()
}

fn hero_range(end: &str) -> Result<ScrollRange, PageError> {
    Ok(ScrollRange::new("top top", end)?)
}

/// Play the load sequence and register every trigger. Missing elements only
/// skip their own registration.
pub fn install<S>(
    stage: &S,
    animator: &mut dyn Animator<S::Node>,
    config: &PageConfig,
    rng: &mut PhaseRng,
) -> Result<Orchestrator<S::Node>, PageError>
where
    S: Stage + ?Sized,
{
    let steps = intro::timeline(stage).play(animator);
    log::debug!("page-load timeline placed {steps} steps");

    if let Some(fill) = stage.select(".xp-fill") {
        let progress = percent_attribute(stage.attribute(&fill, "data-progress").as_deref());
        let (fill_track, spark_track) = xp_tracks(progress);
        animator.play(&fill, fill_track);
        if let Some(spark) = stage.select(".xp-spark") {
            animator.play(&spark, spark_track);
        }
    }
    if let Some(flame) = stage.select(".streak-flame") {
        animator.play(&flame, flame_morph());
    }

    let mut orch = Orchestrator::new();

    let header_range = ScrollRange::new("top 85%", "bottom 15%")?;
    let header = Reveal::new(
        Pose::new().opacity(0.0).y(50.0),
        Pose::new().opacity(1.0).y(0.0),
        Tween::new(1.0, Ease::Power2Out),
    );
    for node in stage.select_all(".section-header") {
        orch.reveal("section-header", Some(node.clone()), vec![node], header_range, header, animator);
    }

    let grid_range = ScrollRange::new("top 80%", "bottom 20%")?;
    let cards = Reveal::new(
        Pose::new().opacity(0.0).y(60.0).scale(0.9),
        Pose::new().opacity(1.0).y(0.0).scale(1.0),
        Tween::new(0.8, Ease::BACK),
    )
    .stagger(0.15);
    for grid_selector in CARD_GRIDS {
        for grid in stage.select_all(grid_selector) {
            let children = stage.children(&grid);
            orch.reveal("card-grid", Some(grid), children, grid_range, cards, animator);
        }
    }

    let bar_range = ScrollRange::starting("top 85%")?;
    for bar in stage.select_all(".progress-bar") {
        let Some(fill) = stage.select_within(&bar, ".progress-fill") else {
            log::debug!("progress bar without a fill, skipping");
            continue;
        };
        let progress = percent_attribute(stage.attribute(&fill, "data-progress").as_deref());
        let reveal = Reveal::new(
            Pose::new().width_pct(0.0),
            Pose::new().width_pct(progress),
            Tween::new(1.5, Ease::Power2Out),
        );
        orch.reveal("progress-bar", Some(bar), vec![fill], bar_range, reveal, animator);
    }

    let floating: Vec<S::Node> = FLOATING.iter().flat_map(|s| stage.select_all(s)).collect();
    orch.ambient(
        "float",
        &floating,
        Pose::new().y(-5.0),
        Tween::new(2.0, Ease::SineInOut),
        config.float_max_phase,
        rng,
        animator,
    );

    let hero = stage.select(".hero");
    let parallax = hero_range("bottom top")?;
    for (i, orb) in stage.select_all(".gradient-orb").into_iter().enumerate() {
        let scrub = Scrub::Pose { from: Pose::new().y(0.0), to: Pose::new().y(-50.0 * (i as f64 + 1.0)) };
        orch.scrub("orb-parallax", hero.clone(), vec![orb], parallax, scrub, Some(1.0));
    }
    orch.scrub(
        "navbar-tint",
        hero.clone(),
        stage.select_all(".navbar"),
        parallax,
        Scrub::Background { rgb: NAVBAR_RGB, from: 0.9, to: 1.0 },
        None,
    );
    orch.scrub(
        "scroll-indicator",
        hero,
        stage.select_all(".scroll-indicator"),
        hero_range("50% top")?,
        Scrub::Pose { from: Pose::new().opacity(1.0), to: Pose::new().opacity(0.0) },
        None,
    );
    orch.scrub(
        "logo-spin",
        stage.select("body"),
        stage.select_all(".logo-icon i"),
        parallax,
        Scrub::Pose { from: Pose::new().rotation(0.0), to: Pose::new().rotation(360.0) },
        None,
    );

    let typing_range = ScrollRange::starting("top 80%")?;
    for node in stage.select_all("[data-typewriter]") {
        let text = stage.text(&node).unwrap_or_default();
        let speed_ms = parse_speed(stage.attribute(&node, "data-typewriter-speed").as_deref());
        animator.text(&node, "");
        orch.cue("typewriter", Some(node), typing_range, Cue::Typewriter { text, speed_ms });
    }

    let counter_range = ScrollRange::starting("70% bottom")?;
    for node in stage.select_all(".stat-number[data-target]") {
        let target = parse_target(stage.attribute(&node, "data-target").as_deref());
        orch.cue("counter", Some(node), counter_range, Cue::Counter { target });
    }

    log::info!(
        "page installed: {} triggers, {} floating loops, {} skipped",
        orch.len(),
        orch.ambient_loops(),
        orch.skipped().len()
    );
    Ok(orch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spark_tracks_linear_progress() {
        let (fill, spark) = xp_tracks(75.0);
        assert_eq!(fill.segments[0].to, Pose::new().width_pct(75.0));
        assert_eq!(spark.segments[0].ease, Ease::Linear);
        let froms = spark.capture(&Pose::new());
        let half = spark.sample(&froms, 1.0).unwrap();
        assert!((half.pose.left_pct.unwrap() - 37.5).abs() < 1e-9);
    }

    #[test]
    fn flame_loops_three_second_cycle() {
        let t = flame_morph();
        assert!((t.length() - 3.0).abs() < 1e-9);
        assert_eq!(t.repeat, crate::motion::Repeat::Forever);
    }

    #[test]
    fn hue_stays_within_thirty_degrees() {
        let mut rng = PhaseRng::seeded(1);
        for _ in 0..50 {
            let v = flame_hue(&mut rng);
            let deg: f64 = v.trim_start_matches("hue-rotate(").trim_end_matches("deg)").parse().unwrap();
            assert!((-30.0..30.0).contains(&deg));
        }
    }
}
