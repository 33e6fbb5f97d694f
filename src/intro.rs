//! Page-load entrance sequence.

use crate::motion::timeline::rise;
use crate::motion::{Ease, Pose, Step, Timeline, Tween};
use crate::stage::Stage;

/// Build the hero entrance timeline from whatever the page contains.
pub fn timeline<S: Stage + ?Sized>(stage: &S) -> Timeline<S::Node> {
    let navbar: Vec<S::Node> = stage.select(".navbar").into_iter().collect();
    Timeline::new()
        .push(
            Step::new("navbar", navbar, Pose::new().y(0.0).opacity(1.0), Tween::new(0.8, Ease::Power2Out))
                .from(Pose::new().y(-100.0).opacity(0.0)),
        )
        .push(
            Step::new(
                "orbs",
                stage.select_all(".gradient-orb"),
                Pose::new().scale(1.0).opacity(0.7),
                Tween::new(1.5, Ease::Power2Out),
            )
            .from(Pose::new().scale(0.0).opacity(0.0))
            .stagger(0.3)
            .after(-0.5),
        )
        .push(
            Step::new(
                "title-lines",
                stage.select_all(".hero-title .title-line"),
                Pose::new().opacity(1.0).y(0.0).rotation_x(0.0),
                Tween::new(1.0, Ease::BACK),
            )
            .from(Pose::new().opacity(0.0).y(50.0).rotation_x(90.0))
            .stagger(0.2)
            .after(-1.0),
        )
        .push(rise("subtitle", stage.select_all(".hero-subtitle"), 30.0, 0.8).after(-0.5))
        .push(
            Step::new(
                "cta",
                stage.select_all(".hero-cta button"),
                Pose::new().opacity(1.0).scale(1.0).y(0.0),
                Tween::new(0.6, Ease::BACK),
            )
            .from(Pose::new().opacity(0.0).scale(0.8).y(20.0))
            .stagger(0.1)
            .after(-0.3),
        )
        .push(rise("stats", stage.select_all(".hero-stats .stat-item"), 20.0, 0.6).stagger(0.1).after(-0.2))
        .push(
            Step::new(
                "scroll-indicator",
                stage.select_all(".scroll-indicator"),
                Pose::new().opacity(1.0),
                Tween::new(0.5, Ease::Power2Out),
            )
            .from(Pose::new().opacity(0.0))
            .at(1.5),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeStage, RecordingAnimator};
    use crate::stage::Rect;

    fn hero() -> FakeStage {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        FakeStage::new(900.0)
            .node(1, ".navbar", r)
            .node(2, ".gradient-orb", r)
            .node(3, ".gradient-orb", r)
            .node(4, ".hero-title .title-line", r)
            .node(5, ".hero-title .title-line", r)
            .node(6, ".hero-subtitle", r)
            .node(7, ".hero-cta button", r)
            .node(8, ".hero-stats .stat-item", r)
            .node(9, ".scroll-indicator", r)
    }

    #[test]
    fn full_hero_places_every_step() {
        let stage = hero();
        let tl = timeline(&stage);
        let placed = tl.place();
        let labels: Vec<&str> = placed.iter().map(|p| p.step.label).collect();
        assert_eq!(
            labels,
            ["navbar", "orbs", "title-lines", "subtitle", "cta", "stats", "scroll-indicator"]
        );
        let starts: Vec<f64> = placed.iter().map(|p| p.start).collect();
        // navbar 0..0.8, orbs 0.3..2.1, title 1.1..2.3, subtitle 1.8..2.6
        assert!((starts[1] - 0.3).abs() < 1e-9);
        assert!((starts[2] - 1.1).abs() < 1e-9);
        assert!((starts[3] - 1.8).abs() < 1e-9);
        assert!((starts[4] - 2.3).abs() < 1e-9);
        assert_eq!(starts[6], 1.5);
    }

    #[test]
    fn missing_navbar_skips_only_that_step() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        let stage = FakeStage::new(900.0).node(6, ".hero-subtitle", r);
        let tl = timeline(&stage);
        let placed = tl.place();
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].start, 0.0);

        let mut anim = RecordingAnimator::default();
        assert_eq!(tl.play(&mut anim), 1);
        assert_eq!(anim.sets_for(6), vec![&Pose::new().opacity(0.0).y(30.0)]);
    }

    #[test]
    fn cta_buttons_are_staggered() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let stage = hero().node(10, ".hero-cta button", r);
        let mut anim = RecordingAnimator::default();
        timeline(&stage).play(&mut anim);
        let first = anim.plays_for(7)[0].delay;
        let second = anim.plays_for(10)[0].delay;
        assert!((second - first - 0.1).abs() < 1e-9);
    }
}
