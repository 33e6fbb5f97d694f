use rand::Rng;

use super::ScrollRange;
use crate::motion::{Ease, Pose, Track, Tween};
use crate::rng::PhaseRng;
use crate::stage::{Animator, Stage};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TriggerId(pub usize);

/// One-shot trigger state. There is no way back from `Fired`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Armed,
    Fired,
}

/// Entrance animation: hidden pose applied at registration, visible pose on enter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reveal {
    pub from: Pose,
    pub to: Pose,
    pub tween: Tween,
    pub stagger: f64,
}

impl Reveal {
    pub fn new(from: Pose, to: Pose, tween: Tween) -> Self {
        Self { from, to, tween, stagger: 0.0 }
    }

    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    /// Track for the `index`-th element of the target set.
    pub fn track_for(&self, index: usize) -> Track {
        let tween = Tween::new(self.tween.duration, self.tween.ease)
            .delay(self.tween.delay + index as f64 * self.stagger);
        Track::tween(Some(self.from), self.to, tween)
    }
}

/// Continuous mapping from scroll progress to a visual value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scrub {
    Pose { from: Pose, to: Pose },
    Background { rgb: [u8; 3], from: f64, to: f64 },
}

impl Scrub {
    pub fn pose_at(&self, progress: f64) -> Option<Pose> {
        match self {
            Scrub::Pose { from, to } => Some(Pose::lerp(from, to, progress)),
            Scrub::Background { .. } => None,
        }
    }

    pub fn alpha_at(&self, progress: f64) -> Option<f64> {
        match *self {
            Scrub::Background { from, to, .. } => Some(if progress <= 0.0 {
                from
            } else if progress >= 1.0 {
                to
            } else {
                from * (1.0 - progress) + to * progress
            }),
            Scrub::Pose { .. } => None,
        }
    }

    pub fn background_at(&self, progress: f64) -> Option<String> {
        match *self {
            Scrub::Background { rgb: [r, g, b], .. } => {
                self.alpha_at(progress).map(|a| format!("rgba({r}, {g}, {b}, {a})"))
            }
            Scrub::Pose { .. } => None,
        }
    }
}

/// One-shot entrance the caller turns into a bespoke effect.
#[derive(Clone, Debug, PartialEq)]
pub enum Cue {
    Typewriter { text: String, speed_ms: u32 },
    Counter { target: u64 },
}

/// A cue whose trigger fired during [`Orchestrator::update`].
#[derive(Clone, Debug, PartialEq)]
pub struct Fired<N> {
    pub id: TriggerId,
    pub node: N,
    pub cue: Cue,
}

enum Effect<N> {
    Reveal { targets: Vec<N>, reveal: Reveal, phase: Phase },
    Cue { cue: Cue, phase: Phase },
    Scrub { targets: Vec<N>, scrub: Scrub, lag: Option<f64>, last: Option<f64> },
}

struct Trigger<N> {
    label: &'static str,
    node: N,
    range: ScrollRange,
    effect: Effect<N>,
}

impl<N> Trigger<N> {
    fn is_spent(&self) -> bool {
        matches!(
            self.effect,
            Effect::Reveal { phase: Phase::Fired, .. } | Effect::Cue { phase: Phase::Fired, .. }
        )
    }
}

/// Registry of scroll triggers, evaluated in registration order.
pub struct Orchestrator<N> {
    triggers: Vec<Trigger<N>>,
    skipped: Vec<&'static str>,
    ambient: usize,
}

impl<N: Clone + PartialEq> Default for Orchestrator<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone + PartialEq> Orchestrator<N> {
    pub fn new() -> Self {
        Self { triggers: Vec::new(), skipped: Vec::new(), ambient: 0 }
    }

    fn push(&mut self, label: &'static str, node: N, range: ScrollRange, effect: Effect<N>) -> TriggerId {
        let id = TriggerId(self.triggers.len());
        self.triggers.push(Trigger { label, node, range, effect });
        id
    }

    fn skip(&mut self, label: &'static str) -> Option<TriggerId> {
        log::debug!("trigger `{label}` has no element on this page, skipping");
        self.skipped.push(label);
        None
    }

    /// One-shot entrance. The target set shows `reveal.from` until the range is entered.
    pub fn reveal(
        &mut self,
        label: &'static str,
        trigger: Option<N>,
        targets: Vec<N>,
        range: ScrollRange,
        reveal: Reveal,
        animator: &mut dyn Animator<N>,
    ) -> Option<TriggerId> {
        let Some(node) = trigger else { return self.skip(label) };
        if targets.is_empty() {
            return self.skip(label);
        }
        for target in &targets {
            animator.set(target, &reveal.from);
        }
        Some(self.push(label, node, range, Effect::Reveal { targets, reveal, phase: Phase::Armed }))
    }

    /// One-shot entrance reported back through [`Orchestrator::update`].
    pub fn cue(&mut self, label: &'static str, trigger: Option<N>, range: ScrollRange, cue: Cue) -> Option<TriggerId> {
        let Some(node) = trigger else { return self.skip(label) };
        Some(self.push(label, node, range, Effect::Cue { cue, phase: Phase::Armed }))
    }

    /// Continuous progress mapping. With `lag`, each write eases in over that many seconds.
    /// Nothing is written until progress first moves away from 0, so page-load
    /// tweens on the same targets are left alone.
    pub fn scrub(
        &mut self,
        label: &'static str,
        trigger: Option<N>,
        targets: Vec<N>,
        range: ScrollRange,
        scrub: Scrub,
        lag: Option<f64>,
    ) -> Option<TriggerId> {
        let Some(node) = trigger else { return self.skip(label) };
        if targets.is_empty() {
            return self.skip(label);
        }
        Some(self.push(label, node, range, Effect::Scrub { targets, scrub, lag, last: Some(0.0) }))
    }

    /// Looping motion independent of scroll; every element starts after its own
    /// random delay in `[0, max_phase)`. Returns the number of loops started.
    #[allow(clippy::too_many_arguments)]
    pub fn ambient(
        &mut self,
        label: &'static str,
        targets: &[N],
        to: Pose,
        tween: Tween,
        max_phase: f64,
        rng: &mut PhaseRng,
        animator: &mut dyn Animator<N>,
    ) -> usize {
        if targets.is_empty() {
            self.skip(label);
            return 0;
        }
        for node in targets {
            let phase = if max_phase > 0.0 { rng.random_range(0.0..max_phase) } else { 0.0 };
            let track = Track::tween(None, to, Tween::new(tween.duration, tween.ease))
                .delayed(tween.delay + phase)
                .forever()
                .yoyo();
            animator.play(node, track);
        }
        self.ambient += targets.len();
        targets.len()
    }

    /// Evaluate every trigger against the current scroll position.
    pub fn update<S>(&mut self, stage: &S, animator: &mut dyn Animator<N>) -> Vec<Fired<N>>
    where
        S: Stage<Node = N> + ?Sized,
    {
        let viewport = stage.viewport();
        let mut fired = Vec::new();
        for (idx, trigger) in self.triggers.iter_mut().enumerate() {
            if trigger.is_spent() {
                continue;
            }
            let Some(bounds) = stage.bounds(&trigger.node) else { continue };
            match &mut trigger.effect {
                Effect::Reveal { targets, reveal, phase } => {
                    if *phase == Phase::Armed && trigger.range.entered(&bounds, &viewport) {
                        *phase = Phase::Fired;
                        log::trace!("reveal `{}` fired", trigger.label);
                        for (i, node) in targets.iter().enumerate() {
                            animator.play(node, reveal.track_for(i));
                        }
                    }
                }
                Effect::Cue { cue, phase } => {
                    if *phase == Phase::Armed && trigger.range.entered(&bounds, &viewport) {
                        *phase = Phase::Fired;
                        fired.push(Fired { id: TriggerId(idx), node: trigger.node.clone(), cue: cue.clone() });
                    }
                }
                Effect::Scrub { targets, scrub, lag, last } => {
                    let progress = trigger.range.progress(&bounds, &viewport);
                    if *last == Some(progress) {
                        continue;
                    }
                    *last = Some(progress);
                    for node in targets.iter() {
                        if let Some(pose) = scrub.pose_at(progress) {
                            match lag {
                                Some(secs) => animator.play(node, Track::tween(None, pose, Tween::new(*secs, Ease::Power2Out))),
                                None => animator.set(node, &pose),
                            }
                        }
                        if let Some(bg) = scrub.background_at(progress) {
                            animator.style(node, "background", &bg);
                        }
                    }
                }
            }
        }
        fired
    }

    pub fn phase(&self, id: TriggerId) -> Option<Phase> {
        match &self.triggers.get(id.0)?.effect {
            Effect::Reveal { phase, .. } | Effect::Cue { phase, .. } => Some(*phase),
            Effect::Scrub { .. } => None,
        }
    }

    /// Registered trigger labels in registration order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.triggers.iter().map(|t| t.label)
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Labels of registrations dropped because their elements were missing.
    pub fn skipped(&self) -> &[&'static str] {
        &self.skipped
    }

    pub fn ambient_loops(&self) -> usize {
        self.ambient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{Call, FakeStage, RecordingAnimator};
    use crate::stage::Rect;

    fn stage() -> FakeStage {
        FakeStage::new(1000.0)
            .node(1, ".section-header", Rect::new(2000.0, 0.0, 800.0, 200.0))
            .node(2, ".hero", Rect::new(0.0, 0.0, 1200.0, 900.0))
            .node(3, ".navbar", Rect::new(0.0, 0.0, 1200.0, 80.0))
    }

    fn fade_up() -> Reveal {
        Reveal::new(Pose::new().opacity(0.0).y(50.0), Pose::new().opacity(1.0).y(0.0), Tween::new(1.0, Ease::Power2Out))
    }

    #[test]
    fn reveal_applies_hidden_pose_then_fires_once() {
        let mut stage = stage();
        let mut anim = RecordingAnimator::default();
        let mut orch = Orchestrator::new();
        let range = ScrollRange::new("top 85%", "bottom 15%").unwrap();
        let id = orch.reveal("header", stage.select(".section-header"), vec![1], range, fade_up(), &mut anim).unwrap();
        assert_eq!(anim.calls, vec![Call::Set(1, Pose::new().opacity(0.0).y(50.0))]);

        orch.update(&stage, &mut anim);
        assert_eq!(orch.phase(id), Some(Phase::Armed));
        assert_eq!(anim.plays_for(1).len(), 0);

        for y in [1150.0, 0.0, 1500.0, 0.0, 3000.0] {
            stage.scroll_to(y);
            orch.update(&stage, &mut anim);
        }
        assert_eq!(orch.phase(id), Some(Phase::Fired));
        assert_eq!(anim.plays_for(1).len(), 1);
    }

    #[test]
    fn fired_one_shots_are_not_measured_again() {
        let mut stage = stage();
        let mut anim = RecordingAnimator::default();
        let mut orch = Orchestrator::new();
        let range = ScrollRange::new("top 85%", "bottom 15%").unwrap();
        orch.reveal("header", stage.select(".section-header"), vec![1], range, fade_up(), &mut anim);
        orch.cue("counter", stage.select(".hero"), range, Cue::Counter { target: 10 });

        stage.scroll_to(1500.0);
        orch.update(&stage, &mut anim);
        let after_firing = stage.measurements();
        assert_eq!(after_firing, 2);
        for y in [1600.0, 1700.0, 0.0] {
            stage.scroll_to(y);
            orch.update(&stage, &mut anim);
        }
        assert_eq!(stage.measurements(), after_firing);
    }

    #[test]
    fn scrub_writes_only_on_change_and_holds_boundaries() {
        let mut stage = stage();
        let mut anim = RecordingAnimator::default();
        let mut orch = Orchestrator::new();
        let range = ScrollRange::new("top top", "bottom top").unwrap();
        let scrub = Scrub::Background { rgb: [10, 10, 15], from: 0.9, to: 1.0 };
        orch.scrub("navbar", stage.select(".hero"), vec![3], range, scrub, None);

        orch.update(&stage, &mut anim);
        orch.update(&stage, &mut anim);
        assert!(anim.calls.is_empty());
        stage.scroll_to(2000.0);
        orch.update(&stage, &mut anim);
        stage.scroll_to(4000.0);
        orch.update(&stage, &mut anim);
        stage.scroll_to(0.0);
        orch.update(&stage, &mut anim);

        let styles: Vec<&str> = anim.styles_for(3).into_iter().map(|(_, v)| v).collect();
        assert_eq!(styles, vec!["rgba(10, 10, 15, 1)", "rgba(10, 10, 15, 0.9)"]);
    }

    #[test]
    fn lagged_scrub_plays_catch_up_tween() {
        let mut stage = stage();
        let mut anim = RecordingAnimator::default();
        let mut orch = Orchestrator::new();
        let range = ScrollRange::new("top top", "bottom top").unwrap();
        let scrub = Scrub::Pose { from: Pose::new().y(0.0), to: Pose::new().y(-100.0) };
        orch.scrub("orb", stage.select(".hero"), vec![9], range, scrub, Some(1.0));
        stage.scroll_to(450.0);
        orch.update(&stage, &mut anim);
        let plays = anim.plays_for(9);
        assert_eq!(plays.len(), 1);
        assert_eq!(plays[0].segments[0].to, Pose::new().y(-50.0));
        assert_eq!(plays[0].segments[0].duration, 1.0);
    }

    #[test]
    fn cues_are_reported_once() {
        let mut stage = stage();
        let mut anim = RecordingAnimator::default();
        let mut orch = Orchestrator::new();
        let range = ScrollRange::starting("top 80%").unwrap();
        orch.cue("counter", stage.select(".section-header"), range, Cue::Counter { target: 87 });
        assert!(orch.update(&stage, &mut anim).is_empty());
        stage.scroll_to(1300.0);
        let fired = orch.update(&stage, &mut anim);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].cue, Cue::Counter { target: 87 });
        stage.scroll_to(0.0);
        orch.update(&stage, &mut anim);
        stage.scroll_to(1300.0);
        assert!(orch.update(&stage, &mut anim).is_empty());
    }

    #[test]
    fn missing_elements_are_skipped() {
        let stage = stage();
        let mut anim = RecordingAnimator::default();
        let mut orch: Orchestrator<u32> = Orchestrator::new();
        let range = ScrollRange::starting("top 80%").unwrap();
        assert!(orch.reveal("ghost", stage.select(".nope"), vec![1], range, fade_up(), &mut anim).is_none());
        assert!(orch.reveal("empty", stage.select(".hero"), vec![], range, fade_up(), &mut anim).is_none());
        assert!(orch.cue("ghost-cue", None, range, Cue::Counter { target: 1 }).is_none());
        assert_eq!(orch.skipped(), &["ghost", "empty", "ghost-cue"]);
        assert!(orch.is_empty());
        assert!(anim.calls.is_empty());
    }

    #[test]
    fn ambient_phases_differ() {
        let mut anim = RecordingAnimator::default();
        let mut orch: Orchestrator<u32> = Orchestrator::new();
        let mut rng = PhaseRng::seeded(3);
        let n = orch.ambient(
            "float",
            &[1, 2, 3, 4],
            Pose::new().y(-5.0),
            Tween::new(2.0, Ease::SineInOut),
            2.0,
            &mut rng,
            &mut anim,
        );
        assert_eq!(n, 4);
        let delays: Vec<f64> = (1..=4).map(|id| anim.plays_for(id)[0].delay).collect();
        assert!(delays.iter().all(|d| (0.0..2.0).contains(d)));
        assert!(delays.windows(2).any(|w| w[0] != w[1]));
        assert_eq!(orch.ambient_loops(), 4);
    }

    #[test]
    fn zero_phase_window_starts_loops_together() {
        let mut orch = Orchestrator::new();
        let mut anim = RecordingAnimator::default();
        let mut rng = PhaseRng::seeded(3);
        orch.ambient("float", &[1, 2], Pose::new().y(-5.0), Tween::new(2.0, Ease::SineInOut), 0.0, &mut rng, &mut anim);
        assert_eq!(anim.plays_for(1)[0].delay, 0.0);
        assert_eq!(anim.plays_for(2)[0].delay, 0.0);
    }
}
