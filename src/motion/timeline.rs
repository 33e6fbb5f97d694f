//! Ordered composition of tween steps (the page-load sequence and friends).

use super::{Ease, Pose, Track, Tween};
use crate::stage::Animator;

/// Where a step starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// Absolute time from the start of the timeline.
    At(f64),
    /// Offset from the end of the previously placed step; negative overlaps it.
    AfterPrevious(f64),
}

/// One step: a target set animated from/to a pose, optionally staggered.
#[derive(Clone, Debug)]
pub struct Step<N> {
    pub label: &'static str,
    pub targets: Vec<N>,
    pub from: Option<Pose>,
    pub to: Pose,
    pub tween: Tween,
    pub stagger: f64,
    pub position: Position,
}

impl<N> Step<N> {
    pub fn new(label: &'static str, targets: Vec<N>, to: Pose, tween: Tween) -> Self {
        Self {
            label,
            targets,
            from: None,
            to,
            tween,
            stagger: 0.0,
            position: Position::AfterPrevious(0.0),
        }
    }

    pub fn from(mut self, from: Pose) -> Self {
        self.from = Some(from);
        self
    }

    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn at(mut self, time: f64) -> Self {
        self.position = Position::At(time);
        self
    }

    pub fn after(mut self, offset: f64) -> Self {
        self.position = Position::AfterPrevious(offset);
        self
    }

    /// Time from the first element's start to the last element's end.
    pub fn span(&self) -> f64 {
        let n = self.targets.len().max(1) as f64;
        self.tween.duration + self.stagger * (n - 1.0)
    }

    /// Start offset of the `index`-th target relative to the step start.
    pub fn offset_of(&self, index: usize) -> f64 {
        index as f64 * self.stagger
    }
}

/// A step with its resolved start time.
#[derive(Clone, Debug)]
pub struct Placed<'a, N> {
    pub step: &'a Step<N>,
    pub start: f64,
}

impl<N> Placed<'_, N> {
    pub fn end(&self) -> f64 {
        self.start + self.step.span()
    }
}

/// Immutable once built; steps whose target set is empty are skipped when placed.
#[derive(Clone, Debug)]
pub struct Timeline<N> {
    steps: Vec<Step<N>>,
}

impl<N: Clone> Default for Timeline<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone> Timeline<N> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn push(mut self, step: Step<N>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(&self) -> &[Step<N>] {
        &self.steps
    }

    /// Resolve start times. A skipped step leaves the anchor on the last placed step.
    pub fn place(&self) -> Vec<Placed<'_, N>> {
        let mut placed: Vec<Placed<'_, N>> = Vec::with_capacity(self.steps.len());
        let mut anchor = 0.0;
        for step in &self.steps {
            if step.targets.is_empty() {
                log::debug!("timeline step `{}` has no targets, skipping", step.label);
                continue;
            }
            let start = match step.position {
                Position::At(t) => t,
                Position::AfterPrevious(offset) => anchor + offset,
            }
            .max(0.0);
            let p = Placed { step, start };
            anchor = p.end();
            placed.push(p);
        }
        placed
    }

    /// Total duration of the placed steps.
    pub fn duration(&self) -> f64 {
        self.place().iter().map(Placed::end).fold(0.0, f64::max)
    }

    /// Hand every placed step to the animator. Returns the number of steps played.
    pub fn play(&self, animator: &mut dyn Animator<N>) -> usize {
        let placed = self.place();
        for p in &placed {
            for (i, node) in p.step.targets.iter().enumerate() {
                if let Some(from) = &p.step.from {
                    animator.set(node, from);
                }
                let tween = Tween::new(p.step.tween.duration, p.step.tween.ease)
                    .delay(p.start + p.step.offset_of(i));
                animator.play(node, Track::tween(p.step.from, p.step.to, tween));
            }
        }
        placed.len()
    }
}

/// Convenience for the common "fade and rise" step.
pub fn rise<N>(label: &'static str, targets: Vec<N>, distance: f64, duration: f64) -> Step<N> {
    Step::new(label, targets, Pose::new().opacity(1.0).y(0.0), Tween::new(duration, Ease::Power2Out))
        .from(Pose::new().opacity(0.0).y(distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(label: &'static str, n: usize, duration: f64) -> Step<u32> {
        Step::new(label, (0..n as u32).collect(), Pose::new().opacity(1.0), Tween::new(duration, Ease::Linear))
    }

    #[test]
    fn negative_offsets_overlap_previous_step() {
        let tl = Timeline::new()
            .push(step("a", 1, 0.8))
            .push(step("b", 3, 1.5).stagger(0.3).after(-0.5))
            .push(step("c", 2, 1.0).stagger(0.2).after(-1.0));
        let placed = tl.place();
        let starts: Vec<f64> = placed.iter().map(|p| p.start).collect();
        assert!((starts[0] - 0.0).abs() < 1e-9);
        assert!((starts[1] - 0.3).abs() < 1e-9);
        // b spans 1.5 + 2 * 0.3 = 2.1 -> ends at 2.4
        assert!((starts[2] - 1.4).abs() < 1e-9);
    }

    #[test]
    fn missing_targets_skip_only_that_step() {
        let tl = Timeline::new()
            .push(step("a", 1, 1.0))
            .push(step("gone", 0, 5.0))
            .push(step("c", 1, 1.0).after(-0.25));
        let placed = tl.place();
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[1].step.label, "c");
        assert!((placed[1].start - 0.75).abs() < 1e-9);
    }

    #[test]
    fn absolute_positions_ignore_anchor_and_clamp() {
        let tl = Timeline::new()
            .push(step("a", 1, 1.0).after(-3.0))
            .push(step("b", 1, 0.5).at(1.5));
        let placed = tl.place();
        assert_eq!(placed[0].start, 0.0);
        assert_eq!(placed[1].start, 1.5);
        assert!((tl.duration() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn stagger_offsets_are_linear() {
        let s = step("s", 5, 0.6).stagger(0.1);
        for i in 0..5 {
            assert!((s.offset_of(i) - i as f64 * 0.1).abs() < 1e-12);
        }
    }
}
