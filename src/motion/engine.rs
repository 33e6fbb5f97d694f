//! Frame-driven tween engine behind the browser animator.
//!
//! The engine owns every running [`Track`], remembers the last pose written to
//! each element, and on [`TweenEngine::advance`] returns the full pose of each
//! element that changed this frame. It is generic over the element handle so
//! the same code runs against `HtmlElement`s in the page and plain ids in tests.

use super::{Pose, Repeat, Track};

struct Active<N> {
    node: N,
    track: Track,
    started_at: f64,
    froms: Option<Vec<Pose>>,
}

pub struct TweenEngine<N> {
    active: Vec<Active<N>>,
    poses: Vec<(N, Pose)>,
    dirty: Vec<N>,
}

impl<N: Clone + PartialEq> Default for TweenEngine<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone + PartialEq> TweenEngine<N> {
    pub fn new() -> Self {
        Self { active: Vec::new(), poses: Vec::new(), dirty: Vec::new() }
    }

    /// Start a track at `now` (seconds). Older finite tracks on the same node give
    /// up the properties the new track writes and are dropped once nothing is
    /// left; looping tracks keep running untouched.
    pub fn play(&mut self, node: N, track: Track, now: f64) {
        let footprint = track.footprint();
        for older in self.active.iter_mut() {
            if older.node == node && older.track.repeat != Repeat::Forever {
                older.track.release(&footprint);
            }
        }
        self.active.retain(|a| !a.track.footprint().is_empty());
        // An explicit start pose shows immediately, even while the delay runs.
        if let Some(from) = track.segments.first().and_then(|s| s.from) {
            self.write(&node, &from);
        }
        self.active.push(Active { node, track, started_at: now, froms: None });
    }

    /// Jump straight to `pose` without animating.
    pub fn set(&mut self, node: &N, pose: &Pose) {
        self.write(node, pose);
    }

    pub fn pose(&self, node: &N) -> Option<&Pose> {
        self.poses.iter().find(|(n, _)| n == node).map(|(_, p)| p)
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty() && self.dirty.is_empty()
    }

    pub fn running(&self) -> usize {
        self.active.len()
    }

    /// Number of nodes with a remembered pose.
    pub fn tracked(&self) -> usize {
        self.poses.len()
    }

    /// Drop every track and the cached pose of `node`; call before the node
    /// leaves the document.
    pub fn forget(&mut self, node: &N) {
        self.active.retain(|a| &a.node != node);
        self.poses.retain(|(n, _)| n != node);
        self.dirty.retain(|n| n != node);
    }

    /// Advance every track to `now` and drain the poses that changed.
    pub fn advance(&mut self, now: f64) -> Vec<(N, Pose)> {
        let mut idx = 0;
        while idx < self.active.len() {
            let elapsed = now - self.active[idx].started_at;
            if elapsed < self.active[idx].track.delay {
                idx += 1;
                continue;
            }
            if self.active[idx].froms.is_none() {
                let current = self.pose(&self.active[idx].node).copied().unwrap_or_default();
                let froms = self.active[idx].track.capture(&current);
                self.active[idx].froms = Some(froms);
            }
            let active = &self.active[idx];
            let sample = active
                .track
                .sample(active.froms.as_deref().unwrap_or_default(), elapsed);
            let Some(sample) = sample else {
                idx += 1;
                continue;
            };
            let node = active.node.clone();
            self.write(&node, &sample.pose);
            if sample.finished {
                self.active.remove(idx);
            } else {
                idx += 1;
            }
        }
        let dirty = std::mem::take(&mut self.dirty);
        dirty
            .into_iter()
            .filter_map(|n| self.pose(&n).map(|p| (n.clone(), *p)))
            .collect()
    }

    fn write(&mut self, node: &N, pose: &Pose) {
        match self.poses.iter_mut().find(|(n, _)| n == node) {
            Some((_, current)) => current.merge(pose),
            None => self.poses.push((node.clone(), *pose)),
        }
        if !self.dirty.contains(node) {
            self.dirty.push(node.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{Ease, Tween};

    fn fade_in() -> Track {
        Track::tween(Some(Pose::new().opacity(0.0)), Pose::new().opacity(1.0), Tween::new(1.0, Ease::Linear))
    }

    #[test]
    fn explicit_from_renders_before_delay() {
        let mut engine = TweenEngine::new();
        engine.play(1u32, fade_in().delayed(2.0), 0.0);
        let writes = engine.advance(0.5);
        assert_eq!(writes, vec![(1, Pose::new().opacity(0.0))]);
        assert!(engine.advance(1.0).is_empty());
    }

    #[test]
    fn finished_tracks_are_dropped_with_final_pose() {
        let mut engine = TweenEngine::new();
        engine.play(7u32, fade_in(), 10.0);
        engine.advance(10.5);
        assert_eq!(engine.running(), 1);
        let writes = engine.advance(12.0);
        assert_eq!(writes[0].1.opacity, Some(1.0));
        assert_eq!(engine.running(), 0);
        assert!(engine.is_idle());
    }

    #[test]
    fn implicit_from_is_captured_at_start() {
        let mut engine = TweenEngine::new();
        engine.set(&3u32, &Pose::new().y(40.0));
        engine.advance(0.0);
        engine.play(3, Track::tween(None, Pose::new().y(0.0), Tween::new(2.0, Ease::Linear)), 0.0);
        let writes = engine.advance(1.0);
        assert!((writes[0].1.y.unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn newer_track_replaces_overlapping_finite_track() {
        let mut engine = TweenEngine::new();
        engine.play(1u32, Track::tween(None, Pose::new().x(10.0), Tween::new(1.0, Ease::Linear)), 0.0);
        engine.play(1, Track::tween(None, Pose::new().scale(1.05), Tween::new(1.0, Ease::Linear)), 0.0);
        engine.play(1, Track::tween(None, Pose::new().x(0.0), Tween::new(1.0, Ease::Linear)), 0.0);
        assert_eq!(engine.running(), 2);
    }

    #[test]
    fn newer_track_only_takes_over_shared_properties() {
        let mut engine = TweenEngine::new();
        let reveal = Track::tween(
            Some(Pose::new().opacity(0.0).y(60.0)),
            Pose::new().opacity(1.0).y(0.0),
            Tween::new(1.0, Ease::Linear),
        );
        engine.play(1u32, reveal, 0.0);
        engine.advance(0.0);
        engine.play(1, Track::tween(None, Pose::new().y(-10.0), Tween::new(0.5, Ease::Linear)), 0.0);
        assert_eq!(engine.running(), 2);
        engine.advance(2.0);
        let pose = engine.pose(&1).copied().unwrap();
        assert_eq!(pose.opacity, Some(1.0));
        assert_eq!(pose.y, Some(-10.0));
    }

    #[test]
    fn looping_tracks_survive_new_tweens() {
        let mut engine = TweenEngine::new();
        let float = Track::tween(None, Pose::new().y(-5.0), Tween::new(2.0, Ease::SineInOut)).forever().yoyo();
        engine.play(1u32, float, 0.0);
        engine.play(1, Track::tween(None, Pose::new().y(-10.0), Tween::new(0.4, Ease::Power2Out)), 0.0);
        assert_eq!(engine.running(), 2);
        engine.advance(100.0);
        assert_eq!(engine.running(), 1);
    }

    #[test]
    fn forgotten_nodes_leave_nothing_behind() {
        let mut engine = TweenEngine::new();
        for id in 0..1000u32 {
            engine.play(id, Track::tween(None, Pose::new().opacity(1.0), Tween::new(0.2, Ease::Linear)), 0.0);
        }
        engine.advance(10.0);
        assert!(engine.is_idle());
        assert_eq!(engine.tracked(), 1000);
        for id in 0..1000u32 {
            engine.forget(&id);
        }
        assert_eq!(engine.tracked(), 0);
        assert!(engine.pose(&0).is_none());
    }

    #[test]
    fn forget_stops_a_running_track_without_touching_others() {
        let mut engine = TweenEngine::new();
        engine.play(1u32, fade_in(), 0.0);
        engine.play(2u32, fade_in(), 0.0);
        engine.advance(0.5);
        engine.forget(&1);
        assert_eq!(engine.running(), 1);
        let writes = engine.advance(0.75);
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, 2);
    }

    #[test]
    fn writes_carry_the_merged_pose() {
        let mut engine = TweenEngine::new();
        engine.set(&1u32, &Pose::new().scale(1.1));
        engine.play(1, Track::tween(None, Pose::new().y(-5.0), Tween::new(1.0, Ease::Linear)), 0.0);
        let writes = engine.advance(1.0);
        assert_eq!(writes, vec![(1, Pose::new().scale(1.1).y(-5.0))]);
    }
}
