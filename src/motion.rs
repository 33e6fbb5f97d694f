//! Visual state model shared by every animated component.
//!
//! A [`Pose`] is a sparse set of animatable properties; a [`Track`] is the
//! ordered list of tween segments one element plays (a single tween, a
//! keyframe loop, or one element's slice of a staggered reveal). Nothing in
//! here touches the DOM: the browser animator turns poses into style writes,
//! tests inspect them directly.

mod ease;
pub mod engine;
pub mod timeline;

pub use ease::Ease;
pub use engine::TweenEngine;
pub use timeline::{Placed, Position, Step, Timeline};

// --- Pose --------------------------------------------------------------------

/// Sparse visual state. `None` means "not touched by this pose".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    pub opacity: Option<f64>,
    pub x: Option<f64>,          // px
    pub y: Option<f64>,          // px
    pub scale: Option<f64>,
    pub rotation: Option<f64>,   // deg
    pub rotation_x: Option<f64>, // deg
    pub rotation_y: Option<f64>, // deg
    pub perspective: Option<f64>, // px, only meaningful with rotation_x / rotation_y
    pub width_pct: Option<f64>,
    pub left_pct: Option<f64>,
}

type Read = fn(&Pose) -> Option<f64>;
type Write = fn(&mut Pose, f64);

/// (read, write, neutral value) per property.
const CHANNELS: [(Read, Write, f64); 10] = [
    (|p| p.opacity, |p, v| p.opacity = Some(v), 1.0),
    (|p| p.x, |p, v| p.x = Some(v), 0.0),
    (|p| p.y, |p, v| p.y = Some(v), 0.0),
    (|p| p.scale, |p, v| p.scale = Some(v), 1.0),
    (|p| p.rotation, |p, v| p.rotation = Some(v), 0.0),
    (|p| p.rotation_x, |p, v| p.rotation_x = Some(v), 0.0),
    (|p| p.rotation_y, |p, v| p.rotation_y = Some(v), 0.0),
    (|p| p.perspective, |p, v| p.perspective = Some(v), 0.0),
    (|p| p.width_pct, |p, v| p.width_pct = Some(v), 0.0),
    (|p| p.left_pct, |p, v| p.left_pct = Some(v), 0.0),
];

impl Pose {
    pub const fn new() -> Self {
        Self {
            opacity: None,
            x: None,
            y: None,
            scale: None,
            rotation: None,
            rotation_x: None,
            rotation_y: None,
            perspective: None,
            width_pct: None,
            left_pct: None,
        }
    }

    pub const fn opacity(mut self, v: f64) -> Self {
        self.opacity = Some(v);
        self
    }
    pub const fn x(mut self, v: f64) -> Self {
        self.x = Some(v);
        self
    }
    pub const fn y(mut self, v: f64) -> Self {
        self.y = Some(v);
        self
    }
    pub const fn scale(mut self, v: f64) -> Self {
        self.scale = Some(v);
        self
    }
    pub const fn rotation(mut self, v: f64) -> Self {
        self.rotation = Some(v);
        self
    }
    pub const fn rotation_x(mut self, v: f64) -> Self {
        self.rotation_x = Some(v);
        self
    }
    pub const fn rotation_y(mut self, v: f64) -> Self {
        self.rotation_y = Some(v);
        self
    }
    pub const fn perspective(mut self, v: f64) -> Self {
        self.perspective = Some(v);
        self
    }
    pub const fn width_pct(mut self, v: f64) -> Self {
        self.width_pct = Some(v);
        self
    }
    pub const fn left_pct(mut self, v: f64) -> Self {
        self.left_pct = Some(v);
        self
    }

    pub fn is_empty(&self) -> bool {
        CHANNELS.iter().all(|(read, _, _)| read(self).is_none())
    }

    /// Overwrite every property `other` sets.
    pub fn merge(&mut self, other: &Pose) {
        for (read, write, _) in CHANNELS {
            if let Some(v) = read(other) {
                write(self, v);
            }
        }
    }

    /// Restrict to the properties present in `mask`, filling gaps with neutral values.
    pub fn project(&self, mask: &Pose) -> Pose {
        let mut out = Pose::new();
        for (read, write, neutral) in CHANNELS {
            if read(mask).is_some() {
                write(&mut out, read(self).unwrap_or(neutral));
            }
        }
        out
    }

    /// Drop every property present in `mask`.
    pub fn without(&self, mask: &Pose) -> Pose {
        let mut out = Pose::new();
        for (read, write, _) in CHANNELS {
            if let (Some(v), None) = (read(self), read(mask)) {
                write(&mut out, v);
            }
        }
        out
    }

    /// True if both poses touch at least one common property.
    pub fn overlaps(&self, other: &Pose) -> bool {
        CHANNELS
            .iter()
            .any(|(read, _, _)| read(self).is_some() && read(other).is_some())
    }

    /// Interpolate every property of `to`. `from` gaps read as neutral.
    /// Exact at `t == 0` and `t == 1`.
    pub fn lerp(from: &Pose, to: &Pose, t: f64) -> Pose {
        let mut out = Pose::new();
        for (read, write, neutral) in CHANNELS {
            if let Some(b) = read(to) {
                let a = read(from).unwrap_or(neutral);
                let v = if t <= 0.0 {
                    a
                } else if t >= 1.0 {
                    b
                } else {
                    a * (1.0 - t) + b * t
                };
                write(&mut out, v);
            }
        }
        out
    }

    /// CSS `transform` for the transform-related properties, if any are set.
    pub fn css_transform(&self) -> Option<String> {
        let mut parts: Vec<String> = Vec::new();
        if let Some(p) = self.perspective.filter(|p| *p > 0.0) {
            parts.push(format!("perspective({p}px)"));
        }
        if self.x.is_some() || self.y.is_some() {
            parts.push(format!(
                "translate({}px, {}px)",
                self.x.unwrap_or(0.0),
                self.y.unwrap_or(0.0)
            ));
        }
        if let Some(r) = self.rotation {
            parts.push(format!("rotate({r}deg)"));
        }
        if let Some(r) = self.rotation_x {
            parts.push(format!("rotateX({r}deg)"));
        }
        if let Some(r) = self.rotation_y {
            parts.push(format!("rotateY({r}deg)"));
        }
        if let Some(s) = self.scale {
            parts.push(format!("scale({s})"));
        }
        if parts.is_empty() { None } else { Some(parts.join(" ")) }
    }
}

// --- Tween / Track -----------------------------------------------------------

/// Duration, easing and start delay of a single tween (seconds).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub duration: f64,
    pub ease: Ease,
    pub delay: f64,
}

impl Tween {
    pub const fn new(duration: f64, ease: Ease) -> Self {
        Self { duration, ease, delay: 0.0 }
    }
    pub const fn delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Repeat {
    /// Extra iterations after the first one.
    Times(u32),
    Forever,
}

/// One tween inside a track. `start` is relative to the iteration start.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub duration: f64,
    pub ease: Ease,
    pub from: Option<Pose>,
    pub to: Pose,
}

/// Everything one element plays for a single animation request.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub segments: Vec<Segment>,
    pub delay: f64,
    pub repeat: Repeat,
    pub repeat_delay: f64,
    pub yoyo: bool,
}

/// Result of sampling a track at a point in time.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub pose: Pose,
    pub finished: bool,
}

impl Track {
    /// A single tween; `from: None` animates from whatever the element shows when it starts.
    pub fn tween(from: Option<Pose>, to: Pose, tween: Tween) -> Self {
        Self {
            segments: vec![Segment { start: 0.0, duration: tween.duration, ease: tween.ease, from, to }],
            delay: tween.delay,
            repeat: Repeat::Times(0),
            repeat_delay: 0.0,
            yoyo: false,
        }
    }

    /// Append a segment starting where the track currently ends.
    pub fn then(mut self, to: Pose, duration: f64, ease: Ease) -> Self {
        let start = self.length();
        self.segments.push(Segment { start, duration, ease, from: None, to });
        self
    }

    /// Append a segment starting `offset` seconds after the current end (negative overlaps).
    pub fn then_at(mut self, offset: f64, to: Pose, duration: f64, ease: Ease) -> Self {
        let start = (self.length() + offset).max(0.0);
        self.segments.push(Segment { start, duration, ease, from: None, to });
        self
    }

    pub fn delayed(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn forever(mut self) -> Self {
        self.repeat = Repeat::Forever;
        self
    }

    pub fn yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    pub fn with_repeat_delay(mut self, delay: f64) -> Self {
        self.repeat_delay = delay;
        self
    }

    /// Length of one iteration.
    pub fn length(&self) -> f64 {
        self.segments
            .iter()
            .map(|s| s.start + s.duration)
            .fold(0.0, f64::max)
    }

    /// Union of every property the track writes.
    pub fn footprint(&self) -> Pose {
        let mut out = Pose::new();
        for seg in &self.segments {
            if let Some(from) = &seg.from {
                out.merge(from);
            }
            out.merge(&seg.to);
        }
        out
    }

    /// Stop animating the properties in `mask`; the rest keeps its timing.
    pub fn release(&mut self, mask: &Pose) {
        for seg in &mut self.segments {
            seg.to = seg.to.without(mask);
            seg.from = seg.from.map(|f| f.without(mask)).filter(|f| !f.is_empty());
        }
    }

    /// Resolve each segment's start values against the element's current pose.
    /// Implicit `from` values chain through earlier segments.
    pub fn capture(&self, current: &Pose) -> Vec<Pose> {
        let mut running = *current;
        let mut froms = Vec::with_capacity(self.segments.len());
        for seg in &self.segments {
            let mut from = running.project(&seg.to);
            if let Some(explicit) = &seg.from {
                from.merge(explicit);
            }
            froms.push(from);
            running.merge(&seg.to);
        }
        froms
    }

    /// Sample at `elapsed` seconds after the track was handed to the engine.
    /// Returns `None` while the start delay is still running.
    pub fn sample(&self, froms: &[Pose], elapsed: f64) -> Option<Sample> {
        let local = elapsed - self.delay;
        if local < 0.0 {
            return None;
        }
        let len = self.length();
        let cycle = len + self.repeat_delay;
        let last_iteration = match self.repeat {
            Repeat::Times(n) => Some(n as u64),
            Repeat::Forever if cycle <= 0.0 => Some(0),
            Repeat::Forever => None,
        };
        if let Some(n) = last_iteration {
            let total = (n + 1) as f64 * len + n as f64 * self.repeat_delay;
            if local >= total {
                let reversed = self.yoyo && n % 2 == 1;
                let at = if reversed { 0.0 } else { len };
                return Some(Sample { pose: self.evaluate(froms, at), finished: true });
            }
        }
        let iteration = if cycle > 0.0 { (local / cycle).floor() } else { 0.0 };
        let mut within = (local - iteration * cycle).min(len);
        if self.yoyo && (iteration as u64) % 2 == 1 {
            within = len - within;
        }
        Some(Sample { pose: self.evaluate(froms, within), finished: false })
    }

    fn evaluate(&self, froms: &[Pose], at: f64) -> Pose {
        let mut pose = Pose::new();
        for (idx, seg) in self.segments.iter().enumerate() {
            if idx > 0 && at < seg.start {
                continue;
            }
            let t = if seg.duration <= 0.0 {
                1.0
            } else {
                ((at - seg.start) / seg.duration).clamp(0.0, 1.0)
            };
            let from = froms.get(idx).copied().unwrap_or_default();
            pose.merge(&Pose::lerp(&from, &seg.to, seg.ease.apply(t)));
        }
        pose
    }
}
