//! Capability seams between page logic and the rendering surface.
//!
//! [`Stage`] is the read side (selector queries, geometry, attributes) and
//! [`Animator`] the write side (poses, tracks, raw styles, text). The browser
//! implements both over `web-sys`; tests use the in-memory doubles in
//! [`crate::fake`].

use crate::motion::{Pose, Track};

/// Element box in document coordinates (viewport rect + scroll offset).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self { top, left, width, height }
    }

    pub fn center(&self) -> Point {
        Point { x: self.left + self.width / 2.0, y: self.top + self.height / 2.0 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

pub trait Stage {
    type Node: Clone + PartialEq;

    fn select_all(&self, selector: &str) -> Vec<Self::Node>;

    fn select(&self, selector: &str) -> Option<Self::Node> {
        self.select_all(selector).into_iter().next()
    }

    /// First descendant of `scope` matching `selector`.
    fn select_within(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node>;

    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn text(&self, node: &Self::Node) -> Option<String>;

    fn bounds(&self, node: &Self::Node) -> Option<Rect>;

    fn viewport(&self) -> Viewport;
}

pub trait Animator<N> {
    /// Apply a pose immediately.
    fn set(&mut self, node: &N, pose: &Pose);

    fn play(&mut self, node: &N, track: Track);

    /// Raw style write for properties a [`Pose`] does not model.
    fn style(&mut self, node: &N, property: &str, value: &str);

    fn text(&mut self, node: &N, text: &str);
}

/// Integer prefix of an attribute value (`"75%"` → 75), `None` if there is none.
pub fn leading_int(raw: Option<&str>) -> Option<i64> {
    let s = raw?.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|v| v * sign)
}

/// Percentage attribute clamped to 0..=100; malformed or missing reads as 0.
pub fn percent_attribute(raw: Option<&str>) -> f64 {
    leading_int(raw).map_or(0.0, |v| v.clamp(0, 100) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_int_follows_prefix_rules() {
        assert_eq!(leading_int(Some("75")), Some(75));
        assert_eq!(leading_int(Some("  42px")), Some(42));
        assert_eq!(leading_int(Some("-3")), Some(-3));
        assert_eq!(leading_int(Some("abc")), None);
        assert_eq!(leading_int(Some("")), None);
        assert_eq!(leading_int(None), None);
    }

    #[test]
    fn percent_attribute_falls_back_to_zero() {
        assert_eq!(percent_attribute(Some("85")), 85.0);
        assert_eq!(percent_attribute(Some("n/a")), 0.0);
        assert_eq!(percent_attribute(Some("250")), 100.0);
        assert_eq!(percent_attribute(None), 0.0);
    }

    #[test]
    fn rect_center() {
        let r = Rect::new(100.0, 20.0, 40.0, 10.0);
        assert_eq!(r.center(), Point { x: 40.0, y: 105.0 });
    }
}
