use std::str::FromStr;

use thiserror::Error;

use crate::stage::{Rect, Viewport};

#[derive(Debug, Error, PartialEq)]
pub enum RangeError {
    #[error("unrecognised scroll anchor `{0}`")]
    Anchor(String),
    #[error("scroll edge `{0}` needs an element anchor and a viewport anchor")]
    Edge(String),
}

/// A point along an element or the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    /// Fraction of the size (`top` = 0, `center` = 0.5, `bottom` = 1, `85%` = 0.85).
    Fraction(f64),
    Pixels(f64),
}

impl Anchor {
    pub fn resolve(self, size: f64) -> f64 {
        match self {
            Anchor::Fraction(f) => f * size,
            Anchor::Pixels(px) => px,
        }
    }
}

impl FromStr for Anchor {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || RangeError::Anchor(s.to_string());
        match s {
            "top" | "left" => Ok(Anchor::Fraction(0.0)),
            "center" => Ok(Anchor::Fraction(0.5)),
            "bottom" | "right" => Ok(Anchor::Fraction(1.0)),
            _ => {
                if let Some(pct) = s.strip_suffix('%') {
                    pct.parse::<f64>().map(|v| Anchor::Fraction(v / 100.0)).map_err(|_| bad())
                } else {
                    s.strip_suffix("px")
                        .unwrap_or(s)
                        .parse::<f64>()
                        .map(Anchor::Pixels)
                        .map_err(|_| bad())
                }
            }
        }
    }
}

/// "element-anchor viewport-anchor": the edge is reached when the element
/// anchor lines up with the viewport anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub element: Anchor,
    pub viewport: Anchor,
}

impl Edge {
    /// Scroll offset at which this edge is reached.
    pub fn scroll_position(&self, bounds: &Rect, viewport_height: f64) -> f64 {
        bounds.top + self.element.resolve(bounds.height) - self.viewport.resolve(viewport_height)
    }
}

impl FromStr for Edge {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(element), Some(viewport), None) => Ok(Edge { element: element.parse()?, viewport: viewport.parse()? }),
            _ => Err(RangeError::Edge(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRange {
    pub start: Edge,
    pub end: Edge,
}

impl ScrollRange {
    pub fn new(start: &str, end: &str) -> Result<Self, RangeError> {
        Ok(Self { start: start.parse()?, end: end.parse()? })
    }

    /// Range ending when the element's bottom leaves through the viewport top.
    pub fn starting(start: &str) -> Result<Self, RangeError> {
        Self::new(start, "bottom top")
    }

    /// `(start, end)` scroll offsets for the given element box.
    pub fn positions(&self, bounds: &Rect, viewport_height: f64) -> (f64, f64) {
        (
            self.start.scroll_position(bounds, viewport_height),
            self.end.scroll_position(bounds, viewport_height),
        )
    }

    /// True once the scroll offset has reached the start edge.
    pub fn entered(&self, bounds: &Rect, viewport: &Viewport) -> bool {
        viewport.scroll_y >= self.start.scroll_position(bounds, viewport.height)
    }

    /// Progress through the range, clamped to `[0, 1]`.
    pub fn progress(&self, bounds: &Rect, viewport: &Viewport) -> f64 {
        let (start, end) = self.positions(bounds, viewport.height);
        if end <= start {
            return if viewport.scroll_y >= start { 1.0 } else { 0.0 };
        }
        ((viewport.scroll_y - start) / (end - start)).clamp(0.0, 1.0)
    }
}
