//! In-memory [`Stage`] and [`Animator`] doubles.
//!
//! Selectors are not parsed: each node is registered under the exact selector
//! strings the page code queries. Good enough to drive the orchestration
//! logic without a document.

use std::cell::Cell;
use std::collections::HashMap;

use crate::motion::{Pose, Track};
use crate::stage::{Animator, Rect, Stage, Viewport};

#[derive(Clone, Debug, Default)]
pub struct FakeStage {
    by_selector: Vec<(String, u32)>,
    within: Vec<(u32, String, u32)>,
    children: HashMap<u32, Vec<u32>>,
    attributes: HashMap<(u32, String), String>,
    texts: HashMap<u32, String>,
    bounds: HashMap<u32, Rect>,
    viewport: Viewport,
    measured: Cell<usize>,
}

impl FakeStage {
    pub fn new(viewport_height: f64) -> Self {
        Self { viewport: Viewport { scroll_y: 0.0, height: viewport_height }, ..Self::default() }
    }

    /// Register `id` under `selector` with a document-space box.
    pub fn node(mut self, id: u32, selector: &str, bounds: Rect) -> Self {
        self.by_selector.push((selector.to_string(), id));
        self.bounds.insert(id, bounds);
        self
    }

    pub fn inner(mut self, scope: u32, selector: &str, id: u32) -> Self {
        self.within.push((scope, selector.to_string(), id));
        self
    }

    pub fn child(mut self, parent: u32, id: u32, bounds: Rect) -> Self {
        self.children.entry(parent).or_default().push(id);
        self.bounds.insert(id, bounds);
        self
    }

    pub fn attr(mut self, id: u32, name: &str, value: &str) -> Self {
        self.attributes.insert((id, name.to_string()), value.to_string());
        self
    }

    pub fn text_of(mut self, id: u32, text: &str) -> Self {
        self.texts.insert(id, text.to_string());
        self
    }

    pub fn scroll_to(&mut self, y: f64) {
        self.viewport.scroll_y = y;
    }

    /// How many times `bounds` has been asked for.
    pub fn measurements(&self) -> usize {
        self.measured.get()
    }
}

impl Stage for FakeStage {
    type Node = u32;

    fn select_all(&self, selector: &str) -> Vec<u32> {
        self.by_selector
            .iter()
            .filter(|(s, _)| s == selector)
            .map(|(_, id)| *id)
            .collect()
    }

    fn select_within(&self, scope: &u32, selector: &str) -> Option<u32> {
        self.within
            .iter()
            .find(|(s, sel, _)| s == scope && sel == selector)
            .map(|(_, _, id)| *id)
    }

    fn children(&self, node: &u32) -> Vec<u32> {
        self.children.get(node).cloned().unwrap_or_default()
    }

    fn attribute(&self, node: &u32, name: &str) -> Option<String> {
        self.attributes.get(&(*node, name.to_string())).cloned()
    }

    fn text(&self, node: &u32) -> Option<String> {
        self.texts.get(node).cloned()
    }

    fn bounds(&self, node: &u32) -> Option<Rect> {
        self.measured.set(self.measured.get() + 1);
        self.bounds.get(node).copied()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Call<N> {
    Set(N, Pose),
    Play(N, Track),
    Style(N, String, String),
    Text(N, String),
}

/// Records every write in order.
#[derive(Clone, Debug)]
pub struct RecordingAnimator<N> {
    pub calls: Vec<Call<N>>,
}

impl<N> Default for RecordingAnimator<N> {
    fn default() -> Self {
        Self { calls: Vec::new() }
    }
}

impl<N: PartialEq> RecordingAnimator<N> {
    pub fn plays_for(&self, node: N) -> Vec<&Track> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Play(n, t) if *n == node => Some(t),
                _ => None,
            })
            .collect()
    }

    pub fn sets_for(&self, node: N) -> Vec<&Pose> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Set(n, p) if *n == node => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn styles_for(&self, node: N) -> Vec<(&str, &str)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Style(n, k, v) if *n == node => Some((k.as_str(), v.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn texts_for(&self, node: N) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Text(n, t) if *n == node => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl<N: Clone> Animator<N> for RecordingAnimator<N> {
    fn set(&mut self, node: &N, pose: &Pose) {
        self.calls.push(Call::Set(node.clone(), *pose));
    }

    fn play(&mut self, node: &N, track: Track) {
        self.calls.push(Call::Play(node.clone(), track));
    }

    fn style(&mut self, node: &N, property: &str, value: &str) {
        self.calls.push(Call::Style(node.clone(), property.to_string(), value.to_string()));
    }

    fn text(&mut self, node: &N, text: &str) {
        self.calls.push(Call::Text(node.clone(), text.to_string()));
    }
}
