//! Browser [`Animator`]: a thread-local [`TweenEngine`] stepped from
//! `requestAnimationFrame`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::dom::set_style;
use crate::motion::{Pose, Track, TweenEngine};
use crate::stage::Animator;

thread_local! {
    static ENGINE: RefCell<TweenEngine<HtmlElement>> = RefCell::new(TweenEngine::new());
    static LOOP_STARTED: Cell<bool> = const { Cell::new(false) };
}

fn now_secs() -> f64 {
    crate::performance_now() / 1000.0
}

/// Write the style properties a pose covers.
pub fn apply_pose(el: &HtmlElement, pose: &Pose) {
    if let Some(transform) = pose.css_transform() {
        set_style(el, "transform", &transform);
    }
    if let Some(o) = pose.opacity {
        set_style(el, "opacity", &o.to_string());
    }
    if let Some(w) = pose.width_pct {
        set_style(el, "width", &format!("{w}%"));
    }
    if let Some(l) = pose.left_pct {
        set_style(el, "left", &format!("{l}%"));
    }
}

fn flush(now: f64) {
    let writes = ENGINE.with(|e| e.borrow_mut().advance(now));
    for (el, pose) in &writes {
        apply_pose(el, pose);
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop() {
    if LOOP_STARTED.with(|s| s.replace(true)) {
        return;
    }
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        flush(ts / 1000.0);
        if let (Some(w), Some(cb)) = (web_sys::window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (web_sys::window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Handle to the page-wide engine; cheap to create anywhere.
#[derive(Clone, Copy, Debug)]
pub struct WebAnimator;

impl Default for WebAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAnimator {
    pub fn new() -> Self {
        start_frame_loop();
        WebAnimator
    }

    pub fn running() -> usize {
        ENGINE.with(|e| e.borrow().running())
    }

    pub fn tracked() -> usize {
        ENGINE.with(|e| e.borrow().tracked())
    }

    /// Release `node` from the engine before it is detached.
    pub fn forget(node: &HtmlElement) {
        ENGINE.with(|e| e.borrow_mut().forget(node));
    }
}

impl Animator<HtmlElement> for WebAnimator {
    fn set(&mut self, node: &HtmlElement, pose: &Pose) {
        ENGINE.with(|e| e.borrow_mut().set(node, pose));
        flush(now_secs());
    }

    fn play(&mut self, node: &HtmlElement, track: Track) {
        ENGINE.with(|e| e.borrow_mut().play(node.clone(), track, now_secs()));
        flush(now_secs());
    }

    fn style(&mut self, node: &HtmlElement, property: &str, value: &str) {
        set_style(node, property, value);
    }

    fn text(&mut self, node: &HtmlElement, text: &str) {
        node.set_text_content(Some(text));
    }
}
