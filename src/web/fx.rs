//! Transient nodes and one-shot text effects.

use gloo_timers::callback::Timeout;
use web_sys::{Document, HtmlElement};

use super::animate::WebAnimator;
use super::dom::{by_id, client_rect, create, set_style};
use crate::counter::CounterAnimation;
use crate::effects::{self, Ripple};
use crate::error::PageError;
use crate::rng::PhaseRng;
use crate::stage::{Animator, Point};
use crate::typewriter::{Typewriter, CURSOR, CURSOR_ANIMATION, CURSOR_LINGER_MS};

/// Remove `el` from the document after `ms`.
pub fn remove_after(el: HtmlElement, ms: u32) {
    Timeout::new(ms, move || {
        WebAnimator::forget(&el);
        el.remove();
    })
    .forget();
}

pub fn ripple(doc: &Document, target: &HtmlElement, at: Point) -> Result<(), PageError> {
    let plan = Ripple::at(&client_rect(target), at);
    let span = create(doc, "span", "")?;
    span.set_attribute("style", &plan.css())?;
    set_style(target, "position", "relative");
    set_style(target, "overflow", "hidden");
    target.append_child(&span)?;
    remove_after(span, effects::RIPPLE_MS);
    Ok(())
}

pub fn confetti(doc: &Document, pieces: usize, rng: &mut PhaseRng) {
    let Some(container) = by_id(doc, "confettiContainer") else {
        log::debug!("no #confettiContainer, skipping confetti");
        return;
    };
    for piece in effects::confetti(pieces, rng) {
        let doc = doc.clone();
        let container = container.clone();
        Timeout::new(piece.spawn_ms, move || {
            let Ok(el) = create(&doc, "div", "confetti-piece") else { return };
            set_style(&el, "left", &format!("{}%", piece.left_pct));
            set_style(&el, "background", piece.color);
            set_style(&el, "animation-delay", &format!("{}s", piece.delay_s));
            set_style(&el, "animation-duration", &format!("{}s", piece.duration_s));
            if container.append_child(&el).is_ok() {
                remove_after(el, effects::CONFETTI_LIFE_MS);
            }
        })
        .forget();
    }
}

pub fn background_particles(doc: &Document, count: usize, rng: &mut PhaseRng) -> Result<(), PageError> {
    let Some(container) = by_id(doc, "particlesBg") else {
        return Ok(());
    };
    for particle in effects::particles(count, rng) {
        let el = create(doc, "div", "")?;
        el.set_attribute("style", &particle.css())?;
        container.append_child(&el)?;
        remove_after(el, effects::PARTICLE_LIFE_MS);
    }
    Ok(())
}

pub fn celebration_burst(doc: &Document, around: &HtmlElement) -> Result<(), PageError> {
    let Some(body) = doc.body() else { return Err(PageError::NoDocument) };
    let center = client_rect(around).center();
    let mut animator = WebAnimator::new();
    for (css, track) in effects::burst(center) {
        let el = create(doc, "div", "")?;
        el.set_attribute("style", &css)?;
        body.append_child(&el)?;
        animator.play(&el, track);
        remove_after(el, effects::BURST_MS);
    }
    Ok(())
}

pub fn badge_unlock(doc: &Document, badge: &HtmlElement) -> Result<(), PageError> {
    let (hidden, track) = effects::badge_unlock();
    let mut animator = WebAnimator::new();
    animator.set(badge, &hidden);
    animator.play(badge, track);
    for (at_ms, shadow) in effects::UNLOCK_GLOW {
        let badge = badge.clone();
        Timeout::new(at_ms, move || set_style(&badge, "box-shadow", shadow)).forget();
    }
    celebration_burst(doc, badge)
}

pub fn run_counter(el: HtmlElement, mut counter: CounterAnimation, frame_ms: u32) {
    Timeout::new(frame_ms, move || {
        el.set_text_content(Some(&counter.tick()));
        if !counter.is_done() {
            run_counter(el, counter, frame_ms);
        }
    })
    .forget();
}

pub fn type_out(doc: &Document, el: HtmlElement, text: String, speed_ms: u32) -> Result<(), PageError> {
    let cursor = create(doc, "span", "")?;
    cursor.set_text_content(Some(CURSOR));
    set_style(&cursor, "animation", CURSOR_ANIMATION);
    type_step(el, cursor, Typewriter::new(text), speed_ms);
    Ok(())
}

fn type_step(el: HtmlElement, cursor: HtmlElement, mut typing: Typewriter, speed_ms: u32) {
    match typing.next() {
        Some(prefix) => {
            el.set_text_content(Some(&prefix));
            if let Err(err) = el.append_child(&cursor) {
                log::debug!("typewriter cursor: {err:?}");
            }
            Timeout::new(speed_ms, move || type_step(el, cursor, typing, speed_ms)).forget();
        }
        None => remove_after(cursor, CURSOR_LINGER_MS),
    }
}
