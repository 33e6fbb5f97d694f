//! Hover, tilt and magnetic effects on cards and buttons.

use web_sys::{Document, HtmlElement, MouseEvent};

use super::animate::WebAnimator;
use super::dom::{client_rect, pointer, query_all, query_in};
use super::{fx, listen};
use crate::error::PageError;
use crate::hover;
use crate::motion::{Pose, Track};
use crate::stage::Animator;

fn play(el: &HtmlElement, track: Track) {
    WebAnimator::new().play(el, track);
}

pub fn bind(doc: &Document) -> Result<(), PageError> {
    buttons(doc)?;
    dashboard_cards(doc)?;
    subject_cards(doc)?;
    feature_cards(doc)?;
    Ok(())
}

fn buttons(doc: &Document) -> Result<(), PageError> {
    for button in query_all(doc, "button, .btn-primary, .btn-secondary") {
        let (el, d) = (button.clone(), doc.clone());
        listen(&button, "mouseenter", move |evt: MouseEvent| {
            play(&el, hover::button_enter());
            if let Err(err) = fx::ripple(&d, &el, pointer(&evt)) {
                log::debug!("ripple: {err}");
            }
        })?;
        let el = button.clone();
        listen(&button, "mouseleave", move |_: MouseEvent| {
            play(&el, hover::button_leave());
            play(&el, hover::magnetic_release());
        })?;
        let el = button.clone();
        listen(&button, "mousemove", move |evt: MouseEvent| {
            play(&el, hover::magnetic(&client_rect(&el), pointer(&evt)));
        })?;
    }
    Ok(())
}

fn dashboard_cards(doc: &Document) -> Result<(), PageError> {
    for card in query_all(doc, ".dashboard-card") {
        let el = card.clone();
        listen(&card, "mouseenter", move |_: MouseEvent| {
            play(&el, hover::dashboard_card_enter());
            if let Some(icon) = query_in(&el, ".card-title i") {
                play(&icon, hover::dashboard_icon_spin());
            }
        })?;
        let el = card.clone();
        listen(&card, "mouseleave", move |_: MouseEvent| play(&el, hover::dashboard_card_leave()))?;
    }
    Ok(())
}

fn subject_cards(doc: &Document) -> Result<(), PageError> {
    for card in query_all(doc, ".subject-card") {
        let el = card.clone();
        listen(&card, "mousemove", move |evt: MouseEvent| {
            WebAnimator::new().set(&el, &Pose::new().perspective(hover::TILT_PERSPECTIVE));
            play(&el, hover::subject_tilt(&client_rect(&el), pointer(&evt)));
        })?;
        let el = card.clone();
        listen(&card, "mouseleave", move |_: MouseEvent| play(&el, hover::subject_release()))?;
    }
    Ok(())
}

fn feature_cards(doc: &Document) -> Result<(), PageError> {
    for card in query_all(doc, ".feature-card") {
        let el = card.clone();
        listen(&card, "mouseenter", move |_: MouseEvent| {
            play(&el, hover::feature_card_enter());
            if let Some(icon) = query_in(&el, ".feature-icon") {
                play(&icon, hover::feature_icon_enter());
            }
        })?;
        let el = card.clone();
        listen(&card, "mouseleave", move |_: MouseEvent| {
            play(&el, hover::feature_card_leave());
            if let Some(icon) = query_in(&el, ".feature-icon") {
                play(&icon, hover::feature_icon_leave());
            }
        })?;
    }
    Ok(())
}
