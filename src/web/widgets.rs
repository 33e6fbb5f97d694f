//! Navigation, language switcher, badges, streak calendar, mascot and the
//! timer-driven XP/flame touches.

use std::cell::RefCell;

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlImageElement, MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use super::animate::WebAnimator;
use super::dom::{by_id, create, query, query_all, query_in, set_style};
use super::storage::BrowserStore;
use super::{fx, listen};
use crate::badge::{self, BadgeDetails};
use crate::config::PageConfig;
use crate::error::PageError;
use crate::locale::{Language, LanguageSelector, Translations};
use crate::mascot::{self, FrameCycler};
use crate::motion::{Ease, Pose, Track, Tween};
use crate::nav;
use crate::page;
use crate::rng::PhaseRng;
use crate::stage::Animator;
use crate::streak;

struct LanguageState {
    selector: LanguageSelector<BrowserStore>,
    translations: Translations,
}

thread_local! {
    static LANGUAGE: RefCell<Option<LanguageState>> = const { RefCell::new(None) };
}

fn text_el(doc: &Document, tag: &str, class: &str, text: &str) -> Result<HtmlElement, PageError> {
    let el = create(doc, tag, class)?;
    el.set_text_content(Some(text));
    Ok(el)
}

fn smooth_scroll(target: &Element, block: Option<ScrollLogicalPosition>) {
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(ScrollBehavior::Smooth);
    if let Some(block) = block {
        opts.set_block(block);
    }
    target.scroll_into_view_with_scroll_into_view_options(&opts);
}

// --- navigation --------------------------------------------------------------

/// Scroll-position tint; runs before the scroll triggers on every scroll event.
pub fn tint_navbar(doc: &Document, scroll_y: f64) {
    if let Some(navbar) = query(doc, ".navbar") {
        set_style(&navbar, "background", &nav::navbar_background(scroll_y));
    }
}

pub fn navigation(doc: &Document) -> Result<(), PageError> {
    let links = query_all(doc, ".nav-link");
    for link in &links {
        let (this, all, d) = (link.clone(), links.clone(), doc.clone());
        listen(link, "click", move |evt: MouseEvent| {
            evt.prevent_default();
            let href = this.get_attribute("href");
            let Some(section) = nav::section_selector(href.as_deref()).and_then(|s| query(&d, s)) else {
                return;
            };
            smooth_scroll(&section, Some(ScrollLogicalPosition::Start));
            for other in &all {
                let _ = other.class_list().remove_1("active");
            }
            let _ = this.class_list().add_1("active");
        })?;
    }
    Ok(())
}

pub fn mobile_menu(doc: &Document) -> Result<(), PageError> {
    let (Some(hamburger), Some(menu)) = (by_id(doc, "hamburger"), by_id(doc, "navMenu")) else {
        return Ok(());
    };
    let (h, m) = (hamburger.clone(), menu.clone());
    listen(&hamburger, "click", move |_: MouseEvent| {
        let _ = h.class_list().toggle("active");
        let _ = m.class_list().toggle("active");
    })?;
    for link in query_all(doc, "#navMenu .nav-link") {
        let (h, m) = (hamburger.clone(), menu.clone());
        listen(&link, "click", move |_: MouseEvent| {
            let _ = h.class_list().remove_1("active");
            let _ = m.class_list().remove_1("active");
        })?;
    }
    Ok(())
}

pub fn hero_cta(doc: &Document, config: &PageConfig) -> Result<(), PageError> {
    let Some(button) = by_id(doc, "startLearning") else { return Ok(()) };
    let d = doc.clone();
    let pieces = config.confetti_pieces;
    let mut rng = PhaseRng::from_entropy();
    listen(&button, "click", move |_: MouseEvent| {
        fx::confetti(&d, pieces, &mut rng);
        if let Some(dashboard) = by_id(&d, "dashboard") {
            smooth_scroll(&dashboard, None);
        }
    })
}

// --- language ----------------------------------------------------------------

fn apply_language(doc: &Document, lang: Language, translations: &Translations) {
    for option in query_all(doc, ".language-option") {
        let active = option.get_attribute("data-lang").as_deref() == Some(lang.code());
        let _ = option.class_list().toggle_with_force("active", active);
    }
    if let Some(label) = query(doc, ".lang-text") {
        label.set_text_content(Some(lang.label()));
    }
    for el in query_all(doc, "[data-i18n]") {
        let text = el.get_attribute("data-i18n").and_then(|key| translations.lookup(lang, &key).map(str::to_string));
        if let Some(text) = text {
            el.set_text_content(Some(&text));
        }
    }
}

/// Switch the page language; returns the code actually applied.
pub fn change_language(code: &str) -> Result<String, PageError> {
    let doc = super::dom::document()?;
    LANGUAGE.with(|cell| -> Result<String, PageError> {
        let mut state = cell.borrow_mut();
        if state.is_none() {
            *state = Some(LanguageState {
                selector: LanguageSelector::load(BrowserStore::open()),
                translations: Translations::bundled()?,
            });
        }
        let Some(state) = state.as_mut() else { return Ok(Language::default().code().to_string()) };
        let lang = state.selector.select(code);
        apply_language(&doc, lang, &state.translations);
        log::info!("language set to {}", lang.code());
        Ok(lang.code().to_string())
    })
}

fn close_dropdown(button: &Element, dropdown: &Element) {
    let _ = dropdown.class_list().remove_1("active");
    let _ = button.class_list().remove_1("active");
}

pub fn language_selector(doc: &Document) -> Result<(), PageError> {
    let selector = LanguageSelector::load(BrowserStore::open());
    let translations = Translations::bundled()?;
    apply_language(doc, selector.current(), &translations);
    LANGUAGE.with(|cell| *cell.borrow_mut() = Some(LanguageState { selector, translations }));

    let (Some(button), Some(dropdown)) = (by_id(doc, "languageBtn"), by_id(doc, "languageDropdown")) else {
        return Ok(());
    };
    let (b, dd) = (button.clone(), dropdown.clone());
    listen(&button, "click", move |evt: MouseEvent| {
        evt.stop_propagation();
        let _ = dd.class_list().toggle("active");
        let _ = b.class_list().toggle("active");
    })?;
    let (b, dd) = (button.clone(), dropdown.clone());
    listen(doc, "click", move |evt: Event| {
        let inside = evt
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|t| t.closest(".language-selector").ok().flatten())
            .is_some();
        if !inside {
            close_dropdown(&b, &dd);
        }
    })?;
    for option in query_all(doc, ".language-option") {
        let (b, dd, this) = (button.clone(), dropdown.clone(), option.clone());
        listen(&option, "click", move |_: MouseEvent| {
            let code = this.get_attribute("data-lang").unwrap_or_default();
            if let Err(err) = change_language(&code) {
                log::warn!("language switch failed: {err}");
            }
            close_dropdown(&b, &dd);
        })?;
    }
    Ok(())
}

// --- badges ------------------------------------------------------------------

const TOOLTIP_CSS: &str = "position: absolute; background: rgba(0, 0, 0, 0.9); color: white; padding: 8px 12px; \
    border-radius: 6px; font-size: 0.75rem; z-index: 1000; pointer-events: none; bottom: 100%; left: 50%; \
    transform: translateX(-50%); white-space: nowrap; margin-bottom: 5px;";

const MODAL_CSS: &str = "position: fixed; top: 0; left: 0; width: 100%; height: 100%; z-index: 10000; \
    display: flex; align-items: center; justify-content: center;";

fn badge_name(badge: &Element) -> String {
    query_in(badge, ".badge-name").and_then(|n| n.text_content()).unwrap_or_default()
}

fn show_tooltip(doc: &Document, badge: &HtmlElement) -> Result<(), PageError> {
    // The positioned wrapper keeps its translateX(-50%); the inner text carries the rise.
    let tooltip = create(doc, "div", "badge-tooltip")?;
    tooltip.set_attribute("style", TOOLTIP_CSS)?;
    let text = text_el(doc, "span", "badge-tooltip-text", badge::description(&badge_name(badge)))?;
    set_style(&text, "display", "inline-block");
    tooltip.append_child(&text)?;
    set_style(badge, "position", "relative");
    badge.append_child(&tooltip)?;
    WebAnimator::new().play(&text, badge::tooltip_track());
    Ok(())
}

fn build_modal(doc: &Document, details: &BadgeDetails) -> Result<(HtmlElement, HtmlElement), PageError> {
    let modal = create(doc, "div", "badge-modal")?;
    modal.set_attribute("style", MODAL_CSS)?;
    let overlay = create(doc, "div", "modal-overlay")?;
    let content = create(doc, "div", "modal-content")?;

    let header = create(doc, "div", "modal-header")?;
    let icon = text_el(doc, "div", "modal-badge-icon", &details.icon)?;
    let title = text_el(doc, "h3", "modal-badge-title", &details.name)?;
    let close = text_el(doc, "button", "modal-close", "\u{00d7}")?;
    header.append_child(&icon)?;
    header.append_child(&title)?;
    header.append_child(&close)?;

    let body = create(doc, "div", "modal-body")?;
    let description = text_el(doc, "p", "badge-description", details.description)?;
    body.append_child(&description)?;
    let reqs = create(doc, "div", "badge-requirements")?;
    let heading = text_el(doc, "h4", "", "Requirements:")?;
    reqs.append_child(&heading)?;
    let list = create(doc, "ul", "")?;
    for req in details.requirements {
        let item = text_el(doc, "li", "", req)?;
        list.append_child(&item)?;
    }
    reqs.append_child(&list)?;
    body.append_child(&reqs)?;

    let stats = create(doc, "div", "badge-stats")?;
    for (label, value) in [("Earned Date:", details.earned.to_string()), ("XP Reward:", details.reward_text())] {
        let stat = create(doc, "div", "stat")?;
        let label = text_el(doc, "span", "stat-label", label)?;
        let value = text_el(doc, "span", "stat-value", &value)?;
        stat.append_child(&label)?;
        stat.append_child(&value)?;
        stats.append_child(&stat)?;
    }
    body.append_child(&stats)?;

    content.append_child(&header)?;
    content.append_child(&body)?;
    modal.append_child(&overlay)?;
    modal.append_child(&content)?;
    Ok((modal, content))
}

fn close_modal(modal: &HtmlElement) {
    if let Some(content) = query_in(modal, ".modal-content") {
        WebAnimator::forget(&content);
    }
    WebAnimator::new().play(modal, badge::modal_close_track());
    fx::remove_after(modal.clone(), (badge::MODAL_FADE * 1000.0) as u32);
}

fn show_modal(doc: &Document, badge: &HtmlElement, rng: &mut PhaseRng) -> Result<(), PageError> {
    let icon = query_in(badge, ".badge-icon").and_then(|n| n.text_content()).unwrap_or_default();
    let details = BadgeDetails::new(&badge_name(badge), &icon, rng);
    let (modal, content) = build_modal(doc, &details)?;
    doc.body().ok_or(PageError::NoDocument)?.append_child(&modal)?;

    for selector in [".modal-close", ".modal-overlay"] {
        if let Some(target) = query_in(&modal, selector) {
            let m = modal.clone();
            listen(&target, "click", move |_: MouseEvent| close_modal(&m))?;
        }
    }
    let mut animator = WebAnimator::new();
    animator.play(&modal, badge::modal_open_track());
    animator.play(&content, badge::modal_content_track());
    Ok(())
}

pub fn badges(doc: &Document) -> Result<(), PageError> {
    for item in query_all(doc, ".badge-item") {
        let (el, d) = (item.clone(), doc.clone());
        listen(&item, "mouseenter", move |_: MouseEvent| {
            if let Err(err) = show_tooltip(&d, &el) {
                log::debug!("tooltip: {err}");
            }
        })?;
        let el = item.clone();
        listen(&item, "mouseleave", move |_: MouseEvent| {
            if let Some(tip) = query_in(&el, ".badge-tooltip") {
                if let Some(text) = query_in(&tip, ".badge-tooltip-text") {
                    WebAnimator::forget(&text);
                }
                tip.remove();
            }
        })?;
    }

    for item in query_all(doc, ".badge-item.earned") {
        let el = item.clone();
        listen(&item, "mouseenter", move |_: MouseEvent| {
            WebAnimator::new().play(&el, hover_track(badge::earned_hover()));
            set_style(&el, "box-shadow", badge::HOVER_SHADOW);
        })?;
        let el = item.clone();
        listen(&item, "mouseleave", move |_: MouseEvent| {
            WebAnimator::new().play(&el, hover_track(badge::earned_rest()));
            set_style(&el, "box-shadow", "none");
        })?;
        let (el, d) = (item.clone(), doc.clone());
        let mut rng = PhaseRng::from_entropy();
        listen(&item, "click", move |_: MouseEvent| {
            if let Err(err) = show_modal(&d, &el, &mut rng) {
                log::warn!("badge modal: {err}");
            }
        })?;
    }
    Ok(())
}

fn hover_track(to: Pose) -> Track {
    Track::tween(None, to, Tween::new(0.3, Ease::Power2Out))
}

// --- streak calendar ---------------------------------------------------------

pub fn streak_calendar(doc: &Document, config: &PageConfig) -> Result<(), PageError> {
    let Some(calendar) = query(doc, ".streak-calendar") else { return Ok(()) };
    let today = chrono::Local::now().date_naive();
    for day in streak::build(today, config.current_streak, config.calendar_days) {
        let cell = text_el(doc, "div", &day.class_name(), &day.label())?;
        if day.active {
            let el = cell.clone();
            listen(&cell, "click", move |_: MouseEvent| {
                set_style(&el, "box-shadow", streak::GLOW_SHADOW);
                let el = el.clone();
                Timeout::new(streak::GLOW_MS, move || set_style(&el, "box-shadow", "")).forget();
                log::info!("{}", day.describe());
            })?;
        }
        calendar.append_child(&cell)?;
    }
    Ok(())
}

// --- mascot ------------------------------------------------------------------

pub fn mascot(doc: &Document, config: &PageConfig) -> Result<(), PageError> {
    let Some(image) = by_id(doc, "mascotImage") else { return Ok(()) };
    let mut cycler = FrameCycler::new(config.mascot_frames.clone());
    let fade_ms = config.mascot_fade_ms;
    let img = image.clone();
    Interval::new(config.mascot_frame_ms, move || {
        let Some(src) = cycler.advance().map(str::to_string) else { return };
        set_style(&img, "opacity", mascot::DIM_OPACITY);
        let img = img.clone();
        Timeout::new(fade_ms, move || {
            if let Some(frame) = img.dyn_ref::<HtmlImageElement>() {
                frame.set_src(&src);
            }
            set_style(&img, "opacity", "1");
        })
        .forget();
    })
    .forget();

    let img = image.clone();
    listen(&image, "mouseenter", move |_: MouseEvent| {
        set_style(&img, "animation", mascot::HOVER_ANIMATION);
        set_style(&img, "filter", mascot::HOVER_FILTER);
    })?;
    let img = image.clone();
    listen(&image, "mouseleave", move |_: MouseEvent| {
        set_style(&img, "animation", mascot::REST_ANIMATION);
        set_style(&img, "filter", mascot::REST_FILTER);
    })?;
    let img = image.clone();
    listen(&image, "click", move |_: MouseEvent| {
        set_style(&img, "transform", mascot::CLICK_TRANSFORM);
        let img = img.clone();
        Timeout::new(mascot::CLICK_RESET_MS, move || set_style(&img, "transform", mascot::CLICK_RESET)).forget();
    })
}

// --- XP bar and flame --------------------------------------------------------

pub fn xp_effects(doc: &Document) {
    for fill in query_all(doc, ".xp-fill") {
        let glow = fill.clone();
        Interval::new(page::XP_GLOW_EVERY_MS, move || {
            set_style(&glow, "filter", "brightness(1.2)");
            let glow = glow.clone();
            Timeout::new(page::XP_GLOW_MS, move || set_style(&glow, "filter", "brightness(1)")).forget();
        })
        .forget();

        let [wide, settled] = page::XP_SHIMMER;
        Interval::new(page::XP_SHIMMER_EVERY_MS, move || {
            set_style(&fill, "background", wide);
            let fill = fill.clone();
            Timeout::new(page::XP_SHIMMER_MS, move || set_style(&fill, "background", settled)).forget();
        })
        .forget();
    }
}

pub fn flame_hue(doc: &Document) {
    let Some(flame) = query(doc, ".streak-flame") else { return };
    let mut rng = PhaseRng::from_entropy();
    Interval::new(page::FLAME_HUE_EVERY_MS, move || set_style(&flame, "filter", &page::flame_hue(&mut rng))).forget();
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;
    use crate::web::dom::document;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn modal_lists_badge_details() {
        let doc = document().unwrap();
        let details = BadgeDetails::new("Math Wizard", "🧮", &mut PhaseRng::seeded(4));
        let (modal, content) = build_modal(&doc, &details).unwrap();
        assert!(modal.query_selector(".modal-overlay").unwrap().is_some());
        let title = content.query_selector(".modal-badge-title").unwrap().unwrap();
        assert_eq!(title.text_content().as_deref(), Some("Math Wizard"));
        assert_eq!(content.query_selector_all(".badge-requirements li").unwrap().length(), 3);
        let stats = content.query_selector_all(".stat-value").unwrap();
        assert_eq!(stats.length(), 2);
        assert_eq!(stats.get(1).and_then(|n| n.text_content()).as_deref(), Some("+50 XP"));
    }
}
