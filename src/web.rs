//! Browser side: binds the page model to the live document.

mod animate;
mod dom;
mod fx;
mod interact;
mod storage;
mod widgets;

use std::cell::RefCell;

use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlElement};

pub use animate::{apply_pose, WebAnimator};
pub use dom::DomStage;
pub use storage::BrowserStore;

use crate::config::PageConfig;
use crate::counter::CounterAnimation;
use crate::error::PageError;
use crate::page;
use crate::rng::PhaseRng;
use crate::scroll::{Cue, Fired, Orchestrator};
use crate::stage::Stage;

struct PageState {
    stage: DomStage,
    animator: WebAnimator,
    orchestrator: Orchestrator<HtmlElement>,
    config: PageConfig,
}

thread_local! {
    static PAGE: RefCell<Option<PageState>> = const { RefCell::new(None) };
}

/// Attach `handler` for the lifetime of the page.
pub(crate) fn listen<E>(target: &EventTarget, event: &str, handler: impl FnMut(E) + 'static) -> Result<(), PageError>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn dispatch(stage: &DomStage, config: &PageConfig, fired: Vec<Fired<HtmlElement>>) {
    for Fired { node, cue, .. } in fired {
        match cue {
            Cue::Typewriter { text, speed_ms } => {
                if let Err(err) = fx::type_out(stage.document(), node, text, speed_ms) {
                    log::warn!("typewriter: {err}");
                }
            }
            Cue::Counter { target } => {
                let counter = CounterAnimation::new(target, config.counter_duration_ms, config.counter_frame_ms);
                fx::run_counter(node, counter, config.counter_frame_ms);
            }
        }
    }
}

fn on_scroll() {
    PAGE.with(|cell| {
        let mut page = cell.borrow_mut();
        let Some(st) = page.as_mut() else { return };
        // Navbar tint first; a moving navbar scrub overwrites it.
        widgets::tint_navbar(st.stage.document(), st.stage.viewport().scroll_y);
        let fired = st.orchestrator.update(&st.stage, &mut st.animator);
        dispatch(&st.stage, &st.config, fired);
    });
}

/// Wire every component once, in page order.
pub fn boot(config: PageConfig) -> Result<(), PageError> {
    if PAGE.with(|cell| cell.borrow().is_some()) {
        log::warn!("page runtime already started");
        return Ok(());
    }
    let stage = DomStage::new()?;
    let doc = stage.document().clone();
    let mut rng = PhaseRng::from_entropy();
    let mut animator = WebAnimator::new();

    widgets::navigation(&doc)?;
    widgets::hero_cta(&doc, &config)?;
    widgets::flame_hue(&doc);
    widgets::xp_effects(&doc);
    widgets::badges(&doc)?;
    widgets::streak_calendar(&doc, &config)?;
    fx::background_particles(&doc, config.background_particles, &mut rng)?;
    widgets::mobile_menu(&doc)?;

    let orchestrator = page::install(&stage, &mut animator, &config, &mut rng)?;
    interact::bind(&doc)?;
    widgets::language_selector(&doc)?;
    widgets::mascot(&doc, &config)?;

    PAGE.with(|cell| *cell.borrow_mut() = Some(PageState { stage, animator, orchestrator, config }));

    let window = dom::window()?;
    listen(&window, "scroll", |_: Event| on_scroll())?;
    listen(&window, "resize", |_: Event| on_scroll())?;
    on_scroll();
    log::info!("page runtime started");
    Ok(())
}

pub fn confetti() -> Result<(), PageError> {
    let doc = dom::document()?;
    let pieces = PAGE.with(|cell| cell.borrow().as_ref().map(|st| st.config.confetti_pieces));
    fx::confetti(&doc, pieces.unwrap_or(crate::effects::CONFETTI_PIECES), &mut PhaseRng::from_entropy());
    Ok(())
}

pub fn badge_unlock(badge: &HtmlElement) -> Result<(), PageError> {
    fx::badge_unlock(&dom::document()?, badge)
}

pub fn select_language(code: &str) -> Result<String, PageError> {
    widgets::change_language(code)
}
