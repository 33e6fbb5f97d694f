//! LearnQuest page runtime.
//!
//! Everything that decides *what* moves lives in plain modules (`motion`,
//! `scroll`, `page`, `intro`, ...) and runs against the [`stage::Stage`] and
//! [`stage::Animator`] seams, so it is tested on the host with the doubles in
//! [`fake`]. The `web` module binds those seams to the document and owns the
//! event listeners, timers and the animation frame loop.

use wasm_bindgen::prelude::*;

pub mod badge;
pub mod config;
pub mod counter;
pub mod effects;
pub mod error;
pub mod fake;
pub mod hover;
pub mod intro;
pub mod locale;
pub mod mascot;
pub mod motion;
pub mod nav;
pub mod page;
pub mod rng;
pub mod scroll;
pub mod stage;
pub mod streak;
pub mod typewriter;
pub mod web;

pub use config::PageConfig;
pub use error::PageError;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Trace).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

/// Wire the page with default settings.
#[wasm_bindgen]
pub fn start_page() -> Result<(), JsValue> {
    web::boot(PageConfig::default())?;
    Ok(())
}

/// Wire the page with a JSON [`PageConfig`]; missing fields keep their defaults.
#[wasm_bindgen]
pub fn start_page_with_config(json: &str) -> Result<(), JsValue> {
    let config = PageConfig::from_json(json)?;
    log::set_max_level(config.level().to_level_filter());
    web::boot(config)?;
    Ok(())
}

#[wasm_bindgen]
pub fn create_confetti() -> Result<(), JsValue> {
    web::confetti()?;
    Ok(())
}

#[wasm_bindgen]
pub fn animate_badge_unlock(element: web_sys::HtmlElement) -> Result<(), JsValue> {
    web::badge_unlock(&element)?;
    Ok(())
}

/// Switch language and persist it; returns the code in effect.
#[wasm_bindgen]
pub fn select_language(code: &str) -> Result<String, JsValue> {
    Ok(web::select_language(code)?)
}

/// Milliseconds from the page's time origin; 0 off the browser.
pub(crate) fn performance_now() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        0.0
    }
}
