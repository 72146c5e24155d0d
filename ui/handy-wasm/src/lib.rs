//! Handy WASM front-end.
//!
//! Binds `handy-core` to the live page: `WebDom` for the document,
//! `localStorage` for the profile, zero-delay timeouts for deferred work and
//! `alert` for acknowledgments.

pub mod dom;
pub mod events;
pub mod host;
pub mod state;

use handy_core::HandyApp;
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init()
}

/// Startup sequence: build components, attach listeners, then apply the
/// stored profile.
fn init() -> Result<(), JsValue> {
    host::apply_mobile_class();

    let app = HandyApp::new(
        host::read_config(),
        dom::WebDom,
        state::BrowserStore,
        host::TimeoutScheduler,
        host::AlertNotifier,
    );
    state::install(app);

    events::bind_events()?;

    state::with_app(|app| app.load());
    Ok(())
}

/// `navigateTo(page)` for inline `onclick` handlers in markup.
#[wasm_bindgen(js_name = navigateTo)]
pub fn navigate_to(page: &str) {
    state::with_app(|app| app.navigate_to(page));
}

/// `saveProfile()` for inline `onclick` handlers in markup. A storage
/// failure is thrown to the caller.
#[wasm_bindgen(js_name = saveProfile)]
pub fn save_profile() -> Result<(), JsValue> {
    match state::with_app(|app| app.save().map(|_| ())) {
        Some(result) => result.map_err(|err| JsValue::from_str(&err.to_string())),
        None => Err(JsValue::from_str("handy app is not installed")),
    }
}
