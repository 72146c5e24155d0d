//! Event binding.
//!
//! Translates DOM events into `UiEvent`s. Every listener is attached once at
//! startup and leaked with `forget()`, matching the page lifetime.

use crate::state;
use handy_core::UiEvent;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

const DRAG_EVENTS: [(&str, fn(Element) -> UiEvent<Element>); 6] = [
    ("dragstart", UiEvent::DragStart),
    ("dragover", UiEvent::DragOver),
    ("dragenter", UiEvent::DragEnter),
    ("dragleave", UiEvent::DragLeave),
    ("drop", UiEvent::Drop),
    ("dragend", UiEvent::DragEnd),
];

/// Attach `event` on `el`, dispatching `make(el)` and suppressing the default
/// action when the app asks for it.
fn listen(el: &Element, event: &str, make: fn(Element) -> UiEvent<Element>) -> Result<(), JsValue> {
    let target = el.clone();
    let cb = Closure::wrap(Box::new(move |e: web_sys::Event| {
        if state::dispatch(make(target.clone())).is_prevented() {
            e.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    el.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// Bind all UI event listeners. Call once after the app is installed.
pub fn bind_events() -> Result<(), JsValue> {
    let Some((nav, hobbies, moods, areas, save_id)) = state::with_app(|app| {
        (
            app.navigation().nav_items(),
            app.hobbies().items(),
            app.mood().options(),
            app.life_areas().map(|w| w.items()).unwrap_or_default(),
            app.config().save_button_id.clone(),
        )
    }) else {
        return Err(JsValue::from_str("handy app is not installed"));
    };

    // ── Navigation ──
    for item in &nav {
        listen(item, "click", UiEvent::NavClick)?;
    }

    // ── Selection widgets ──
    for item in &hobbies {
        listen(item, "click", UiEvent::HobbyClick)?;
    }
    for option in &moods {
        listen(option, "click", UiEvent::MoodClick)?;
    }

    // ── Life areas ──
    for item in &areas {
        for (event, make) in DRAG_EVENTS {
            listen(item, event, make)?;
        }
    }

    // ── Save ──
    if let Some(button) = gloo_utils::document().get_element_by_id(&save_id) {
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            state::dispatch(UiEvent::Save);
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }

    Ok(())
}
