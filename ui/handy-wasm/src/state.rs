//! Application state.
//!
//! The single `HandyApp` lives in a `RefCell`-wrapped `thread_local!`
//! (WASM is single-threaded). Event closures reach it through [`dispatch`].

use crate::dom::WebDom;
use crate::host::{AlertNotifier, TimeoutScheduler};
use handy_core::{DefaultAction, HandyApp, KeyValueStore, StorageError, UiEvent};
use std::cell::RefCell;
use web_sys::Element;

pub type WebApp = HandyApp<WebDom, BrowserStore, TimeoutScheduler, AlertNotifier>;

// ── localStorage ──

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// `window.localStorage`. A browser without storage reads as empty and
/// rejects writes.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::WriteRejected {
                key: key.to_owned(),
                reason: format!("{e:?}"),
            })
    }
}

// ── Thread-local singleton ──

thread_local! {
    static APP: RefCell<Option<WebApp>> = const { RefCell::new(None) };
}

pub fn install(app: WebApp) {
    APP.with(|slot| *slot.borrow_mut() = Some(app));
}

/// Run `f` against the installed app. `None` before `install` or when the
/// app is already borrowed further up the stack.
pub fn with_app<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut WebApp) -> R,
{
    APP.with(|slot| {
        let Ok(mut guard) = slot.try_borrow_mut() else {
            gloo_console::warn!("handy: app is busy, event dropped");
            return None;
        };
        guard.as_mut().map(f)
    })
}

/// Feed one DOM event to the app. A failed save is rethrown to the page
/// once the app borrow has been released.
pub fn dispatch(event: UiEvent<Element>) -> DefaultAction {
    match with_app(|app| app.dispatch(event)) {
        Some(Ok(action)) => action,
        Some(Err(err)) => wasm_bindgen::throw_str(&err.to_string()),
        None => DefaultAction::Allow,
    }
}
