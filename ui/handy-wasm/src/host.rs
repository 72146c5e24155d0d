//! Browser-backed collaborators: timers, alerts, viewport and page config.

use gloo_timers::callback::Timeout;
use gloo_utils::{document, window};
use handy_core::schedule::Task;
use handy_core::{AppConfig, Notifier, Scheduler};

const CONFIG_ELEMENT_ID: &str = "handy-config";
const MOBILE_MAX_WIDTH: f64 = 768.0;

/// Runs deferred tasks on the next event-loop turn (zero-delay timeout).
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn defer(&self, task: Task) {
        Timeout::new(0, task).forget();
    }
}

/// `window.alert`, blocking until dismissed.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn acknowledge(&self, message: &str) {
        let _ = window().alert_with_message(message);
    }
}

pub fn is_mobile_device() -> bool {
    window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .is_some_and(|w| w <= MOBILE_MAX_WIDTH)
}

/// Tag `<body>` with `mobile` on narrow viewports.
pub fn apply_mobile_class() {
    if !is_mobile_device() {
        return;
    }
    if let Some(body) = document().body() {
        let _ = body.class_list().add_1("mobile");
    }
}

/// Read the optional `<script type="application/json" id="handy-config">`
/// override. Anything unreadable falls back to the defaults.
pub fn read_config() -> AppConfig {
    let Some(raw) = document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return AppConfig::default();
    };
    match AppConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            gloo_console::warn!(format!("handy: {err}; using defaults"));
            AppConfig::default()
        }
    }
}
