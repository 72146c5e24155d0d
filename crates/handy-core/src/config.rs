//! Application configuration.
//!
//! Every selector, class name and constant the widgets rely on. The defaults
//! match the shipped `web/index.html`; a host may override any subset from a
//! JSON object.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid app configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub page_selector: String,
    pub page_id_suffix: String,
    pub nav_item_selector: String,
    pub nav_page_attribute: String,
    pub active_class: String,

    pub hobby_selector: String,
    pub mood_selector: String,
    pub selected_class: String,

    pub life_areas_id: String,
    pub sortable_selector: String,
    pub dragging_opacity: String,
    pub insertion_cue: String,

    pub name_field_id: String,
    pub job_field_id: String,
    pub save_button_id: String,

    pub storage_key: String,
    pub follow_up_page: String,
    pub saved_message: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_selector: ".page".to_owned(),
            page_id_suffix: "-page".to_owned(),
            nav_item_selector: ".nav-item".to_owned(),
            nav_page_attribute: "data-page".to_owned(),
            active_class: "active".to_owned(),

            hobby_selector: ".hobby-item".to_owned(),
            mood_selector: ".mood-option".to_owned(),
            selected_class: "selected".to_owned(),

            life_areas_id: "life-areas".to_owned(),
            sortable_selector: ".sortable-item".to_owned(),
            dragging_opacity: "0.5".to_owned(),
            insertion_cue: "2px solid #2E86AB".to_owned(),

            name_field_id: "name".to_owned(),
            job_field_id: "job".to_owned(),
            save_button_id: "save-profile".to_owned(),

            storage_key: crate::storage::PROFILE_KEY.to_owned(),
            follow_up_page: "goals".to_owned(),
            saved_message: "Profile saved successfully!".to_owned(),
        }
    }
}

impl AppConfig {
    /// Parse a (possibly partial) JSON override; missing keys keep defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }
}
