//! Hobby tags and mood picker.

use crate::dom::Dom;
use std::collections::BTreeSet;
use tracing::debug;

/// Independent on/off items.
pub struct MultiSelect<D: Dom> {
    dom: D,
    item_selector: String,
    selected_class: String,
}

impl<D: Dom> MultiSelect<D> {
    pub fn new(dom: D, item_selector: &str, selected_class: &str) -> Self {
        Self {
            dom,
            item_selector: item_selector.to_owned(),
            selected_class: selected_class.to_owned(),
        }
    }

    pub fn items(&self) -> Vec<D::Node> {
        self.dom.query_all(&self.item_selector)
    }

    /// Flip `item`; returns its new state.
    pub fn toggle(&self, item: &D::Node) -> bool {
        let selected = !self.is_selected(item);
        self.dom.toggle_class(item, &self.selected_class, selected);
        debug!(label = %self.dom.label(item), selected, "toggled item");
        selected
    }

    pub fn is_selected(&self, item: &D::Node) -> bool {
        self.dom.has_class(item, &self.selected_class)
    }

    pub fn selected_labels(&self) -> BTreeSet<String> {
        self.items()
            .iter()
            .filter(|item| self.is_selected(item))
            .map(|item| self.dom.label(item))
            .collect()
    }

    /// Mark every item whose label is in `labels`. Items not listed keep
    /// their current state; labels with no matching item are ignored.
    pub fn mark(&self, labels: &BTreeSet<String>) {
        for item in self.items() {
            if labels.contains(&self.dom.label(&item)) {
                self.dom.add_class(&item, &self.selected_class);
            }
        }
    }
}

/// At most one selected option per group. A group is the set of options
/// sharing a parent element.
pub struct SingleSelect<D: Dom> {
    dom: D,
    option_selector: String,
    selected_class: String,
}

impl<D: Dom> SingleSelect<D> {
    pub fn new(dom: D, option_selector: &str, selected_class: &str) -> Self {
        Self {
            dom,
            option_selector: option_selector.to_owned(),
            selected_class: selected_class.to_owned(),
        }
    }

    pub fn options(&self) -> Vec<D::Node> {
        self.dom.query_all(&self.option_selector)
    }

    pub fn select(&self, option: &D::Node) {
        let group = self.dom.parent(option);
        for other in self.options() {
            if self.dom.parent(&other) == group {
                self.dom.remove_class(&other, &self.selected_class);
            }
        }
        self.dom.add_class(option, &self.selected_class);
        debug!(label = %self.dom.label(option), "selected option");
    }

    pub fn selected(&self) -> Vec<D::Node> {
        self.options()
            .into_iter()
            .filter(|option| self.dom.has_class(option, &self.selected_class))
            .collect()
    }
}
