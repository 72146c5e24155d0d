//! Page navigation.
//!
//! Pages are elements matching the page selector whose id is
//! `<page><suffix>`; navigation items carry the page name in an attribute.
//! Exactly one page (or none, for an unknown name) is active at a time.

use crate::config::AppConfig;
use crate::dom::Dom;
use tracing::debug;

pub struct NavigationController<D: Dom> {
    dom: D,
    page_selector: String,
    page_id_suffix: String,
    nav_item_selector: String,
    nav_page_attribute: String,
    active_class: String,
    active_page: Option<String>,
}

impl<D: Dom> NavigationController<D> {
    /// Build the controller, taking the initially active page from markup.
    pub fn new(dom: D, config: &AppConfig) -> Self {
        let mut controller = Self {
            dom,
            page_selector: config.page_selector.clone(),
            page_id_suffix: config.page_id_suffix.clone(),
            nav_item_selector: config.nav_item_selector.clone(),
            nav_page_attribute: config.nav_page_attribute.clone(),
            active_class: config.active_class.clone(),
            active_page: None,
        };
        controller.active_page = controller.page_marked_active();
        controller
    }

    pub fn active_page(&self) -> Option<&str> {
        self.active_page.as_deref()
    }

    /// Page name carried by a navigation item.
    pub fn page_of(&self, nav_item: &D::Node) -> Option<String> {
        self.dom.attribute(nav_item, &self.nav_page_attribute)
    }

    pub fn nav_items(&self) -> Vec<D::Node> {
        self.dom.query_all(&self.nav_item_selector)
    }

    /// Show `page` and hide every other page. Returns whether a page with
    /// that name exists; an unknown name leaves every page hidden.
    pub fn navigate_to(&mut self, page: &str) -> bool {
        for el in self.dom.query_all(&self.page_selector) {
            self.dom.remove_class(&el, &self.active_class);
        }

        let target = self.dom.by_id(&format!("{page}{}", self.page_id_suffix));
        if let Some(el) = &target {
            self.dom.add_class(el, &self.active_class);
        }

        for item in self.nav_items() {
            let current = self.page_of(&item).as_deref() == Some(page);
            self.dom.toggle_class(&item, &self.active_class, current);
        }

        self.dom.scroll_to_top();

        self.active_page = target.is_some().then(|| page.to_owned());
        debug!(page, found = target.is_some(), "navigated");
        target.is_some()
    }

    fn page_marked_active(&self) -> Option<String> {
        self.dom
            .query_all(&self.page_selector)
            .into_iter()
            .find(|el| self.dom.has_class(el, &self.active_class))
            .and_then(|el| self.dom.element_id(&el))
            .and_then(|id| id.strip_suffix(&self.page_id_suffix).map(str::to_owned))
    }
}
