//! Browser document.
//!
//! `WebDom` is the `handy-core` [`Dom`] over live `web_sys::Element`s. DOM
//! calls that can only fail on malformed input (bad selector, illegal
//! insertion) are treated as no-ops, the same way a missing element is.

use gloo_utils::{document, window};
use handy_core::Dom;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlCollection, HtmlElement, HtmlInputElement, HtmlTextAreaElement, Node, NodeList,
};

// ── Helpers ──

fn elements(list: NodeList) -> Vec<Element> {
    let mut v = Vec::new();
    for i in 0..list.length() {
        if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            v.push(el);
        }
    }
    v
}

fn collection(list: HtmlCollection) -> Vec<Element> {
    (0..list.length()).filter_map(|i| list.item(i)).collect()
}

#[derive(Clone, Copy, Debug, Default)]
pub struct WebDom;

impl Dom for WebDom {
    type Node = Element;

    fn query_all(&self, selector: &str) -> Vec<Element> {
        document()
            .query_selector_all(selector)
            .map(elements)
            .unwrap_or_default()
    }

    fn query_all_within(&self, root: &Element, selector: &str) -> Vec<Element> {
        root.query_selector_all(selector)
            .map(elements)
            .unwrap_or_default()
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        document().get_element_by_id(id)
    }

    fn element_id(&self, node: &Element) -> Option<String> {
        let id = node.id();
        (!id.is_empty()).then_some(id)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn toggle_class(&self, node: &Element, class: &str, force: bool) {
        let _ = node.class_list().toggle_with_force(class, force);
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let Some(html) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = html.style();
        if value.is_empty() {
            let _ = style.remove_property(property);
        } else {
            let _ = style.set_property(property, value);
        }
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        collection(node.children())
    }

    fn next_sibling(&self, node: &Element) -> Option<Element> {
        node.next_element_sibling()
    }

    fn insert_before(&self, parent: &Element, node: &Element, reference: Option<&Element>) {
        let _ = parent.insert_before(node, reference.map(AsRef::<Node>::as_ref));
    }

    fn value(&self, node: &Element) -> Option<String> {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            Some(input.value())
        } else {
            node.dyn_ref::<HtmlTextAreaElement>().map(HtmlTextAreaElement::value)
        }
    }

    fn set_value(&self, node: &Element, value: &str) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn scroll_to_top(&self) {
        window().scroll_to_with_x_and_y(0.0, 0.0);
    }
}
