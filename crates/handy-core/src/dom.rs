//! Document access.
//!
//! The subset of DOM primitives the widgets need. `handy-wasm` implements it
//! over `web_sys::Element`; [`crate::headless::MemoryDom`] implements it over
//! an in-memory tree.
//!
//! Selectors passed to `query_all*` are compound class/id selectors such as
//! `.hobby-item` or `.hobby-item.selected`.

use std::fmt;

/// Whether the host must suppress the platform's default handling of the
/// event that was just dispatched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefaultAction {
    Allow,
    Prevent,
}

impl DefaultAction {
    pub fn is_prevented(self) -> bool {
        self == DefaultAction::Prevent
    }
}

pub trait Dom: Clone + 'static {
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// Descendants of `root` matching `selector`, in document order.
    fn query_all_within(&self, root: &Self::Node, selector: &str) -> Vec<Self::Node>;

    fn by_id(&self, id: &str) -> Option<Self::Node>;

    /// The element's `id`, `None` when it has none.
    fn element_id(&self, node: &Self::Node) -> Option<String>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    fn text(&self, node: &Self::Node) -> String;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn add_class(&self, node: &Self::Node, class: &str);

    fn remove_class(&self, node: &Self::Node, class: &str);

    /// Set an inline style property. An empty `value` clears it.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Element children of `node`, in order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Move `node` under `parent`, immediately before `reference`, or at the
    /// end when `reference` is `None`. `node` is detached from its current
    /// position first, so it is never present twice.
    fn insert_before(&self, parent: &Self::Node, node: &Self::Node, reference: Option<&Self::Node>);

    /// Current value of a form field, `None` if `node` is not one.
    fn value(&self, node: &Self::Node) -> Option<String>;

    fn set_value(&self, node: &Self::Node, value: &str);

    fn scroll_to_top(&self);

    fn toggle_class(&self, node: &Self::Node, class: &str, force: bool) {
        if force {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    /// Text content with surrounding whitespace removed.
    fn label(&self, node: &Self::Node) -> String {
        self.text(node).trim().to_owned()
    }
}
