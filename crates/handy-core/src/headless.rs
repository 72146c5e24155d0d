//! In-memory document.
//!
//! A small element tree implementing [`Dom`] so every widget can run without a
//! browser. Clones share the same tree.

use crate::dom::Dom;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Debug, Default)]
struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    value: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Default)]
struct Tree {
    elements: Vec<Element>,
}

impl Tree {
    fn get(&self, node: NodeId) -> &Element {
        &self.elements[node.0]
    }

    fn get_mut(&mut self, node: NodeId) -> &mut Element {
        &mut self.elements[node.0]
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.get_mut(node).parent.take() {
            self.get_mut(parent).children.retain(|child| *child != node);
        }
    }

    fn descendants(&self, root: NodeId, out: &mut Vec<NodeId>) {
        for child in &self.get(root).children {
            out.push(*child);
            self.descendants(*child, out);
        }
    }

    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        let el = self.get(node);
        if let Some(tag) = &selector.tag {
            if !el.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &selector.id {
            if el.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        selector
            .classes
            .iter()
            .all(|class| el.classes.iter().any(|c| c == class))
    }
}

#[derive(Debug, Default)]
struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Selector {
    fn parse(raw: &str) -> Self {
        let mut selector = Selector::default();
        let mut rest = raw.trim();
        let tag_end = rest.find(['.', '#']).unwrap_or(rest.len());
        if tag_end > 0 {
            selector.tag = Some(rest[..tag_end].to_owned());
        }
        rest = &rest[tag_end..];
        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['.', '#']).unwrap_or(body.len());
            let name = body[..end].to_owned();
            match marker {
                '#' => selector.id = Some(name),
                _ => selector.classes.push(name),
            }
            rest = &body[end..];
        }
        selector
    }
}

/// Declarative description of an element to append.
#[derive(Clone, Debug, Default)]
pub struct ElementSpec {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    text: String,
    value: Option<String>,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_owned());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_owned();
        self
    }

    /// Mark the element as a form field holding `value`.
    pub fn value(mut self, value: &str) -> Self {
        self.value = Some(value.to_owned());
        self
    }
}

#[derive(Clone, Debug)]
pub struct MemoryDom {
    tree: Rc<RefCell<Tree>>,
    scroll_resets: Rc<Cell<usize>>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// An empty document containing only a `body` root.
    pub fn new() -> Self {
        let body = Element {
            tag: "body".to_owned(),
            ..Element::default()
        };
        Self {
            tree: Rc::new(RefCell::new(Tree {
                elements: vec![body],
            })),
            scroll_resets: Rc::new(Cell::new(0)),
        }
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    pub fn append(&self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let mut tree = self.tree.borrow_mut();
        let node = NodeId(tree.elements.len());
        tree.elements.push(Element {
            tag: spec.tag,
            id: spec.id,
            classes: spec.classes,
            attributes: spec.attributes.into_iter().collect(),
            styles: BTreeMap::new(),
            text: spec.text,
            value: spec.value,
            parent: Some(parent),
            children: Vec::new(),
        });
        tree.get_mut(parent).children.push(node);
        node
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.tree.borrow().get(node).styles.get(property).cloned()
    }

    /// Number of times `scroll_to_top` has been called.
    pub fn scroll_resets(&self) -> usize {
        self.scroll_resets.get()
    }

    /// Detach `node` from the document entirely.
    pub fn remove(&self, node: NodeId) {
        self.tree.borrow_mut().detach(node);
    }

    fn query_from(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        let selector = Selector::parse(selector);
        let mut all = Vec::new();
        tree.descendants(root, &mut all);
        all.into_iter()
            .filter(|node| tree.matches(*node, &selector))
            .collect()
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.query_from(self.body(), selector)
    }

    fn query_all_within(&self, root: &NodeId, selector: &str) -> Vec<NodeId> {
        self.query_from(*root, selector)
    }

    fn by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.tree.borrow();
        let mut all = Vec::new();
        tree.descendants(self.body(), &mut all);
        all.into_iter()
            .find(|node| tree.get(*node).id.as_deref() == Some(id))
    }

    fn element_id(&self, node: &NodeId) -> Option<String> {
        self.tree.borrow().get(*node).id.clone()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.tree.borrow().get(*node).attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.tree
            .borrow_mut()
            .get_mut(*node)
            .attributes
            .insert(name.to_owned(), value.to_owned());
    }

    fn text(&self, node: &NodeId) -> String {
        self.tree.borrow().get(*node).text.clone()
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.tree.borrow().get(*node).classes.iter().any(|c| c == class)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        let mut tree = self.tree.borrow_mut();
        let classes = &mut tree.get_mut(*node).classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.tree
            .borrow_mut()
            .get_mut(*node)
            .classes
            .retain(|c| c != class);
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        let mut tree = self.tree.borrow_mut();
        let styles = &mut tree.get_mut(*node).styles;
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_owned(), value.to_owned());
        }
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.tree.borrow().get(*node).parent
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.tree.borrow().get(*node).children.clone()
    }

    fn next_sibling(&self, node: &NodeId) -> Option<NodeId> {
        let tree = self.tree.borrow();
        let parent = tree.get(*node).parent?;
        let siblings = &tree.get(parent).children;
        let index = siblings.iter().position(|child| child == node)?;
        siblings.get(index + 1).copied()
    }

    fn insert_before(&self, parent: &NodeId, node: &NodeId, reference: Option<&NodeId>) {
        let mut tree = self.tree.borrow_mut();
        tree.detach(*node);
        let children = &mut tree.get_mut(*parent).children;
        let index = reference
            .and_then(|r| children.iter().position(|child| child == r))
            .unwrap_or(children.len());
        children.insert(index, *node);
        tree.get_mut(*node).parent = Some(*parent);
    }

    fn value(&self, node: &NodeId) -> Option<String> {
        self.tree.borrow().get(*node).value.clone()
    }

    fn set_value(&self, node: &NodeId, value: &str) {
        let mut tree = self.tree.borrow_mut();
        let el = tree.get_mut(*node);
        if el.value.is_some() {
            el.value = Some(value.to_owned());
        }
    }

    fn scroll_to_top(&self) {
        self.scroll_resets.set(self.scroll_resets.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_matches_compound_selectors_in_document_order() {
        let dom = MemoryDom::new();
        let list = dom.append(dom.body(), ElementSpec::new("div").id("list"));
        let a = dom.append(list, ElementSpec::new("div").class("item").class("selected"));
        let b = dom.append(list, ElementSpec::new("div").class("item"));
        let nested = dom.append(b, ElementSpec::new("span").class("item"));

        assert_eq!(dom.query_all(".item"), vec![a, b, nested]);
        assert_eq!(dom.query_all(".item.selected"), vec![a]);
        assert_eq!(dom.query_all("span.item"), vec![nested]);
        assert_eq!(dom.query_all("#list"), vec![list]);
        assert_eq!(dom.query_all_within(&b, ".item"), vec![nested]);
    }

    #[test]
    fn insert_before_moves_without_duplicating() {
        let dom = MemoryDom::new();
        let list = dom.body();
        let a = dom.append(list, ElementSpec::new("li"));
        let b = dom.append(list, ElementSpec::new("li"));
        let c = dom.append(list, ElementSpec::new("li"));

        dom.insert_before(&list, &a, Some(&c));
        assert_eq!(dom.children(&list), vec![b, a, c]);

        dom.insert_before(&list, &b, None);
        assert_eq!(dom.children(&list), vec![a, c, b]);
        assert_eq!(dom.next_sibling(&c), Some(b));
        assert_eq!(dom.next_sibling(&b), None);
    }

    #[test]
    fn empty_style_value_clears_property() {
        let dom = MemoryDom::new();
        let el = dom.append(dom.body(), ElementSpec::new("div"));
        dom.set_style(&el, "opacity", "0.5");
        assert_eq!(dom.style(el, "opacity").as_deref(), Some("0.5"));
        dom.set_style(&el, "opacity", "");
        assert_eq!(dom.style(el, "opacity"), None);
    }

    #[test]
    fn set_value_only_applies_to_form_fields() {
        let dom = MemoryDom::new();
        let input = dom.append(dom.body(), ElementSpec::new("input").id("name").value(""));
        let div = dom.append(dom.body(), ElementSpec::new("div"));

        dom.set_value(&input, "Ada");
        dom.set_value(&div, "ignored");

        assert_eq!(dom.value(&input).as_deref(), Some("Ada"));
        assert_eq!(dom.value(&div), None);
    }

    #[test]
    fn removed_nodes_are_not_found() {
        let dom = MemoryDom::new();
        let page = dom.append(dom.body(), ElementSpec::new("section").id("home-page"));
        dom.remove(page);
        assert_eq!(dom.by_id("home-page"), None);
    }
}
