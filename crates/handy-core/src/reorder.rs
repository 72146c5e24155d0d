//! Drag-and-drop list reordering.
//!
//! One widget owns one container. The container's element order is the list
//! order; nothing else is cached. A gesture runs
//! `drag_start → (drag_over | drag_enter | drag_leave)* → drop? → drag_end`,
//! and `drop` is the only place sibling order changes.

use crate::config::AppConfig;
use crate::dom::{DefaultAction, Dom};
use crate::schedule::Scheduler;
use tracing::debug;

const OPACITY: &str = "opacity";
const BORDER_TOP: &str = "border-top";

/// What a drop did to the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// The dragged item moved from index `from` to index `to`.
    Moved { from: usize, to: usize },
    /// Dropped onto itself.
    SameItem,
    /// Target and dragged item live under different parents.
    ForeignContainer,
    /// Nothing of ours is being dragged.
    NoDrag,
}

/// Where the dragged item lands relative to the drop target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    After,
    Before,
}

/// Items dragged downward land after the target, items dragged upward land
/// before it.
pub fn placement(dragged_index: usize, target_index: usize) -> Placement {
    if dragged_index < target_index {
        Placement::After
    } else {
        Placement::Before
    }
}

pub struct ReorderWidget<D: Dom> {
    dom: D,
    container: D::Node,
    item_selector: String,
    dragging_opacity: String,
    insertion_cue: String,
    dragged: Option<D::Node>,
}

impl<D: Dom> ReorderWidget<D> {
    /// Take over `container`, marking each of its items draggable.
    pub fn attach(dom: D, container: D::Node, config: &AppConfig) -> Self {
        let widget = Self {
            dom,
            container,
            item_selector: config.sortable_selector.clone(),
            dragging_opacity: config.dragging_opacity.clone(),
            insertion_cue: config.insertion_cue.clone(),
            dragged: None,
        };
        for item in widget.items() {
            widget.dom.set_attribute(&item, "draggable", "true");
        }
        debug!(items = widget.items().len(), "reorder widget attached");
        widget
    }

    pub fn container(&self) -> &D::Node {
        &self.container
    }

    /// Items in their current order.
    pub fn items(&self) -> Vec<D::Node> {
        self.dom.query_all_within(&self.container, &self.item_selector)
    }

    /// Item labels in their current order.
    pub fn labels(&self) -> Vec<String> {
        self.items().iter().map(|item| self.dom.label(item)).collect()
    }

    pub fn dragged(&self) -> Option<&D::Node> {
        self.dragged.as_ref()
    }

    /// The item stays fully opaque until the next tick so the drag image is
    /// captured from the unfaded element.
    pub fn drag_start(&mut self, item: &D::Node, scheduler: &impl Scheduler) {
        self.dragged = Some(item.clone());
        let dom = self.dom.clone();
        let item = item.clone();
        let opacity = self.dragging_opacity.clone();
        scheduler.defer(Box::new(move || dom.set_style(&item, OPACITY, &opacity)));
        debug!("drag started");
    }

    /// Every item accepts drops.
    pub fn drag_over(&self, _target: &D::Node) -> DefaultAction {
        DefaultAction::Prevent
    }

    pub fn drag_enter(&self, target: &D::Node) -> DefaultAction {
        if self.dragged.as_ref() != Some(target) {
            self.dom.set_style(target, BORDER_TOP, &self.insertion_cue);
        }
        DefaultAction::Prevent
    }

    pub fn drag_leave(&self, target: &D::Node) {
        self.clear_cue(target);
    }

    pub fn drop(&mut self, target: &D::Node) -> DropOutcome {
        let outcome = self.reposition(target);
        self.clear_cue(target);
        debug!(?outcome, "drop");
        outcome
    }

    /// Fires whether or not a drop happened.
    pub fn drag_end(&mut self, item: &D::Node) {
        self.dom.set_style(item, OPACITY, "1");
        self.dragged = None;
        debug!("drag ended");
    }

    fn reposition(&self, target: &D::Node) -> DropOutcome {
        let Some(dragged) = self.dragged.as_ref() else {
            return DropOutcome::NoDrag;
        };
        if dragged == target {
            return DropOutcome::SameItem;
        }
        let Some(parent) = self.dom.parent(target) else {
            return DropOutcome::ForeignContainer;
        };
        if self.dom.parent(dragged).as_ref() != Some(&parent) {
            return DropOutcome::ForeignContainer;
        }

        let children = self.dom.children(&parent);
        let (Some(from), Some(target_index)) = (
            children.iter().position(|child| child == dragged),
            children.iter().position(|child| child == target),
        ) else {
            return DropOutcome::ForeignContainer;
        };

        match placement(from, target_index) {
            Placement::After => {
                let next = self.dom.next_sibling(target);
                self.dom.insert_before(&parent, dragged, next.as_ref());
            }
            Placement::Before => self.dom.insert_before(&parent, dragged, Some(target)),
        }

        let to = self
            .dom
            .children(&parent)
            .iter()
            .position(|child| child == dragged)
            .unwrap_or(from);
        DropOutcome::Moved { from, to }
    }

    fn clear_cue(&self, target: &D::Node) {
        self.dom.set_style(target, BORDER_TOP, "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{ElementSpec, MemoryDom, NodeId};
    use crate::schedule::TickQueue;

    fn list(dom: &MemoryDom, id: &str, labels: &[&str]) -> (NodeId, Vec<NodeId>) {
        let container = dom.append(dom.body(), ElementSpec::new("div").id(id));
        let items = labels
            .iter()
            .map(|label| {
                dom.append(
                    container,
                    ElementSpec::new("div").class("sortable-item").text(label),
                )
            })
            .collect();
        (container, items)
    }

    fn widget(dom: &MemoryDom, labels: &[&str]) -> (ReorderWidget<MemoryDom>, Vec<NodeId>) {
        let (container, items) = list(dom, "life-areas", labels);
        (ReorderWidget::attach(dom.clone(), container, &AppConfig::default()), items)
    }

    fn drag(
        w: &mut ReorderWidget<MemoryDom>,
        ticks: &TickQueue,
        from: NodeId,
        onto: NodeId,
    ) -> DropOutcome {
        w.drag_start(&from, ticks);
        ticks.run_pending();
        w.drag_over(&onto);
        w.drag_enter(&onto);
        let outcome = w.drop(&onto);
        w.drag_end(&from);
        outcome
    }

    #[test]
    fn placement_depends_on_direction() {
        assert_eq!(placement(0, 2), Placement::After);
        assert_eq!(placement(3, 1), Placement::Before);
        assert_eq!(placement(1, 1), Placement::Before);
    }

    #[test]
    fn attach_marks_items_draggable() {
        let dom = MemoryDom::new();
        let (_w, items) = widget(&dom, &["A", "B"]);
        for item in items {
            assert_eq!(dom.attribute(&item, "draggable").as_deref(), Some("true"));
        }
    }

    #[test]
    fn dragging_down_lands_after_target() {
        let dom = MemoryDom::new();
        let ticks = TickQueue::new();
        let (mut w, items) = widget(&dom, &["A", "B", "C", "D"]);

        let outcome = drag(&mut w, &ticks, items[0], items[2]);

        assert_eq!(outcome, DropOutcome::Moved { from: 0, to: 2 });
        assert_eq!(w.labels(), vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn dragging_up_lands_before_target() {
        let dom = MemoryDom::new();
        let ticks = TickQueue::new();
        let (mut w, items) = widget(&dom, &["A", "B", "C", "D"]);

        let outcome = drag(&mut w, &ticks, items[3], items[1]);

        assert_eq!(outcome, DropOutcome::Moved { from: 3, to: 1 });
        assert_eq!(w.labels(), vec!["A", "D", "B", "C"]);
    }

    #[test]
    fn dragging_onto_last_item_appends() {
        let dom = MemoryDom::new();
        let ticks = TickQueue::new();
        let (mut w, items) = widget(&dom, &["A", "B", "C"]);

        drag(&mut w, &ticks, items[0], items[2]);
        assert_eq!(w.labels(), vec!["B", "C", "A"]);
    }

    #[test]
    fn every_pair_moves_exactly_one_item() {
        let labels = ["A", "B", "C", "D", "E"];
        for i in 0..labels.len() {
            for j in 0..labels.len() {
                if i == j {
                    continue;
                }
                let dom = MemoryDom::new();
                let ticks = TickQueue::new();
                let (mut w, items) = widget(&dom, &labels);

                drag(&mut w, &ticks, items[i], items[j]);
                let after = w.labels();

                let mut expected: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
                let moved = expected.remove(i);
                let target_pos = expected.iter().position(|l| l == labels[j]).unwrap();
                let insert_at = if i < j { target_pos + 1 } else { target_pos };
                expected.insert(insert_at, moved);

                assert_eq!(after, expected, "drag {i} onto {j}");
            }
        }
    }

    #[test]
    fn drop_on_self_is_a_no_op() {
        let dom = MemoryDom::new();
        let ticks = TickQueue::new();
        let (mut w, items) = widget(&dom, &["A", "B", "C"]);

        assert_eq!(drag(&mut w, &ticks, items[1], items[1]), DropOutcome::SameItem);
        assert_eq!(w.labels(), vec!["A", "B", "C"]);
    }

    #[test]
    fn drop_without_drag_is_a_no_op() {
        let dom = MemoryDom::new();
        let (mut w, items) = widget(&dom, &["A", "B"]);
        dom.set_style(&items[0], "border-top", "2px solid #2E86AB");

        assert_eq!(w.drop(&items[0]), DropOutcome::NoDrag);
        assert_eq!(w.labels(), vec!["A", "B"]);
        assert_eq!(dom.style(items[0], "border-top"), None);
    }

    #[test]
    fn drop_into_other_container_is_a_no_op() {
        let dom = MemoryDom::new();
        let ticks = TickQueue::new();
        let (mut w, items) = widget(&dom, &["A", "B"]);
        let (_, others) = list(&dom, "elsewhere", &["X", "Y"]);

        assert_eq!(drag(&mut w, &ticks, items[0], others[1]), DropOutcome::ForeignContainer);
        assert_eq!(w.labels(), vec!["A", "B"]);
        assert_eq!(dom.style(others[1], "border-top"), None);
    }

    #[test]
    fn opacity_fades_on_next_tick_and_restores_on_end() {
        let dom = MemoryDom::new();
        let ticks = TickQueue::new();
        let (mut w, items) = widget(&dom, &["A", "B"]);

        w.drag_start(&items[0], &ticks);
        assert_eq!(w.dragged(), Some(&items[0]));
        assert_eq!(dom.style(items[0], "opacity"), None);

        ticks.run_pending();
        assert_eq!(dom.style(items[0], "opacity").as_deref(), Some("0.5"));

        w.drag_end(&items[0]);
        assert_eq!(dom.style(items[0], "opacity").as_deref(), Some("1"));
        assert_eq!(w.dragged(), None);
    }

    #[test]
    fn late_fade_after_abort_is_harmless() {
        let dom = MemoryDom::new();
        let ticks = TickQueue::new();
        let (mut w, items) = widget(&dom, &["A", "B"]);

        w.drag_start(&items[0], &ticks);
        w.drag_end(&items[0]);
        ticks.run_pending();

        assert_eq!(w.dragged(), None);
        assert_eq!(w.labels(), vec!["A", "B"]);
    }

    #[test]
    fn insertion_cue_follows_enter_and_leave() {
        let dom = MemoryDom::new();
        let ticks = TickQueue::new();
        let (mut w, items) = widget(&dom, &["A", "B", "C"]);
        w.drag_start(&items[0], &ticks);

        assert_eq!(w.drag_enter(&items[0]), DefaultAction::Prevent);
        assert_eq!(dom.style(items[0], "border-top"), None);

        w.drag_enter(&items[1]);
        w.drag_enter(&items[2]);
        assert_eq!(dom.style(items[1], "border-top").as_deref(), Some("2px solid #2E86AB"));
        assert_eq!(dom.style(items[2], "border-top").as_deref(), Some("2px solid #2E86AB"));

        w.drag_leave(&items[1]);
        assert_eq!(dom.style(items[1], "border-top"), None);

        w.drop(&items[2]);
        assert_eq!(dom.style(items[2], "border-top"), None);
        assert_eq!(w.drag_over(&items[2]), DefaultAction::Prevent);
    }

    #[test]
    fn indices_come_from_live_order() {
        let dom = MemoryDom::new();
        let ticks = TickQueue::new();
        let (mut w, items) = widget(&dom, &["A", "B", "C", "D"]);

        // Unrelated code moves D to the front between gestures.
        dom.insert_before(w.container(), &items[3], Some(&items[0]));
        assert_eq!(w.labels(), vec!["D", "A", "B", "C"]);

        drag(&mut w, &ticks, items[3], items[1]);
        assert_eq!(w.labels(), vec!["A", "B", "D", "C"]);
    }
}
