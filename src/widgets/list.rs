//! Vertical list - selectable items stacked in a flow.
//!
//! ```text
//! VerticalList (component, outer size)
//! └── Justified (center, center)
//!     └── VerticalFlow (inner size)
//!         ├── ListItem ── Rect (background) + Justified(start, center) ── ScrollingLabel
//!         ├── ListItem
//!         └── ...
//! ```
//!
//! At most one item is selected. Once the list has items, exactly one is:
//! the first added item is selected automatically, and moving past either
//! end leaves the selection where it is.

use crate::engine::node::{Node, NodeId, NodeKind};
use crate::types::{Alignment, Button, Font};
use crate::ui::Ui;

use super::label::ScrollingLabel;

/// Activation handler of a list item.
pub type ItemHandler = Box<dyn FnMut(&mut Ui)>;

// =============================================================================
// ListItem
// =============================================================================

pub(crate) struct ListItemState {
    pub(crate) id: i32,
    pub(crate) background: NodeId,
    pub(crate) label: ScrollingLabel,
    pub(crate) selected: bool,
    pub(crate) handler: Option<ItemHandler>,
}

/// Handle to a list item component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListItem(NodeId);

impl ListItem {
    /// Create a visible, unselected item whose label is `label_width` wide.
    pub fn new(ui: &mut Ui, label_width: i32, font: Font, text: &str, id: i32) -> Self {
        let style = ui.config.list;
        let background = ui.create_rect(style.background);
        let label = ScrollingLabel::new(ui, label_width, font, text);
        label.set_color(ui, style.text);
        let justified = ui.create_justified(Alignment::Start, Alignment::Center);
        ui.append_child(justified, label.id());

        let state = ListItemState {
            id,
            background,
            label,
            selected: false,
            handler: None,
        };
        let item = ui.insert_node(Node::component(NodeKind::ListItem(state)));
        ui.append_child(item, background);
        ui.append_child(item, justified);
        ui.show(item);
        Self(item)
    }

    pub fn node(self) -> NodeId {
        self.0
    }

    /// Caller-assigned identifier.
    pub fn id(self, ui: &Ui) -> Option<i32> {
        self.state(ui).map(|s| s.id)
    }

    pub fn label(self, ui: &Ui) -> Option<ScrollingLabel> {
        self.state(ui).map(|s| s.label)
    }

    pub fn is_selected(self, ui: &Ui) -> bool {
        self.state(ui).is_some_and(|s| s.selected)
    }

    /// Toggle the selected colors. Only an actual change invalidates.
    pub fn set_selected(self, ui: &mut Ui, selected: bool) {
        let style = ui.config.list;
        let Some(state) = self.state_mut(ui) else { return };
        if state.selected == selected {
            return;
        }
        state.selected = selected;
        let (background, label) = (state.background, state.label);

        let (fill, text) = if selected {
            (style.selected_background, style.selected_text)
        } else {
            (style.background, style.text)
        };
        ui.set_rect_color(background, fill);
        label.set_color(ui, text);
        ui.notify_change(self.0);
    }

    /// Set the handler run when the item is activated with `A`.
    pub fn set_handler(self, ui: &mut Ui, handler: impl FnMut(&mut Ui) + 'static) {
        if let Some(state) = self.state_mut(ui) {
            state.handler = Some(Box::new(handler));
        }
    }

    /// Run the handler, if any.
    pub fn activate(self, ui: &mut Ui) {
        let Some(mut handler) = self.state_mut(ui).and_then(|s| s.handler.take()) else {
            return;
        };
        handler(ui);
        if let Some(state) = self.state_mut(ui) {
            state.handler.get_or_insert(handler);
        }
    }

    fn state(self, ui: &Ui) -> Option<&ListItemState> {
        match ui.node(self.0).map(|n| &n.kind) {
            Some(NodeKind::ListItem(state)) => Some(state),
            _ => None,
        }
    }

    fn state_mut(self, ui: &mut Ui) -> Option<&mut ListItemState> {
        match ui.node_mut(self.0).map(|n| &mut n.kind) {
            Some(NodeKind::ListItem(state)) => Some(state),
            _ => None,
        }
    }
}

// =============================================================================
// VerticalList
// =============================================================================

pub(crate) struct ListState {
    pub(crate) flow: NodeId,
    pub(crate) font: Font,
    pub(crate) items: Vec<ListItem>,
}

/// Handle to a vertical list component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerticalList(NodeId);

impl VerticalList {
    /// Create a hidden list of the given outer size whose items flow in an
    /// inner region centered inside it.
    pub fn new(ui: &mut Ui, outer: (i32, i32), inner: (i32, i32), font: Font) -> Self {
        let flow = ui.create_vertical_flow(inner.0, inner.1);
        let padding = ui.create_justified(Alignment::Center, Alignment::Center);
        ui.append_child(padding, flow);

        let state = ListState {
            flow,
            font,
            items: Vec::new(),
        };
        let node = Node::component(NodeKind::VerticalList(state)).with_size(outer.0, outer.1);
        let list = ui.insert_node(node);
        ui.append_child(list, padding);
        Self(list)
    }

    pub fn node(self) -> NodeId {
        self.0
    }

    /// Append an item labelled `name`. The first item added is selected.
    pub fn add_item(self, ui: &mut Ui, name: &str, id: i32) -> Option<ListItem> {
        let (flow, font) = self.state(ui).map(|s| (s.flow, s.font))?;
        let item_height = font.char_height + ui.config.list.item_padding;
        let label_width = ui.width(flow);

        let item = ListItem::new(ui, label_width, font, name, id);
        ui.set_fixed_height(item.node(), Some(item_height));
        ui.append_child(flow, item.node());
        self.state_mut(ui)?.items.push(item);

        if self.selected_index(ui).is_none() {
            self.set_selected_index(ui, 0);
        }
        Some(item)
    }

    pub fn len(self, ui: &Ui) -> usize {
        self.state(ui).map_or(0, |s| s.items.len())
    }

    pub fn is_empty(self, ui: &Ui) -> bool {
        self.len(ui) == 0
    }

    pub fn items(self, ui: &Ui) -> Vec<ListItem> {
        self.state(ui).map(|s| s.items.clone()).unwrap_or_default()
    }

    pub fn selected_index(self, ui: &Ui) -> Option<usize> {
        self.state(ui)?
            .items
            .iter()
            .position(|item| item.is_selected(ui))
    }

    pub fn selected_item(self, ui: &Ui) -> Option<ListItem> {
        let index = self.selected_index(ui)?;
        self.state(ui)?.items.get(index).copied()
    }

    /// Select the item at `index`, deselecting every other one. Out of
    /// range indices leave the selection unchanged.
    pub fn set_selected_index(self, ui: &mut Ui, index: usize) {
        let items = self.items(ui);
        if index >= items.len() {
            return;
        }
        for (i, item) in items.into_iter().enumerate() {
            item.set_selected(ui, i == index);
        }
    }

    /// Move the selection by one and focus the new item.
    fn step_selection(self, ui: &mut Ui, down: bool) {
        let Some(current) = self.selected_index(ui) else { return };
        let target = if down {
            current + 1
        } else if current > 0 {
            current - 1
        } else {
            return;
        };
        let Some(next) = self.items(ui).get(target).copied() else {
            return;
        };
        self.set_selected_index(ui, target);
        ui.focus(next.node(), true);
    }

    fn state(self, ui: &Ui) -> Option<&ListState> {
        match ui.node(self.0).map(|n| &n.kind) {
            Some(NodeKind::VerticalList(state)) => Some(state),
            _ => None,
        }
    }

    fn state_mut(self, ui: &mut Ui) -> Option<&mut ListState> {
        match ui.node_mut(self.0).map(|n| &mut n.kind) {
            Some(NodeKind::VerticalList(state)) => Some(state),
            _ => None,
        }
    }
}

impl Ui {
    /// `A` activates the selected item, `Up`/`Down` move the selection.
    pub(crate) fn list_handle_input(&mut self, id: NodeId, button: Button) -> bool {
        let list = VerticalList(id);
        tracing::debug!(?button, list = ?id, "list input");
        match button {
            Button::A => {
                if let Some(item) = list.selected_item(self) {
                    item.activate(self);
                }
            }
            Button::Down => list.step_selection(self, true),
            Button::Up => list.step_selection(self, false),
            _ => {}
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Image, Surface};
    use crate::types::BoundingBox;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn setup() -> (Ui, VerticalList) {
        let mut ui = Ui::default();
        let list = VerticalList::new(&mut ui, (80, 60), (60, 40), Font::FONT5);
        ui.set_root(list.node());
        ui.show(list.node());
        (ui, list)
    }

    fn fill(ui: &mut Ui, list: VerticalList, names: &[&str]) -> Vec<ListItem> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| list.add_item(ui, name, i as i32).unwrap())
            .collect()
    }

    #[test]
    fn test_first_item_selected() {
        let (mut ui, list) = setup();
        assert_eq!(list.selected_index(&ui), None);
        let items = fill(&mut ui, list, &["Play", "Options", "Quit"]);

        assert_eq!(list.len(&ui), 3);
        assert_eq!(list.selected_index(&ui), Some(0));
        assert_eq!(list.selected_item(&ui), Some(items[0]));
        assert_eq!(items[2].id(&ui), Some(2));
        assert_eq!(ui.height(items[1].node()), 5 + 6);
    }

    #[test]
    fn test_set_selected_index_is_exclusive() {
        let (mut ui, list) = setup();
        let items = fill(&mut ui, list, &["a", "b", "c"]);
        list.set_selected_index(&mut ui, 2);
        let selected: Vec<bool> = items.iter().map(|i| i.is_selected(&ui)).collect();
        assert_eq!(selected, [false, false, true]);

        list.set_selected_index(&mut ui, 7);
        assert_eq!(list.selected_index(&ui), Some(2));
    }

    #[test]
    fn test_selection_colors() {
        let (mut ui, list) = setup();
        let items = fill(&mut ui, list, &["a", "b"]);
        let label = items[0].label(&ui).unwrap();
        assert_eq!(label.color(&ui), Some(1));
        assert_eq!(items[1].label(&ui).unwrap().color(&ui), Some(2));

        list.set_selected_index(&mut ui, 1);
        assert_eq!(label.color(&ui), Some(2));
    }

    #[test]
    fn test_up_down_stop_at_ends() {
        let (mut ui, list) = setup();
        let items = fill(&mut ui, list, &["a", "b"]);
        ui.focus(items[0].node(), true);

        ui.handle_button(Button::Up);
        assert_eq!(list.selected_index(&ui), Some(0));

        ui.handle_button(Button::Down);
        assert_eq!(list.selected_index(&ui), Some(1));
        assert_eq!(ui.focused(), Some(items[1].node()));
        assert_eq!(ui.focus_stack(), &[items[1].node()]);

        ui.handle_button(Button::Down);
        assert_eq!(list.selected_index(&ui), Some(1));

        ui.handle_button(Button::Up);
        assert_eq!(list.selected_index(&ui), Some(0));
    }

    #[test]
    fn test_a_activates_selected() {
        let (mut ui, list) = setup();
        let items = fill(&mut ui, list, &["a", "b"]);
        let hits = Rc::new(RefCell::new(Vec::new()));
        for item in &items {
            let hits = hits.clone();
            let id = item.id(&ui).unwrap();
            item.set_handler(&mut ui, move |_| hits.borrow_mut().push(id));
        }
        ui.focus(items[0].node(), true);

        ui.handle_button(Button::Down);
        ui.handle_button(Button::A);
        ui.handle_button(Button::A);
        assert_eq!(*hits.borrow(), [1, 1]);
    }

    #[test]
    fn test_items_draw_stacked() {
        let (mut ui, list) = setup();
        let items = fill(&mut ui, list, &["a", "b"]);
        let mut screen = Image::new(80, 60);
        ui.draw(list.node(), &mut screen, BoundingBox::sized(80, 60));

        // Flow is centered: (80 - 60) / 2, (60 - 40) / 2
        assert_eq!(ui.bounds(items[0].node()), Some(BoundingBox::new(0, 0, 60, 11)));
        assert_eq!(ui.bounds(items[1].node()), Some(BoundingBox::new(0, 11, 60, 11)));
        // Selected background lands on screen
        assert_eq!(screen.get_pixel(10 + 59, 10), 10);
        assert_eq!(screen.get_pixel(10, 10 + 11), 0);
    }
}
