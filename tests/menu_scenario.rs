//! End-to-end menu flows driven through the public API only.

use std::cell::Cell;
use std::rc::Rc;

use pixel_menu::{Button, Image, Menu, Surface, Ui, UiConfig};

const STAGE: f64 = 201.0;

fn setup() -> (Ui, Menu, Rc<Cell<u32>>, Rc<Cell<u32>>) {
    let mut ui = Ui::new(UiConfig::default());
    let menu = Menu::new(&mut ui, None);

    let play = Rc::new(Cell::new(0));
    let quit = Rc::new(Cell::new(0));
    let p = play.clone();
    menu.add_item(&mut ui, "Play", move |_| p.set(p.get() + 1));
    let q = quit.clone();
    menu.add_item(&mut ui, "Quit", move |_| q.set(q.get() + 1));
    (ui, menu, play, quit)
}

fn open(ui: &mut Ui, menu: Menu) {
    menu.show(ui);
    ui.advance(STAGE);
    ui.advance(STAGE);
}

#[test]
fn test_select_second_item_and_activate() {
    let (mut ui, menu, play, quit) = setup();
    open(&mut ui, menu);

    let list = menu.list(&ui).unwrap();
    let items = list.items(&ui);
    assert_eq!(ui.focused(), Some(items[0].node()));

    ui.handle_button(Button::Down);
    assert_eq!(list.selected_index(&ui), Some(1));
    assert_eq!(ui.focused(), Some(items[1].node()));

    ui.handle_button(Button::A);
    assert_eq!(quit.get(), 1);
    assert_eq!(play.get(), 0);
}

#[test]
fn test_selection_stops_at_the_ends() {
    let (mut ui, menu, ..) = setup();
    open(&mut ui, menu);
    let list = menu.list(&ui).unwrap();

    ui.handle_button(Button::Up);
    assert_eq!(list.selected_index(&ui), Some(0));
    ui.handle_button(Button::Down);
    ui.handle_button(Button::Down);
    assert_eq!(list.selected_index(&ui), Some(1));
}

#[test]
fn test_b_closes_and_resumes_base_layer() {
    let (mut ui, menu, ..) = setup();
    let closed = Rc::new(Cell::new(false));
    let c = closed.clone();
    menu.set_on_did_hide(&mut ui, move |_| c.set(true));

    open(&mut ui, menu);
    assert_eq!(ui.scene_depth(), 2);

    ui.handle_button(Button::B);
    ui.advance(STAGE);
    assert!(!closed.get());
    assert_eq!(ui.scene_depth(), 2);
    ui.advance(STAGE);

    assert!(closed.get());
    assert_eq!(ui.scene_depth(), 1);
    assert_eq!(ui.focused(), None);
    assert_eq!(ui.node_count(), 0);
}

#[test]
fn test_b_while_growing_closes_the_menu() {
    let (mut ui, menu, play, _) = setup();
    let closed = Rc::new(Cell::new(0));
    let c = closed.clone();
    menu.set_on_did_hide(&mut ui, move |_| c.set(c.get() + 1));

    menu.show(&mut ui);
    ui.advance(100.0);
    ui.handle_button(Button::B);
    assert!(menu.is_closing(&ui));

    for _ in 0..10 {
        ui.advance(STAGE);
    }
    assert_eq!(closed.get(), 1);
    assert_eq!(play.get(), 0);
    assert_eq!(ui.scene_depth(), 1);
    assert_eq!(ui.node_count(), 0);
}

#[test]
fn test_item_handler_can_close_the_menu() {
    let mut ui = Ui::default();
    let menu = Menu::new(&mut ui, None);
    menu.add_item(&mut ui, "Quit", move |ui| menu.hide(ui));
    let closed = Rc::new(Cell::new(0));
    let c = closed.clone();
    menu.set_on_did_hide(&mut ui, move |_| c.set(c.get() + 1));

    open(&mut ui, menu);
    ui.handle_button(Button::A);
    assert!(menu.is_closing(&ui));

    for _ in 0..4 {
        ui.advance(STAGE);
    }
    assert_eq!(closed.get(), 1);
    assert!(!ui.contains(menu.node()));
}

#[test]
fn test_menu_over_an_existing_scene() {
    let mut ui = Ui::default();
    let root = ui.create_group();
    let panel = ui.create_panel();
    ui.append_child(root, panel);
    ui.set_root(root);
    ui.show(panel);
    ui.focus(panel, true);

    let menu = Menu::new(&mut ui, None);
    menu.add_item(&mut ui, "Resume", |_| {});
    open(&mut ui, menu);
    assert_eq!(ui.scene_depth(), 3);
    assert_ne!(ui.focused(), Some(panel));

    ui.handle_button(Button::Menu);
    ui.advance(STAGE);
    ui.advance(STAGE);

    assert_eq!(ui.scene_depth(), 2);
    assert_eq!(ui.root(), Some(root));
    assert_eq!(ui.focused(), Some(panel));
    assert!(ui.contains(panel));
}

#[test]
fn test_paint_follows_the_grow() {
    let (mut ui, menu, ..) = setup();
    let mut screen = Image::new(160, 120);

    menu.show(&mut ui);
    ui.paint(&mut screen);
    // Collapsed to a margin-sized square in the center
    assert_ne!(screen.get_pixel(80, 60), 0);
    assert_eq!(screen.get_pixel(20, 60), 0);

    ui.advance(STAGE);
    ui.advance(STAGE);
    screen.fill(0);
    ui.paint(&mut screen);
    assert_eq!(screen.get_pixel(20, 60), 3);
}
