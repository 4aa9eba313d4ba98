//! Menu Example - animated pixel menu in a terminal
//!
//! Renders a 160x120 pixel surface with half-block cells. Press Esc or `m`
//! to open the menu, arrows to move, Enter/z to pick, x/Backspace to close.
//! `q` or Ctrl+C exits. Needs a terminal of at least 160x60 cells.
//!
//! Run with: cargo run --example menu
//! Log to menu.log with: RUST_LOG=pixel_menu=debug cargo run --example menu

use std::cell::Cell;
use std::io::{stdout, Stdout};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{poll, read, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use pixel_menu::state::input::convert_event;
use pixel_menu::{route_event, Alignment, Button, Font, Image, InputEvent, Menu, TerminalPresenter, Ui, UiConfig};

const FRAME: Duration = Duration::from_millis(16);

fn main() -> pixel_menu::Result<()> {
    init_logging();

    let config = UiConfig::default();
    let (cols, rows) = terminal::size()?;
    let mut presenter = TerminalPresenter::new(stdout(), config.palette, cols, rows);

    enable_raw_mode()?;
    presenter.enter_fullscreen()?;
    let result = run(&mut presenter, config);
    presenter.exit_fullscreen()?;
    disable_raw_mode()?;
    result
}

fn init_logging() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let Ok(file) = std::fs::File::create("menu.log") else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn run(presenter: &mut TerminalPresenter<Stdout>, config: UiConfig) -> pixel_menu::Result<()> {
    let mut screen = Image::new(config.screen_width, config.screen_height);
    let keys = config.keys.clone();
    let mut ui = Ui::new(config);
    build_title(&mut ui);

    let quit = Rc::new(Cell::new(false));
    let started = Instant::now();

    while !quit.get() {
        if poll(FRAME)? {
            let event = read()?;
            if let Event::Key(key) = event {
                let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
                if key.kind == KeyEventKind::Press && (ctrl_c || key.code == KeyCode::Char('q')) {
                    break;
                }
            }
            match convert_event(&keys, event) {
                InputEvent::Button(Button::Menu) if ui.scene_depth() == 2 => open_menu(&mut ui, &quit),
                InputEvent::Resize(cols, rows) => presenter.resize(cols, rows),
                other => {
                    route_event(&mut ui, other);
                }
            }
        }

        ui.tick(started.elapsed().as_millis() as u64);
        screen.fill(0);
        ui.paint(&mut screen);
        presenter.present(&screen)?;
    }
    Ok(())
}

/// Base layer: a background with a centered hint.
fn build_title(ui: &mut Ui) {
    let root = ui.create_group();
    let background = ui.create_rect(2);
    ui.append_child(root, background);

    let center = ui.create_justified(Alignment::Center, Alignment::Center);
    let hint = ui.create_text("Esc: menu   q: quit", Font::FONT5, 7);
    ui.append_child(center, hint);
    ui.append_child(root, center);
    ui.set_root(root);
}

fn open_menu(ui: &mut Ui, quit: &Rc<Cell<bool>>) {
    let menu = Menu::new(ui, None);
    menu.add_item(ui, "Resume", move |ui| menu.hide(ui));
    menu.add_item(ui, "A rather long option that has to scroll", |_| {
        tracing::info!("long option picked");
    });
    let quit_requested = Rc::new(Cell::new(false));
    let requested = quit_requested.clone();
    menu.add_item(ui, "Quit", move |ui| {
        requested.set(true);
        menu.hide(ui);
    });

    let quit = quit.clone();
    menu.set_on_did_hide(ui, move |_| {
        if quit_requested.get() {
            quit.set(true);
        }
    });
    menu.show(ui);
}
