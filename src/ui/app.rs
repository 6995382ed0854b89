use std::cell::RefCell;
use std::rc::Rc;

use adw::prelude::*;
use gio::SimpleAction;
use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;

use super::board::{build_board_grid, CONTENT_MARGIN};
use super::dialogs::{show_about_dialog, show_instructions_dialog};
use super::hud::{start_clock, stop_clock, update_subtitle};
use super::scene::{refresh_board, show_game, show_summary};
use super::state::{AppState, GamePhase, TapOutcome};

pub fn run() {
    glib::set_prgname(Some("io.tapdash.TapDash"));
    let app = adw::Application::builder()
        .application_id("io.tapdash.TapDash")
        .build();

    app.connect_activate(move |app| {
        load_css();

        let state = Rc::new(RefCell::new(AppState::new()));

        let instructions_action = SimpleAction::new("instructions", None);
        instructions_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_instructions_dialog(&app);
            }
        });
        app.add_action(&instructions_action);

        let about_action = SimpleAction::new("about", None);
        about_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_about_dialog(&app);
            }
        });
        app.add_action(&about_action);

        let quit_action = SimpleAction::new("quit", None);
        quit_action.connect_activate({
            let app = app.clone();
            move |_, _| app.quit()
        });
        app.add_action(&quit_action);

        let dynamic_css_provider = gtk::CssProvider::new();
        if let Some(display) = gtk::gdk::Display::default() {
            gtk::style_context_add_provider_for_display(
                &display,
                &dynamic_css_provider,
                gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
            );
        }

        let title_box = gtk::Box::new(gtk::Orientation::Vertical, 0);
        title_box.set_valign(gtk::Align::Center);
        title_box.set_halign(gtk::Align::Center);
        title_box.set_hexpand(true);

        let title_main = gtk::Label::builder()
            .label("TapDash")
            .halign(gtk::Align::Center)
            .css_classes(vec!["game-title-main"])
            .build();

        let title_subtitle = gtk::Label::builder()
            .label("0:00.000")
            .halign(gtk::Align::Center)
            .css_classes(vec!["game-title-subtitle", "caption", "numeric"])
            .build();

        title_box.append(&title_main);
        title_box.append(&title_subtitle);

        let header = adw::HeaderBar::builder().title_widget(&title_box).build();
        header.add_css_class("app-header");
        header.add_css_class("flat");

        let menu_model = gio::Menu::new();
        menu_model.append(Some("Instructions"), Some("app.instructions"));
        menu_model.append(Some("About TapDash"), Some("app.about"));
        menu_model.append(Some("Quit"), Some("app.quit"));
        let menu_button = gtk::MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .menu_model(&menu_model)
            .build();

        let restart_button = gtk::Button::builder()
            .icon_name("view-refresh-symbolic")
            .build();
        restart_button.set_tooltip_text(Some("Restart"));
        restart_button.connect_clicked({
            let state = state.clone();
            move |_| {
                restart_game(&state);
            }
        });
        let end_box = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        end_box.append(&restart_button);
        end_box.append(&menu_button);
        header.pack_end(&end_box);

        let view_stack = gtk::Stack::new();
        view_stack.set_hexpand(true);
        view_stack.set_vexpand(true);
        view_stack.set_transition_type(gtk::StackTransitionType::SlideLeft);
        view_stack.set_transition_duration(300);

        let game_view = build_game_view(&state);
        view_stack.add_named(&game_view, Some("game"));

        let summary_view = build_summary_view(&state);
        view_stack.add_named(&summary_view, Some("summary"));

        view_stack.set_visible_child_name("game");

        let toolbar = adw::ToolbarView::new();
        toolbar.set_hexpand(true);
        toolbar.set_vexpand(true);
        toolbar.add_top_bar(&header);
        toolbar.set_content(Some(&view_stack));

        let win = adw::ApplicationWindow::builder()
            .application(app)
            .title("TapDash")
            .icon_name("io.tapdash.TapDash")
            .default_width(560)
            .default_height(640)
            .content(&toolbar)
            .build();
        win.set_size_request(360, 480);
        win.add_css_class("app-window");

        let style_manager = adw::StyleManager::default();
        if style_manager.is_dark() {
            win.add_css_class("theme-dark");
        } else {
            win.add_css_class("theme-light");
        }
        style_manager.connect_notify_local(Some("dark"), {
            let win = win.clone();
            move |manager, _| {
                if manager.is_dark() {
                    win.remove_css_class("theme-light");
                    win.add_css_class("theme-dark");
                } else {
                    win.remove_css_class("theme-dark");
                    win.add_css_class("theme-light");
                }
            }
        });

        {
            let mut st = state.borrow_mut();
            st.view_stack = Some(view_stack.clone());
            st.title_subtitle = Some(title_subtitle);
            st.dynamic_css_provider = Some(dynamic_css_provider);
        }

        win.connect_close_request({
            let state = state.clone();
            move |_| {
                let mut st = state.borrow_mut();
                stop_clock(&mut st);
                gtk::glib::Propagation::Proceed
            }
        });

        show_game(&state);
        win.present();
    });

    app.run();
}

fn load_css() {
    let Some(display) = gtk::gdk::Display::default() else {
        return;
    };

    let provider = gtk::CssProvider::new();
    provider.load_from_data(include_str!("../../data/style.css"));
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

fn build_game_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("game-root");

    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_hexpand(true);
    content.set_vexpand(true);
    content.set_halign(gtk::Align::Fill);
    content.set_valign(gtk::Align::Fill);
    content.set_margin_top(CONTENT_MARGIN);
    content.set_margin_bottom(CONTENT_MARGIN);
    content.set_margin_start(CONTENT_MARGIN);
    content.set_margin_end(CONTENT_MARGIN);

    let board_grid = build_board_grid(state);

    let board_frame = gtk::AspectFrame::new(0.5, 0.5, 1.0, false);
    board_frame.set_halign(gtk::Align::Fill);
    board_frame.set_valign(gtk::Align::Fill);
    board_frame.set_hexpand(true);
    board_frame.set_vexpand(true);

    let board_card = gtk::Box::new(gtk::Orientation::Vertical, 0);
    board_card.set_halign(gtk::Align::Fill);
    board_card.set_valign(gtk::Align::Fill);
    board_card.set_hexpand(true);
    board_card.set_vexpand(true);
    board_card.add_css_class("tapdash-board-container");
    board_card.append(&board_grid);

    board_frame.set_child(Some(&board_card));
    content.append(&board_frame);

    let start_button = gtk::Button::with_label("Start Game");
    start_button.add_css_class("suggested-action");
    start_button.add_css_class("pill");
    start_button.set_halign(gtk::Align::Center);
    start_button.connect_clicked({
        let state = state.clone();
        move |_| {
            start_game(&state);
        }
    });
    content.append(&start_button);

    root.append(&content);

    {
        let mut st = state.borrow_mut();
        st.board_container = Some(board_card);
        st.start_button = Some(start_button);
    }

    root
}

fn build_summary_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("summary-root");

    let center = gtk::CenterBox::new();
    center.set_hexpand(true);
    center.set_vexpand(true);

    let card = gtk::Box::new(gtk::Orientation::Vertical, 14);
    card.set_halign(gtk::Align::Center);
    card.set_valign(gtk::Align::Center);
    card.add_css_class("summary-card");
    card.set_margin_top(28);
    card.set_margin_bottom(28);
    card.set_margin_start(28);
    card.set_margin_end(28);

    let title = gtk::Label::new(Some("Well done!"));
    title.add_css_class("summary-title");
    title.add_css_class("title-1");

    let time_label = gtk::Label::new(None);
    time_label.add_css_class("summary-time");
    time_label.add_css_class("body");

    let restart_btn = gtk::Button::with_label("Play Again");
    restart_btn.add_css_class("suggested-action");
    restart_btn.add_css_class("pill");
    restart_btn.set_halign(gtk::Align::Center);
    restart_btn.set_margin_top(6);
    restart_btn.connect_clicked({
        let state = state.clone();
        move |_| {
            restart_game(&state);
        }
    });

    card.append(&title);
    card.append(&time_label);
    card.append(&restart_btn);

    center.set_center_widget(Some(&card));
    root.append(&center);

    state.borrow_mut().summary_time_label = Some(time_label);

    root
}

/// Routes one board click through the round transition, then performs the
/// side effects the outcome names. Invalid taps fall out before any widget
/// is touched.
pub fn handle_tile_click(state: &Rc<RefCell<AppState>>, index: usize) {
    let outcome = {
        let mut st = state.borrow_mut();
        let Some(&number) = st.game.grid.get(index) else {
            return;
        };
        let outcome = st.game.apply_tap(number);
        match outcome {
            TapOutcome::Ignored => return,
            TapOutcome::Accepted { finishes: true, .. } => {
                // The clock dies in the same borrow that finished the round,
                // so no further tick can publish a later elapsed value.
                stop_clock(&mut st);
                update_subtitle(&st);
            }
            TapOutcome::Accepted { .. } => {
                refresh_board(&st);
            }
        }
        outcome
    };

    match outcome {
        TapOutcome::Accepted {
            starts_clock: true, ..
        } => start_clock(state),
        TapOutcome::Accepted { finishes: true, .. } => show_summary(state),
        _ => {}
    }
}

fn start_game(state: &Rc<RefCell<AppState>>) {
    {
        let mut st = state.borrow_mut();
        if st.game.phase != GamePhase::NotStarted {
            return;
        }
        st.game.start();
    }
    show_game(state);
}

fn restart_game(state: &Rc<RefCell<AppState>>) {
    {
        let mut st = state.borrow_mut();
        stop_clock(&mut st);
        st.round_id = st.round_id.wrapping_add(1);
        st.game.reset();
        refresh_board(&st);
        update_subtitle(&st);
    }
    show_game(state);
}
