use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use super::hud::{format_ms, update_subtitle};
use super::state::{AppState, GamePhase};

/// Syncs every tile with the live round: the value a button shows follows
/// the grid ordering, and a button is tappable only while its number is
/// still pending. The board as a whole stays inert until the round starts.
pub(super) fn refresh_board(st: &AppState) {
    for (index, button) in st.grid_buttons.iter().enumerate() {
        if let Some(&number) = st.game.grid.get(index) {
            button.set_sensitive(!st.game.is_tapped(number));
        }
        if let Some(child) = button.child() {
            child.queue_draw();
        }
    }
    if let Some(container) = &st.board_container {
        if st.game.phase == GamePhase::NotStarted {
            container.set_sensitive(false);
            container.add_css_class("board-idle");
        } else {
            container.set_sensitive(true);
            container.remove_css_class("board-idle");
        }
    }
}

pub(super) fn show_game(state: &Rc<RefCell<AppState>>) {
    let st = state.borrow();
    refresh_board(&st);
    update_subtitle(&st);
    if let Some(button) = &st.start_button {
        button.set_visible(st.game.phase == GamePhase::NotStarted);
    }
    if let Some(stack) = &st.view_stack {
        stack.set_transition_type(gtk::StackTransitionType::SlideRight);
        stack.set_visible_child_name("game");
    }
}

pub(super) fn show_summary(state: &Rc<RefCell<AppState>>) {
    let st = state.borrow();
    if let Some(label) = &st.summary_time_label {
        label.set_text(&format!(
            "Completed in {}",
            format_ms(st.game.elapsed.as_millis())
        ));
    }
    if let Some(stack) = &st.view_stack {
        stack.set_transition_type(gtk::StackTransitionType::SlideLeft);
        stack.set_visible_child_name("summary");
    }
}
