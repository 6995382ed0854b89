use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use gtk4::glib;
use gtk4::prelude::*;

use super::state::{AppState, GamePhase};

pub(super) const CLOCK_TICK_MS: u64 = 10;

/// Stopwatch rendering: minutes, zero-padded seconds, zero-padded millis.
pub(super) fn format_ms(ms: u128) -> String {
    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    let millis = ms % 1000;
    format!("{}:{:02}.{:03}", minutes, seconds, millis)
}

pub(super) fn update_subtitle(st: &AppState) {
    if let Some(subtitle) = &st.title_subtitle {
        subtitle.set_text(&format_ms(st.game.elapsed.as_millis()));
    }
}

pub(super) fn stop_clock(st: &mut AppState) {
    if let Some(handle) = st.timer_handle.take() {
        handle.remove();
    }
}

/// Installs the repeating stopwatch tick. At most one tick source exists;
/// any previous one is removed first. The closure re-checks the round and
/// phase so a tick scheduled around a restart or finish publishes nothing.
pub(super) fn start_clock(state: &Rc<RefCell<AppState>>) {
    let mut st = state.borrow_mut();
    stop_clock(&mut st);
    let started = Instant::now();
    let round_id = st.round_id;

    let state_clone = state.clone();
    let handle = glib::timeout_add_local(Duration::from_millis(CLOCK_TICK_MS), move || {
        let mut st = state_clone.borrow_mut();
        if st.round_id != round_id || st.game.phase != GamePhase::Running {
            return glib::ControlFlow::Break;
        }
        st.game.elapsed = started.elapsed();
        update_subtitle(&st);
        glib::ControlFlow::Continue
    });
    st.timer_handle = Some(handle);
}

#[cfg(test)]
mod tests {
    use super::format_ms;

    #[test]
    fn formats_minutes_seconds_millis() {
        assert_eq!(format_ms(65432), "1:05.432");
    }

    #[test]
    fn pads_seconds_and_millis() {
        assert_eq!(format_ms(0), "0:00.000");
        assert_eq!(format_ms(7), "0:00.007");
        assert_eq!(format_ms(61_001), "1:01.001");
    }

    #[test]
    fn rolls_minutes_past_ten() {
        assert_eq!(format_ms(600_000), "10:00.000");
        assert_eq!(format_ms(59_999), "0:59.999");
    }
}
