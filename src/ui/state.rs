use std::collections::HashSet;
use std::time::Duration;

use gtk4 as gtk;

pub const GRID_COLS: i32 = 5;
pub const GRID_ROWS: i32 = 5;
pub const TILE_COUNT: u8 = (GRID_COLS * GRID_ROWS) as u8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    NotStarted,
    Running,
    Finished,
}

/// Result of feeding one tap into the round. The flags enumerate the side
/// effects the caller owes (clock start, view switch), so the whole
/// transition can be driven without a main loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    Ignored,
    Accepted { starts_clock: bool, finishes: bool },
}

/// One round of the game, free of widget handles.
#[derive(Clone, Debug)]
pub struct GameState {
    pub phase: GamePhase,
    pub current_target: u8,
    pub tapped: HashSet<u8>,
    pub grid: Vec<u8>,
    pub elapsed: Duration,
}

pub fn shuffled_grid() -> Vec<u8> {
    use rand::seq::SliceRandom;
    let mut grid: Vec<u8> = (1..=TILE_COUNT).collect();
    let mut rng = rand::rng();
    grid.shuffle(&mut rng);
    grid
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            phase: GamePhase::NotStarted,
            current_target: 1,
            tapped: HashSet::new(),
            grid: shuffled_grid(),
            elapsed: Duration::ZERO,
        }
    }
}

impl GameState {
    pub fn start(&mut self) {
        if self.phase == GamePhase::NotStarted {
            self.phase = GamePhase::Running;
        }
    }

    /// Transition for one tapped number. Anything but the current target
    /// while running is rejected without touching state.
    pub fn apply_tap(&mut self, number: u8) -> TapOutcome {
        if self.phase != GamePhase::Running || number != self.current_target {
            return TapOutcome::Ignored;
        }

        self.tapped.insert(number);
        if number == TILE_COUNT {
            self.phase = GamePhase::Finished;
            TapOutcome::Accepted {
                starts_clock: false,
                finishes: true,
            }
        } else {
            self.current_target += 1;
            self.grid = shuffled_grid();
            TapOutcome::Accepted {
                starts_clock: number == 1,
                finishes: false,
            }
        }
    }

    pub fn is_tapped(&self, number: u8) -> bool {
        self.tapped.contains(&number)
    }

    pub fn reset(&mut self) {
        *self = GameState::default();
    }
}

pub struct AppState {
    pub view_stack: Option<gtk::Stack>,
    pub title_subtitle: Option<gtk::Label>,
    pub start_button: Option<gtk::Button>,
    pub board_container: Option<gtk::Box>,
    pub grid_buttons: Vec<gtk::Button>,
    pub summary_time_label: Option<gtk::Label>,
    pub dynamic_css_provider: Option<gtk::CssProvider>,

    // Round state
    pub game: GameState,
    pub round_id: u64,
    pub timer_handle: Option<glib::SourceId>,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            view_stack: None,
            title_subtitle: None,
            start_button: None,
            board_container: None,
            grid_buttons: Vec::new(),
            summary_time_label: None,
            dynamic_css_provider: None,
            game: GameState::default(),
            round_id: 0,
            timer_handle: None,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_permutation(grid: &[u8]) {
        let mut seen: Vec<u8> = grid.to_vec();
        seen.sort_unstable();
        let expected: Vec<u8> = (1..=TILE_COUNT).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn shuffled_grid_is_a_permutation() {
        for _ in 0..50 {
            assert_permutation(&shuffled_grid());
        }
    }

    #[test]
    fn defaults_are_a_fresh_round() {
        let game = GameState::default();
        assert_eq!(game.phase, GamePhase::NotStarted);
        assert_eq!(game.current_target, 1);
        assert!(game.tapped.is_empty());
        assert_eq!(game.elapsed, Duration::ZERO);
        assert_permutation(&game.grid);
    }

    #[test]
    fn taps_before_start_are_ignored() {
        let mut game = GameState::default();
        assert_eq!(game.apply_tap(1), TapOutcome::Ignored);
        assert_eq!(game.phase, GamePhase::NotStarted);
        assert_eq!(game.current_target, 1);
        assert!(game.tapped.is_empty());
    }

    #[test]
    fn wrong_number_is_ignored_without_state_change() {
        let mut game = GameState::default();
        game.start();
        let grid_before = game.grid.clone();
        assert_eq!(game.apply_tap(17), TapOutcome::Ignored);
        assert_eq!(game.current_target, 1);
        assert!(game.tapped.is_empty());
        assert_eq!(game.phase, GamePhase::Running);
        assert_eq!(game.grid, grid_before);
    }

    #[test]
    fn first_tap_starts_the_clock_and_reshuffles() {
        let mut game = GameState::default();
        game.start();
        assert_eq!(
            game.apply_tap(1),
            TapOutcome::Accepted {
                starts_clock: true,
                finishes: false,
            }
        );
        assert_eq!(game.current_target, 2);
        assert!(game.is_tapped(1));
        assert_permutation(&game.grid);
    }

    #[test]
    fn accepted_tap_advances_target_by_one() {
        let mut game = GameState::default();
        game.start();
        for n in 1..=10 {
            let before = game.tapped.len();
            assert_ne!(game.apply_tap(n), TapOutcome::Ignored);
            assert_eq!(game.tapped.len(), before + 1);
            assert_eq!(game.current_target, n + 1);
        }
    }

    #[test]
    fn re_tapping_an_accepted_number_is_ignored() {
        let mut game = GameState::default();
        game.start();
        game.apply_tap(1);
        game.apply_tap(2);
        assert_eq!(game.apply_tap(1), TapOutcome::Ignored);
        assert_eq!(game.current_target, 3);
        assert_eq!(game.tapped.len(), 2);
    }

    #[test]
    fn completing_the_sequence_finishes_the_round() {
        let mut game = GameState::default();
        game.start();
        for n in 1..TILE_COUNT {
            assert_eq!(
                game.apply_tap(n),
                TapOutcome::Accepted {
                    starts_clock: n == 1,
                    finishes: false,
                }
            );
            assert_eq!(game.phase, GamePhase::Running);
        }
        assert_eq!(
            game.apply_tap(TILE_COUNT),
            TapOutcome::Accepted {
                starts_clock: false,
                finishes: true,
            }
        );
        assert_eq!(game.phase, GamePhase::Finished);
        assert_eq!(game.current_target, TILE_COUNT);
        assert_eq!(game.tapped.len(), TILE_COUNT as usize);
    }

    #[test]
    fn taps_after_finish_are_ignored() {
        let mut game = GameState::default();
        game.start();
        for n in 1..=TILE_COUNT {
            game.apply_tap(n);
        }
        assert_eq!(game.apply_tap(TILE_COUNT), TapOutcome::Ignored);
        assert_eq!(game.apply_tap(1), TapOutcome::Ignored);
        assert_eq!(game.phase, GamePhase::Finished);
    }

    #[test]
    fn reset_restores_defaults_from_any_phase() {
        let mut game = GameState::default();
        game.start();
        for n in 1..=TILE_COUNT {
            game.apply_tap(n);
        }
        game.elapsed = Duration::from_millis(65432);
        game.reset();
        assert_eq!(game.phase, GamePhase::NotStarted);
        assert_eq!(game.current_target, 1);
        assert!(game.tapped.is_empty());
        assert_eq!(game.elapsed, Duration::ZERO);
        assert_permutation(&game.grid);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut game = GameState::default();
        game.start();
        game.apply_tap(1);
        game.reset();
        let first = (game.phase, game.current_target, game.tapped.len());
        game.reset();
        let second = (game.phase, game.current_target, game.tapped.len());
        assert_eq!(first, second);
    }

    #[test]
    fn start_is_only_valid_from_not_started() {
        let mut game = GameState::default();
        game.start();
        for n in 1..=TILE_COUNT {
            game.apply_tap(n);
        }
        game.start();
        assert_eq!(game.phase, GamePhase::Finished);
    }
}
