//! Routes engine events to everything that reacts to them.

use crate::audio::SoundBoard;
use crate::engine::Game;
use crate::events::{GameEvent, Phase};
use crate::hud::{HUD_HEIGHT, Hud};
use crate::input::{Command, DoubleClick};
use crate::persistence::{HighscoreStore, VolumeStore};
use crate::render::Layout;
use crate::scheduler::FrameScheduler;

/// HUD, sound and storage, none of which own game state.
pub struct Collaborators<S> {
    pub hud: Hud,
    pub sound: SoundBoard,
    pub store: S,
    double_click: DoubleClick,
}

impl<S: HighscoreStore + VolumeStore> Collaborators<S> {
    /// HUD seeded with the stored highscore, sound at the stored volume.
    pub fn new(store: S) -> Self {
        Self {
            hud: Hud::new(store.load()),
            sound: SoundBoard::new(store.load_volume()),
            store,
            double_click: DoubleClick::default(),
        }
    }

    /// Drains the game's events into the HUD, the sound board and the store.
    ///
    /// A return to `Running` resyncs `scheduler` to `now_ms`, so time spent
    /// paused or on the game-over screen never turns into a burst of ticks.
    pub fn deliver(&mut self, game: &mut Game, scheduler: &mut FrameScheduler, now_ms: f64) {
        for event in game.drain_events() {
            log::trace!("event {event:?}");
            self.hud.apply(&event);
            self.sound.handle(&event);
            match event {
                GameEvent::HighscoreChanged(high) => self.store.save(high),
                GameEvent::PhaseChanged(Phase::Running) => scheduler.resync(now_ms),
                _ => {}
            }
        }
    }

    /// Nudges the sound volume and remembers the new level.
    pub fn adjust_volume(&mut self, delta: f32) {
        let level = self.sound.adjust_volume(delta);
        log::debug!("volume {level:.2}");
        self.store.save_volume(level);
    }

    /// Command for a left click at `(x, y)`. Buttons win; otherwise a second
    /// quick click on the board of a finished game restarts it.
    pub fn click(&mut self, x: f32, y: f32, screen: (f32, f32), grid_size: i32, now_ms: f64) -> Option<Command> {
        let (screen_w, screen_h) = screen;
        if let Some(command) = self.hud.click(x, y, screen_w, screen_h) {
            return Some(command);
        }
        if !self.double_click.click(now_ms) {
            return None;
        }
        let layout = Layout::fit(screen_w, screen_h, HUD_HEIGHT, grid_size);
        self.hud.double_click(x, y, &layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameState;
    use crate::grid::{Cell, Direction};
    use crate::input::Controls;
    use crate::persistence::MemoryStore;

    const SCREEN: (f32, f32) = (800.0, 840.0);

    fn store_with_best(best: u32) -> MemoryStore {
        MemoryStore { best, ..MemoryStore::default() }
    }

    /// Snake heading right with its head on the right wall of a 10x10 board.
    fn about_to_hit_wall(score: u32, highscore: u32) -> Game {
        let state = GameState {
            snake: [Cell::new(9, 5), Cell::new(8, 5), Cell::new(7, 5)].into_iter().collect(),
            direction: Direction::Right,
            food: Some(Cell::new(0, 0)),
            score,
            highscore,
            phase: Phase::Running,
        };
        Game::from_state(10, state, 3)
    }

    #[test]
    fn new_best_on_game_over_is_saved_once() {
        let mut collab = Collaborators::new(store_with_best(7));
        let mut game = about_to_hit_wall(9, 7);
        let mut sched = FrameScheduler::new(10, 0.0);

        game.tick();
        collab.deliver(&mut game, &mut sched, 100.0);
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(collab.store.writes, 1);
        assert_eq!(collab.store.best, 9);
        assert_eq!(collab.hud.highscore_text(), "High: 9");

        // Nothing new to deliver, nothing new to write.
        collab.deliver(&mut game, &mut sched, 200.0);
        assert_eq!(collab.store.writes, 1);
    }

    #[test]
    fn game_over_below_best_is_not_saved() {
        let mut collab = Collaborators::new(store_with_best(7));
        let mut game = about_to_hit_wall(7, 7);
        let mut sched = FrameScheduler::new(10, 0.0);

        game.tick();
        collab.deliver(&mut game, &mut sched, 100.0);
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(collab.store.writes, 0);
        assert_eq!(collab.store.best, 7);
    }

    #[test]
    fn full_board_with_new_best_is_saved() {
        // One free cell left on a 3x3 board.
        let snake = [(1, 0), (0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1), (1, 1)];
        let state = GameState {
            snake: snake.iter().map(|&(x, y)| Cell::new(x, y)).collect(),
            direction: Direction::Right,
            food: Some(Cell::new(2, 0)),
            score: 5,
            highscore: 5,
            phase: Phase::Running,
        };
        let mut game = Game::from_state(3, state, 1);
        let mut collab = Collaborators::new(store_with_best(5));
        let mut sched = FrameScheduler::new(10, 0.0);

        game.tick();
        collab.deliver(&mut game, &mut sched, 100.0);
        assert_eq!(game.phase(), Phase::BoardFull);
        assert_eq!(collab.store.writes, 1);
        assert_eq!(collab.store.best, 6);
        assert_eq!(collab.hud.overlay_title(), Some("Board Full"));
    }

    #[test]
    fn resuming_resyncs_the_scheduler() {
        let mut collab = Collaborators::new(MemoryStore::default());
        let mut game = Game::new(20, 0, 5);
        let mut sched = FrameScheduler::new(10, 0.0);
        collab.deliver(&mut game, &mut sched, 0.0);

        game.toggle_pause();
        collab.deliver(&mut game, &mut sched, 50.0);
        assert_eq!(sched.frame(50.0, &mut game).ticks, 0);

        // A minute later the player resumes.
        game.toggle_pause();
        collab.deliver(&mut game, &mut sched, 60_000.0);
        assert_eq!(sched.frame(60_020.0, &mut game).ticks, 0);
        assert_eq!(sched.frame(60_100.0, &mut game).ticks, 1);
    }

    #[test]
    fn volume_changes_are_stored() {
        let mut collab = Collaborators::new(MemoryStore { volume: 0.5, ..MemoryStore::default() });
        assert_eq!(collab.sound.volume(), 0.5);
        collab.adjust_volume(-0.25);
        assert_eq!(collab.store.volume, 0.25);
        collab.adjust_volume(5.0);
        assert_eq!(collab.store.volume, 1.0);
        assert_eq!(collab.sound.volume(), 1.0);
    }

    #[test]
    fn double_click_on_board_restarts_finished_game() {
        let mut collab = Collaborators::new(MemoryStore::default());
        let mut game = about_to_hit_wall(0, 0);
        let mut sched = FrameScheduler::new(10, 0.0);
        game.tick();
        collab.deliver(&mut game, &mut sched, 100.0);
        assert_eq!(game.phase(), Phase::GameOver);

        // Top-left corner of the board, away from the overlay button.
        let (x, y) = (20.0, 60.0);
        assert_eq!(collab.click(x, y, SCREEN, 10, 1_000.0), None);
        assert_eq!(collab.click(x, y, SCREEN, 10, 1_200.0), Some(Command::Restart));
        // Slow clicks do not count.
        assert_eq!(collab.click(x, y, SCREEN, 10, 3_000.0), None);
        assert_eq!(collab.click(x, y, SCREEN, 10, 3_900.0), None);
    }

    #[test]
    fn double_click_while_running_does_nothing() {
        let mut collab = Collaborators::new(MemoryStore::default());
        assert_eq!(collab.click(20.0, 60.0, SCREEN, 10, 0.0), None);
        assert_eq!(collab.click(20.0, 60.0, SCREEN, 10, 100.0), None);
    }
}
