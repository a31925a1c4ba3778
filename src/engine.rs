//! Fixed-timestep snake state machine.
//!
//! [`Game`] owns the only mutable copy of [`GameState`]. The host talks to it
//! through [`Controls`], the scheduler advances it through [`Simulation`],
//! and everything else learns what happened from the drained [`GameEvent`]s.

use crate::events::{GameEvent, Phase};
use crate::grid::{self, Cell, Direction, Snake};
use crate::input::{Controls, InputQueue};
use crate::scheduler::Simulation;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub snake: Snake,
    pub direction: Direction,
    /// `None` only once the board is full.
    pub food: Option<Cell>,
    pub score: u32,
    pub highscore: u32,
    pub phase: Phase,
}

impl GameState {
    pub fn head(&self) -> Cell {
        self.snake[0]
    }
}

pub struct Game {
    state: GameState,
    input: InputQueue,
    rng: ChaCha8Rng,
    grid_size: i32,
    events: Vec<GameEvent>,
}

impl Game {
    /// Fresh running game on a `grid_size` board with food drawn from `seed`.
    ///
    /// `grid_size` must be at least [`grid::MIN_GRID_SIZE`].
    pub fn new(grid_size: i32, highscore: u32, seed: u64) -> Self {
        let state = GameState {
            snake: grid::make_initial_snake(grid_size),
            direction: Direction::Right,
            food: None,
            score: 0,
            highscore,
            phase: Phase::Running,
        };
        let mut game = Self::from_state(grid_size, state, seed);
        game.state.food = grid::spawn_food(&game.state.snake, grid_size, &mut game.rng);
        game
    }

    /// Resumes from an arbitrary state, e.g. a replay checkpoint.
    pub fn from_state(grid_size: i32, state: GameState, seed: u64) -> Self {
        debug_assert!(state.snake.len() >= grid::INITIAL_SNAKE_LEN);
        debug_assert!(state.food.is_none_or(|f| !state.snake.contains(&f)));
        Self {
            state,
            input: InputQueue::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            grid_size,
            events: Vec::new(),
        }
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.input = InputQueue::with_capacity(capacity);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    pub fn pending_inputs(&self) -> usize {
        self.input.len()
    }

    /// Takes every event produced since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advances the snake by one cell. A no-op unless running.
    pub fn tick(&mut self) {
        if self.state.phase != Phase::Running {
            return;
        }

        if let Some(next) = self.input.dequeue_one() {
            if !next.is_opposite(self.state.direction) {
                self.state.direction = next;
            }
        }

        let new_head = self.state.head().step(self.state.direction);

        if !new_head.in_bounds(self.grid_size) {
            log::info!("hit the wall at ({}, {}) with score {}", new_head.x, new_head.y, self.state.score);
            self.die();
            return;
        }
        if self.state.snake.contains(&new_head) {
            log::info!("ran into itself at ({}, {}) with score {}", new_head.x, new_head.y, self.state.score);
            self.die();
            return;
        }

        self.state.snake.push_front(new_head);

        if self.state.food == Some(new_head) {
            self.state.score += 1;
            self.events.push(GameEvent::ScoreChanged(self.state.score));
            self.events.push(GameEvent::Ate);
            self.state.food = grid::spawn_food(&self.state.snake, self.grid_size, &mut self.rng);
            if self.state.food.is_none() {
                log::info!("board full with score {}", self.state.score);
                self.finish(Phase::BoardFull, GameEvent::BoardFull);
            }
        } else {
            self.state.snake.pop_back();
        }

        debug_assert!(self.state.food.is_none_or(|f| !self.state.snake.contains(&f)));
    }

    fn die(&mut self) {
        self.finish(Phase::GameOver, GameEvent::Died);
    }

    fn finish(&mut self, phase: Phase, cause: GameEvent) {
        self.state.phase = phase;
        self.events.push(cause);
        if self.state.score > self.state.highscore {
            self.state.highscore = self.state.score;
            self.events.push(GameEvent::HighscoreChanged(self.state.highscore));
        }
        self.events.push(GameEvent::PhaseChanged(phase));
    }
}

impl Controls for Game {
    fn enqueue_direction(&mut self, dir: Direction) {
        self.input.enqueue(dir);
    }

    fn toggle_pause(&mut self) {
        let next = match self.state.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::GameOver | Phase::BoardFull => return,
        };
        self.state.phase = next;
        let paused = next == Phase::Paused;
        log::debug!("paused: {paused}");
        self.events.push(GameEvent::PauseToggled { paused });
        self.events.push(GameEvent::PhaseChanged(next));
    }

    fn request_restart(&mut self) {
        if !self.state.phase.is_finished() {
            return;
        }
        let snake = grid::make_initial_snake(self.grid_size);
        self.state.food = grid::spawn_food(&snake, self.grid_size, &mut self.rng);
        self.state.snake = snake;
        self.state.direction = Direction::Right;
        self.state.score = 0;
        self.state.phase = Phase::Running;
        self.input.clear();
        log::info!("restarted, highscore {}", self.state.highscore);
        self.events.push(GameEvent::ScoreChanged(0));
        self.events.push(GameEvent::PhaseChanged(Phase::Running));
    }
}

impl Simulation for Game {
    fn tick(&mut self) {
        Game::tick(self);
    }

    fn is_running(&self) -> bool {
        self.state.phase == Phase::Running
    }
}
