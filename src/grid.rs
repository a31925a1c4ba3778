use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default board edge in cells.
pub const GRID_SIZE: i32 = 100;

/// Length of a freshly spawned snake.
pub const INITIAL_SNAKE_LEN: usize = 3;

/// Smallest board that fits a freshly spawned snake.
pub const MIN_GRID_SIZE: i32 = 4;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector of this heading, with y growing downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step along `dir`. May fall outside the board.
    pub fn step(self, dir: Direction) -> Cell {
        let (dx, dy) = dir.delta();
        Cell { x: self.x + dx, y: self.y + dy }
    }

    pub fn in_bounds(self, grid_size: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < grid_size && self.y < grid_size
    }
}

/// Snake body, head first.
pub type Snake = VecDeque<Cell>;

/// Three horizontal segments centred on the board, facing right.
pub fn make_initial_snake(grid_size: i32) -> Snake {
    debug_assert!(
        grid_size >= MIN_GRID_SIZE,
        "grid_size {grid_size} is too small for a {INITIAL_SNAKE_LEN}-cell snake"
    );
    let mid = grid_size / 2;
    (0..INITIAL_SNAKE_LEN as i32)
        .map(|i| Cell::new(mid - i, mid))
        .collect()
}

/// Picks a free cell uniformly at random by rejection sampling.
///
/// Returns `None` once the snake covers the whole board, which would
/// otherwise make the sampling loop spin forever.
pub fn spawn_food<R: Rng + ?Sized>(snake: &Snake, grid_size: i32, rng: &mut R) -> Option<Cell> {
    let total = (grid_size as usize) * (grid_size as usize);
    if snake.len() >= total {
        return None;
    }
    loop {
        let x = rng.gen_range(0..grid_size);
        let y = rng.gen_range(0..grid_size);
        let cell = Cell { x, y };
        if !snake.iter().any(|c| *c == cell) {
            return Some(cell);
        }
    }
}
