use crate::engine::GameState;
use crate::grid::{Cell, Direction};
use macroquad::prelude::*;

const FOOD_COLOR: Color = Color::new(1.0, 0.302, 0.427, 1.0); // #ff4d6d
const SNAKE_COLOR: Color = Color::new(0.204, 0.827, 0.6, 1.0); // #34d399
const BOARD_COLOR: Color = Color::new(0.06, 0.07, 0.09, 1.0);

/// Read-only copy of what a frame needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub snake: Vec<Cell>,
    pub food: Option<Cell>,
    pub direction: Direction,
    pub alpha: f32,
}

impl Snapshot {
    pub fn capture(state: &GameState, alpha: f32) -> Self {
        Self {
            snake: state.snake.iter().copied().collect(),
            food: state.food,
            direction: state.direction,
            alpha,
        }
    }
}

/// Head position in fractional cells, pulled back along the heading by
/// `1 - alpha` so it slides into its cell as the next tick approaches.
pub fn head_draw_position(head: Cell, dir: Direction, alpha: f32) -> (f32, f32) {
    let (dx, dy) = dir.delta();
    let lag = 1.0 - alpha;
    (head.x as f32 - dx as f32 * lag, head.y as f32 - dy as f32 * lag)
}

/// Where the board sits on screen.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Layout {
    pub tile: f32,
    pub off_x: f32,
    pub off_y: f32,
    pub grid_size: i32,
}

impl Layout {
    /// Largest square tiles that fit below a `top` strip, board centred.
    pub fn fit(screen_w: f32, screen_h: f32, top: f32, grid_size: i32) -> Self {
        let avail_h = (screen_h - top).max(0.0);
        let tile = (screen_w / grid_size as f32).min(avail_h / grid_size as f32);
        let board = tile * grid_size as f32;
        Self {
            tile,
            off_x: (screen_w - board) * 0.5,
            off_y: top + (avail_h - board) * 0.5,
            grid_size,
        }
    }

    pub fn board_rect(&self) -> Rect {
        let side = self.tile * self.grid_size as f32;
        Rect::new(self.off_x, self.off_y, side, side)
    }

    /// Screen rectangle of a cell at fractional grid coordinates.
    pub fn cell_rect(&self, x: f32, y: f32) -> Rect {
        Rect::new(
            (self.off_x + x * self.tile).floor(),
            (self.off_y + y * self.tile).floor(),
            self.tile,
            self.tile,
        )
    }
}

fn fill(r: Rect, color: Color) {
    draw_rectangle(r.x, r.y, r.w, r.h, color);
}

pub fn draw(snapshot: &Snapshot, layout: &Layout) {
    fill(layout.board_rect(), BOARD_COLOR);

    if let Some(food) = snapshot.food {
        fill(layout.cell_rect(food.x as f32, food.y as f32), FOOD_COLOR);
    }

    // Body cells are drawn on their grid cell; only the head is interpolated.
    for (i, seg) in snapshot.snake.iter().enumerate() {
        let (x, y) = if i == 0 {
            head_draw_position(*seg, snapshot.direction, snapshot.alpha)
        } else {
            (seg.x as f32, seg.y as f32)
        };
        fill(layout.cell_rect(x, y), SNAKE_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Phase;

    #[test]
    fn head_lags_a_full_cell_at_alpha_zero() {
        assert_eq!(head_draw_position(Cell::new(5, 5), Direction::Right, 0.0), (4.0, 5.0));
        assert_eq!(head_draw_position(Cell::new(5, 5), Direction::Up, 0.0), (5.0, 6.0));
    }

    #[test]
    fn head_moves_along_one_axis_only() {
        let (x, y) = head_draw_position(Cell::new(5, 5), Direction::Left, 0.25);
        assert!((x - 5.75).abs() < 1e-6);
        assert_eq!(y, 5.0);
    }

    #[test]
    fn layout_centres_square_board() {
        let layout = Layout::fit(1000.0, 840.0, 40.0, 100);
        assert_eq!(layout.tile, 8.0);
        assert_eq!(layout.off_x, 100.0);
        assert_eq!(layout.off_y, 40.0);
        let r = layout.cell_rect(2.0, 3.0);
        assert_eq!((r.x, r.y, r.w, r.h), (116.0, 64.0, 8.0, 8.0));
    }

    #[test]
    fn snapshot_copies_state() {
        let state = GameState {
            snake: [Cell::new(3, 3), Cell::new(2, 3), Cell::new(1, 3)].into_iter().collect(),
            direction: Direction::Right,
            food: Some(Cell::new(7, 7)),
            score: 0,
            highscore: 0,
            phase: Phase::Running,
        };
        let snap = Snapshot::capture(&state, 0.5);
        assert_eq!(snap.snake, vec![Cell::new(3, 3), Cell::new(2, 3), Cell::new(1, 3)]);
        assert_eq!(snap.food, Some(Cell::new(7, 7)));
        assert_eq!(snap.alpha, 0.5);
    }
}
