use std::collections::HashSet;

use grid_snake::{Cell, Controls, Direction, FrameScheduler, Game, GameEvent, GameState, Phase};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

/// Heads for the food most of the time, wanders otherwise.
fn pick_turn(state: &GameState, rng: &mut ChaCha8Rng) -> Direction {
    if rng.gen_bool(0.3) {
        return DIRECTIONS[rng.gen_range(0..4)];
    }
    let head = state.head();
    let Some(food) = state.food else { return state.direction };
    if food.x > head.x {
        Direction::Right
    } else if food.x < head.x {
        Direction::Left
    } else if food.y > head.y {
        Direction::Down
    } else {
        Direction::Up
    }
}

fn assert_invariants(state: &GameState, grid_size: i32) {
    let unique: HashSet<Cell> = state.snake.iter().copied().collect();
    assert_eq!(unique.len(), state.snake.len(), "snake overlaps itself: {:?}", state.snake);
    assert!(state.snake.iter().all(|c| c.in_bounds(grid_size)));
    if let Some(food) = state.food {
        assert!(food.in_bounds(grid_size));
        assert!(!state.snake.contains(&food), "food {food:?} on snake");
    }
}

#[test]
fn invariants_hold_over_many_games() {
    let grid_size = 8;
    let mut driver = ChaCha8Rng::seed_from_u64(2024);
    let mut game = Game::new(grid_size, 0, 11);
    let mut meals = 0;
    let mut deaths = 0;
    let mut best = 0;

    for _ in 0..5_000 {
        if game.phase().is_finished() {
            game.request_restart();
            game.drain_events();
        }

        let before_len = game.state().snake.len();
        let before_score = game.state().score;
        let before_high = game.state().highscore;

        let turn = pick_turn(game.state(), &mut driver);
        game.enqueue_direction(turn);
        game.tick();
        let events = game.drain_events();
        let state = game.state();

        assert!(state.highscore >= before_high);
        let ate = events.contains(&GameEvent::Ate);
        if state.phase.is_finished() {
            best = best.max(state.score);
        }
        assert_eq!(state.highscore, best);

        if state.phase == Phase::GameOver {
            deaths += 1;
            assert!(events.contains(&GameEvent::Died));
            assert_eq!(state.snake.len(), before_len);
            continue;
        }

        assert_invariants(state, grid_size);
        if ate {
            meals += 1;
            assert_eq!(state.snake.len(), before_len + 1);
            assert_eq!(state.score, before_score + 1);
        } else {
            assert_eq!(state.snake.len(), before_len);
            assert_eq!(state.score, before_score);
        }
    }

    // The walk should have exercised both eating and dying.
    assert!(meals > 0, "never ate");
    assert!(deaths > 0, "never died");
}

#[test]
fn reversal_never_changes_heading() {
    let mut game = Game::new(20, 0, 5);
    for _ in 0..4 {
        let heading = game.state().direction;
        let head = game.state().head();
        game.enqueue_direction(heading.opposite());
        game.tick();
        assert_eq!(game.state().direction, heading);
        assert_eq!(game.state().head(), head.step(heading));
    }
}

#[test]
fn scheduler_drives_game_at_twenty_hertz() {
    let mut game = Game::new(100, 0, 3);
    let mut scheduler = FrameScheduler::new(20, 0.0);
    let start = game.state().head();

    // One second of 50 Hz frames.
    let mut ticks = 0;
    for frame in 1..=50 {
        ticks += scheduler.frame(frame as f64 * 20.0, &mut game).ticks;
    }

    assert_eq!(ticks, 20);
    assert_eq!(game.state().head(), Cell::new(start.x + 20, start.y));
}

#[test]
fn pause_and_resume_through_scheduler() {
    let mut game = Game::new(100, 0, 3);
    let mut scheduler = FrameScheduler::new(20, 0.0);
    scheduler.frame(75.0, &mut game);
    let head = game.state().head();
    let alpha = scheduler.alpha();

    game.toggle_pause();
    let report = scheduler.frame(5_000.0, &mut game);
    assert_eq!(report.ticks, 0);
    assert_eq!(report.alpha, alpha);
    assert_eq!(game.state().head(), head);

    game.toggle_pause();
    scheduler.resync(5_000.0);
    let report = scheduler.frame(5_060.0, &mut game);
    assert_eq!(report.ticks, 1);
    assert_eq!(game.state().head(), head.step(Direction::Right));
}
