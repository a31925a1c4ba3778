use crate::events::{GameEvent, Phase};
use crate::input::Command;
use crate::render::Layout;
use macroquad::prelude::*;

/// Height of the score strip above the board.
pub const HUD_HEIGHT: f32 = 40.0;

const TEXT_COLOR: Color = Color::new(0.9, 0.93, 0.95, 1.0);
const DIM_COLOR: Color = Color::new(0.55, 0.6, 0.65, 1.0);
const BUTTON_COLOR: Color = Color::new(0.16, 0.19, 0.23, 1.0);
const SHADE_COLOR: Color = Color::new(0.0, 0.0, 0.0, 0.55);

/// Score line, pause button and phase overlay, fed only by engine events.
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    score: u32,
    highscore: u32,
    phase: Phase,
}

impl Hud {
    pub fn new(highscore: u32) -> Self {
        Self { score: 0, highscore, phase: Phase::Running }
    }

    pub fn apply(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::ScoreChanged(score) => self.score = score,
            GameEvent::HighscoreChanged(high) => self.highscore = high,
            GameEvent::PhaseChanged(phase) => self.phase = phase,
            _ => {}
        }
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn highscore_text(&self) -> String {
        format!("High: {}", self.highscore)
    }

    pub fn overlay_title(&self) -> Option<&'static str> {
        match self.phase {
            Phase::Running => None,
            Phase::Paused => Some("Paused"),
            Phase::GameOver => Some("Game Over"),
            Phase::BoardFull => Some("Board Full"),
        }
    }

    fn overlay_action(&self) -> Option<(&'static str, Command)> {
        match self.phase {
            Phase::Running => None,
            Phase::Paused => Some(("Resume", Command::TogglePause)),
            Phase::GameOver | Phase::BoardFull => Some(("Restart", Command::Restart)),
        }
    }

    /// Command for a click at `(x, y)`, if it landed on a button.
    pub fn click(&self, x: f32, y: f32, screen_w: f32, screen_h: f32) -> Option<Command> {
        let point = vec2(x, y);
        if let Some((_, command)) = self.overlay_action() {
            if overlay_button_rect(screen_w, screen_h).contains(point) {
                return Some(command);
            }
        }
        if !self.phase.is_finished() && pause_button_rect(screen_w).contains(point) {
            return Some(Command::TogglePause);
        }
        None
    }

    /// Command for a double click at `(x, y)`: a finished game restarts when
    /// the board itself is double clicked.
    pub fn double_click(&self, x: f32, y: f32, layout: &Layout) -> Option<Command> {
        (self.phase.is_finished() && layout.board_rect().contains(vec2(x, y))).then_some(Command::Restart)
    }

    pub fn draw(&self) {
        let sw = screen_width();
        let sh = screen_height();

        draw_text(&self.score_text(), 12.0, 27.0, 24.0, TEXT_COLOR);
        let high = self.highscore_text();
        let m = measure_text(&high, None, 24, 1.0);
        draw_text(&high, (sw - m.width) * 0.5, 27.0, 24.0, DIM_COLOR);

        if !self.phase.is_finished() {
            let label = if self.phase == Phase::Paused { "Resume" } else { "Pause" };
            button(pause_button_rect(sw), label, 18.0);
        }

        if let (Some(title), Some((label, _))) = (self.overlay_title(), self.overlay_action()) {
            draw_rectangle(0.0, HUD_HEIGHT, sw, sh - HUD_HEIGHT, SHADE_COLOR);
            let t = measure_text(title, None, 40, 1.0);
            draw_text(title, (sw - t.width) * 0.5, sh * 0.42, 40.0, TEXT_COLOR);
            button(overlay_button_rect(sw, sh), label, 22.0);
        }
    }
}

pub fn pause_button_rect(screen_w: f32) -> Rect {
    Rect::new(screen_w - 100.0, 6.0, 88.0, HUD_HEIGHT - 12.0)
}

pub fn overlay_button_rect(screen_w: f32, screen_h: f32) -> Rect {
    let w = 140.0;
    Rect::new((screen_w - w) * 0.5, screen_h * 0.42 + 24.0, w, 40.0)
}

fn button(r: Rect, label: &str, size: f32) {
    draw_rectangle(r.x, r.y, r.w, r.h, BUTTON_COLOR);
    draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.0, DIM_COLOR);
    let m = measure_text(label, None, size as u16, 1.0);
    draw_text(label, r.x + (r.w - m.width) * 0.5, r.y + (r.h + m.offset_y) * 0.5, size, TEXT_COLOR);
}
