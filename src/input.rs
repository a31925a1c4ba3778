use crate::grid::Direction;
use macroquad::input::KeyCode;
use macroquad::input::utils::{register_input_subscriber, repeat_all_miniquad_input};
use macroquad::miniquad::{EventHandler, KeyMods};
use std::collections::VecDeque;

/// Default number of buffered turns.
pub const DEFAULT_QUEUE_CAPACITY: usize = 4;

/// FIFO of pending turns, consumed one per tick.
///
/// Every accepted key press is kept in arrival order. When the buffer is
/// full the newest press is dropped so earlier turns still play out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputQueue {
    pending: VecDeque<Direction>,
    capacity: usize,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }
}

impl InputQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { pending: VecDeque::with_capacity(capacity), capacity }
    }

    /// Appends `dir`; returns false when it was dropped on overflow.
    pub fn enqueue(&mut self, dir: Direction) -> bool {
        if self.pending.len() >= self.capacity {
            log::debug!("input queue full ({}), dropping {:?}", self.capacity, dir);
            return false;
        }
        self.pending.push_back(dir);
        true
    }

    pub fn dequeue_one(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// What the host may ask of the game.
pub trait Controls {
    fn enqueue_direction(&mut self, dir: Direction);
    fn toggle_pause(&mut self);
    fn request_restart(&mut self);
}

/// A key press translated into a game command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
    Restart,
    VolumeDown,
    VolumeUp,
    Quit,
}

/// Arrows + WASD steer, P/Escape pause, R/Enter/Space restart, -/= volume, Q quits.
pub fn command_for_key(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Up | KeyCode::W => Some(Command::Turn(Direction::Up)),
        KeyCode::Down | KeyCode::S => Some(Command::Turn(Direction::Down)),
        KeyCode::Left | KeyCode::A => Some(Command::Turn(Direction::Left)),
        KeyCode::Right | KeyCode::D => Some(Command::Turn(Direction::Right)),
        KeyCode::P | KeyCode::Escape => Some(Command::TogglePause),
        KeyCode::R | KeyCode::Enter | KeyCode::Space => Some(Command::Restart),
        KeyCode::Minus | KeyCode::KpSubtract => Some(Command::VolumeDown),
        KeyCode::Equal | KeyCode::KpAdd => Some(Command::VolumeUp),
        KeyCode::Q => Some(Command::Quit),
        _ => None,
    }
}

/// Forwards a command to the game. Volume and quit are the host's business
/// and are ignored here.
pub fn dispatch<C: Controls + ?Sized>(controls: &mut C, command: Command) {
    match command {
        Command::Turn(dir) => controls.enqueue_direction(dir),
        Command::TogglePause => controls.toggle_pause(),
        Command::Restart => controls.request_restart(),
        Command::VolumeDown | Command::VolumeUp | Command::Quit => {}
    }
}

/// Key presses in the order the window delivered them.
///
/// `get_keys_pressed` hands back a set, which loses the order of two keys
/// pressed within one frame. A quick Up-then-Left must not turn into
/// Left-then-Up, or the Left is thrown away as a reversal.
#[derive(Debug, Default)]
pub struct KeyLog {
    pressed: Vec<KeyCode>,
}

impl KeyLog {
    /// Commands for every key pressed since the last call, oldest first.
    pub fn drain_commands(&mut self) -> Vec<Command> {
        self.pressed.drain(..).filter_map(command_for_key).collect()
    }

    /// Whether anything was pressed since the last drain.
    pub fn any(&self) -> bool {
        !self.pressed.is_empty()
    }
}

impl EventHandler for KeyLog {
    fn update(&mut self) {}

    fn draw(&mut self) {}

    fn key_down_event(&mut self, keycode: KeyCode, _keymods: KeyMods, repeat: bool) {
        if !repeat {
            self.pressed.push(keycode);
        }
    }
}

/// Subscribes to the window's raw input and replays it into a [`KeyLog`].
pub struct Keyboard {
    subscriber: usize,
    log: KeyLog,
}

impl Keyboard {
    /// Must be created inside the macroquad main loop.
    pub fn new() -> Self {
        Self { subscriber: register_input_subscriber(), log: KeyLog::default() }
    }

    /// Pulls this frame's key events into the log.
    pub fn poll(&mut self) -> &mut KeyLog {
        repeat_all_miniquad_input(&mut self.log, self.subscriber);
        &mut self.log
    }
}

/// Default gap between the two clicks of a double click.
pub const DOUBLE_CLICK_MS: f64 = 400.0;

/// Recognises two clicks in quick succession.
#[derive(Debug, Clone)]
pub struct DoubleClick {
    last: Option<f64>,
    window_ms: f64,
}

impl Default for DoubleClick {
    fn default() -> Self {
        Self { last: None, window_ms: DOUBLE_CLICK_MS }
    }
}

impl DoubleClick {
    /// Records a click at `now_ms`; true when it completes a double click.
    pub fn click(&mut self, now_ms: f64) -> bool {
        match self.last.take() {
            Some(prev) if now_ms - prev <= self.window_ms => true,
            _ => {
                self.last = Some(now_ms);
                false
            }
        }
    }
}
