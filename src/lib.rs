//! Single-player grid snake.
//!
//! The core ([`grid`], [`input`], [`engine`], [`scheduler`]) is plain game
//! logic that never touches the window. [`render`], [`hud`], [`audio`] and
//! [`persistence`] are the collaborators the macroquad host wires around it,
//! and [`collaborators`] routes engine events to them.

pub mod audio;
pub mod collaborators;
pub mod config;
pub mod engine;
pub mod events;
pub mod grid;
pub mod hud;
pub mod input;
pub mod persistence;
pub mod render;
pub mod scheduler;

pub use collaborators::Collaborators;
pub use config::GameConfig;
pub use engine::{Game, GameState};
pub use events::{GameEvent, Phase};
pub use grid::{Cell, Direction, Snake};
pub use input::{Command, Controls, InputQueue};
pub use scheduler::{FrameScheduler, Simulation};
