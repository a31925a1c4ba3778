use serde::{Deserialize, Serialize};

/// Coarse state of a game.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Running,
    Paused,
    GameOver,
    /// The snake covers every cell; nothing left to eat.
    BoardFull,
}

impl Phase {
    /// GameOver and BoardFull only leave through a restart.
    pub fn is_finished(self) -> bool {
        matches!(self, Phase::GameOver | Phase::BoardFull)
    }
}

/// Notifications emitted by the tick engine. Consumers never answer back.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Ate,
    Died,
    PauseToggled { paused: bool },
    BoardFull,
    ScoreChanged(u32),
    HighscoreChanged(u32),
    PhaseChanged(Phase),
}
