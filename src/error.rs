//! Error types for the game engine

use thiserror::Error;

use crate::action::Action;
use crate::game::Player;
use crate::strategy::StrategyError;
use crate::validation::Violation;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid number of players: {0} (must be 2 to 5)")]
    InvalidPlayerCount(usize),

    #[error("Invalid action by player {player} ({action}): {violation}")]
    ProtocolViolation {
        player: Player,
        action: Action,
        violation: Violation,
    },

    #[error("Player {player} could not act: {source}")]
    Strategy {
        player: Player,
        #[source]
        source: StrategyError,
    },

    #[error("The game is already over")]
    AlreadyOver,

    #[error("The game was aborted by an earlier error")]
    Aborted,
}

impl GameError {
    /// The rule that was broken, if this error is a rules violation.
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            GameError::ProtocolViolation { violation, .. } => Some(violation),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
