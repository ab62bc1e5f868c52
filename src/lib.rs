//! Rules engine for the cooperative card game Hanabi.
//!
//! [`engine::Game`] runs the turns. Decisions come from
//! [`strategy::PlayerStrategy`] implementations and every event is reported
//! to [`observer::GameObserver`]s. A player that breaks the rules ends the
//! game with a [`error::GameError`] instead of a win or a loss.

pub mod action;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod error;
pub mod game;
pub mod helpers;
pub mod observer;
pub mod replay;
pub mod simulator;
pub mod strategies;
pub mod strategy;
pub mod validation;
pub mod wire;

pub use action::{Action, GiveInformation, Information};
pub use cards::{Card, Color, Value};
pub use engine::Game;
pub use error::GameError;
pub use game::{GameState, Outcome, PlayerView};
