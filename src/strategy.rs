use thiserror::Error;

use crate::action::Action;
use crate::game::*;
use crate::wire::WireError;

// Traits to implement for any Hanabi decision-maker

// Represents the strategy of a given player
pub trait PlayerStrategy {
    // A function returning the name of a strategy.
    // This is a method of PlayerStrategy rather than GameStrategyConfig
    // so that the name may incorporate useful information that's specific
    // to this player instance.
    fn name(&self) -> String;
    // Called once for every player before the first turn.
    fn start_game(&mut self, _view: &PlayerView<'_>) {}
    // A function to decide what to do on the player's turn.
    // The engine checks the returned action; an illegal one ends the game.
    //
    // An Err also ends the game, blaming this player.
    fn decide(&mut self, view: &PlayerView<'_>) -> Result<Action, StrategyError>;
    // Called after every other player's turn with the action they took.
    fn observe_action(&mut self, actor: Player, action: &Action);
}

// Represents the overall strategy for a game
// Shouldn't do much, except store configuration parameters and
// possibly initialize some shared randomness between players
pub trait GameStrategy {
    fn initialize(&self, player: Player) -> Box<dyn PlayerStrategy>;
}

// Represents configuration for a strategy.
// Acts as a factory for game strategies, so we can play many rounds
pub trait GameStrategyConfig {
    fn initialize(&self, opts: &GameOptions, seed: u64) -> Box<dyn GameStrategy>;
}

#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad reply: {0}")]
    Wire(#[from] WireError),

    #[error("http request failed: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error("remote player sent an empty reply")]
    EmptyReply,

    #[error("no legal action available")]
    NoLegalAction,
}

pub fn strategies_for(
    opts: &GameOptions,
    config: &dyn GameStrategyConfig,
    seed: u64,
) -> Vec<Box<dyn PlayerStrategy>> {
    let game_strategy = config.initialize(opts, seed);
    (0..opts.num_players)
        .map(|player| game_strategy.initialize(player))
        .collect()
}
