//! Notification hooks for watching a game.
//!
//! Observers see everything, including every hand at the start, so they are
//! for logging and spectating only. They are never consulted by the rules.

use tracing::info;

use crate::action::Action;
use crate::cards::*;
use crate::game::{HandIndex, PileHeights, Player};

pub trait GameObserver {
    // every player's hand right after the deal, and who moves first
    fn game_start(&mut self, _hands: &[Cards], _first_player: Player) {}
    // a validated action, before its effect
    fn observe_action(&mut self, _player: Player, _action: &Action) {}
    fn observe_discard(&mut self, _player: Player, _card: &Card, _index: HandIndex) {}
    fn observe_draw(&mut self, _player: Player, _card: &Card, _index: HandIndex) {}
    fn observe_play(&mut self, _player: Player, _card: &Card, _index: HandIndex, _successful: bool) {}
    fn turn_complete(&mut self, _piles: &PileHeights, _information_tokens: u32, _error_tokens: u32) {}
    fn game_complete(&mut self, _won: bool, _piles: &PileHeights) {}
}

#[derive(Debug, Default)]
pub struct LoggingObserver;

impl GameObserver for LoggingObserver {
    fn game_start(&mut self, hands: &[Cards], first_player: Player) {
        for (player, hand) in hands.iter().enumerate() {
            info!("Player {}: [{}]", player, summarize(hand));
        }
        info!("Player {} goes first", first_player);
        info!("===");
    }

    fn observe_action(&mut self, player: Player, action: &Action) {
        info!("Player {} taking action '{}'", player, action);
    }

    fn observe_discard(&mut self, player: Player, card: &Card, _index: HandIndex) {
        info!("Player {} discards a {} {}", player, card.color, card.value);
    }

    fn observe_draw(&mut self, player: Player, card: &Card, _index: HandIndex) {
        info!("Player {} drew a {} {}", player, card.color, card.value);
    }

    fn observe_play(&mut self, player: Player, card: &Card, _index: HandIndex, successful: bool) {
        info!(
            "Player {} played a {} {}. Successful: {}",
            player, card.color, card.value, successful
        );
    }

    fn turn_complete(&mut self, piles: &PileHeights, information_tokens: u32, error_tokens: u32) {
        info!(
            "Turn complete. Piles: {}, information tokens: {}, error tokens: {}",
            piles, information_tokens, error_tokens
        );
        info!("---");
    }

    fn game_complete(&mut self, won: bool, piles: &PileHeights) {
        if won {
            info!("We won! Piles: {}", piles);
        } else {
            info!("We lost. Piles: {} (score {})", piles, piles.score());
        }
    }
}
