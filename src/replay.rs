//! Records a game in the hanab.live replay format.

use serde_json::json;

use crate::action::*;
use crate::cards::*;
use crate::game::{HandIndex, Player};
use crate::observer::GameObserver;

// position of a card in the order it left the deck
pub type CardId = usize;

fn card_to_json(card: &Card) -> serde_json::Value {
    json!({
        "rank": card.value,
        "suitIndex": card.color.index(),
    })
}

pub fn action_clue(give: &GiveInformation) -> serde_json::Value {
    match give.information {
        Information::Color(color) => {
            json!({
                "type": 2,
                "target": give.player,
                "value": color.index(),
            })
        }
        Information::Value(value) => {
            json!({
                "type": 3,
                "target": give.player,
                "value": value,
            })
        }
    }
}

pub fn action_play(card_id: CardId) -> serde_json::Value {
    json!({
        "type": 0,
        "target": card_id,
    })
}

pub fn action_discard(card_id: CardId) -> serde_json::Value {
    json!({
        "type": 1,
        "target": card_id,
    })
}

/// Rebuilds the deal order from the round-robin deal and later draws, so it
/// only ever knows the cards that have left the draw pile.
#[derive(Debug, Default)]
pub struct ReplayRecorder {
    players: Vec<String>,
    deck: Cards,
    hands: Vec<Vec<CardId>>,
    actions: Vec<serde_json::Value>,
    first_player: Player,
}

impl ReplayRecorder {
    pub fn new(players: Vec<String>) -> ReplayRecorder {
        ReplayRecorder {
            players,
            ..ReplayRecorder::default()
        }
    }

    fn take(&mut self, player: Player, index: HandIndex) -> CardId {
        self.hands[player as usize].remove(index)
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "options": {
                "variant": "No Variant",
            },
            "players": self.players,
            "first_player": self.first_player,
            "notes": self.players.iter().map(|_player| json!([])).collect::<Vec<_>>(),
            "deck": self.deck.iter().map(card_to_json).collect::<Vec<_>>(),
            "actions": self.actions,
        })
    }
}

impl GameObserver for ReplayRecorder {
    fn game_start(&mut self, hands: &[Cards], first_player: Player) {
        self.first_player = first_player;
        self.hands = vec![Vec::new(); hands.len()];
        let hand_size = hands.iter().map(|hand| hand.len()).max().unwrap_or(0);
        for position in 0..hand_size {
            for (player, hand) in hands.iter().enumerate() {
                if let Some(&card) = hand.get(position) {
                    self.hands[player].push(self.deck.len());
                    self.deck.push(card);
                }
            }
        }
    }

    fn observe_action(&mut self, _player: Player, action: &Action) {
        if let Action::GiveInformation(give) = action {
            self.actions.push(action_clue(give));
        }
    }

    fn observe_discard(&mut self, player: Player, _card: &Card, index: HandIndex) {
        let card_id = self.take(player, index);
        self.actions.push(action_discard(card_id));
    }

    fn observe_play(&mut self, player: Player, _card: &Card, index: HandIndex, _successful: bool) {
        let card_id = self.take(player, index);
        self.actions.push(action_play(card_id));
    }

    fn observe_draw(&mut self, player: Player, card: &Card, index: HandIndex) {
        self.hands[player as usize].insert(index, self.deck.len());
        self.deck.push(*card);
    }
}
