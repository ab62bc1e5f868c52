use std::fmt;

use crate::cards::*;
use crate::game::{HandIndex, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Information {
    Color(Color),
    Value(Value),
}
impl Information {
    pub fn matches(&self, card: &Card) -> bool {
        match *self {
            Information::Color(color) => card.color == color,
            Information::Value(value) => card.value == value,
        }
    }
}
impl fmt::Display for Information {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Information::Color(color) => write!(f, "Color:{}", color),
            Information::Value(value) => write!(f, "Value:{}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiveInformation {
    // the player the information is about
    pub player: Player,
    // positions in that player's hand the information applies to
    pub cards: Vec<HandIndex>,
    pub information: Information,
}
impl GiveInformation {
    /// Builds the one legal disclosure of `information` about `hand`:
    /// every matching position, and nothing else.
    pub fn describing(player: Player, hand: &[Card], information: Information) -> GiveInformation {
        let cards = hand
            .iter()
            .enumerate()
            .filter(|(_, card)| information.matches(card))
            .map(|(i, _)| i)
            .collect();
        GiveInformation {
            player,
            cards,
            information,
        }
    }
}

// represents the choice a player made in a given turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    GiveInformation(GiveInformation),
    Discard(HandIndex),
    Play(HandIndex),
}
impl Action {
    pub fn quick_string(&self) -> String {
        match self {
            Action::GiveInformation(info) => {
                format!("Gave information to player: {}", info.player)
            }
            Action::Discard(index) => format!("Discarded card {}", index),
            Action::Play(index) => format!("Played card {}", index),
        }
    }
}
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Action::GiveInformation(info) => write!(
                f,
                "GiveInformation < PlayerIndex:{} Cards:{:?} {} >",
                info.player, info.cards, info.information
            ),
            Action::Discard(index) => write!(f, "Discard < Index:{} >", index),
            Action::Play(index) => write!(f, "Play < Index:{} >", index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describing_picks_exactly_the_matching_positions() {
        let hand = vec![
            Card::new(Color::Red, 1),
            Card::new(Color::Blue, 2),
            Card::new(Color::Red, 3),
        ];
        let by_color = GiveInformation::describing(1, &hand, Information::Color(Color::Red));
        assert_eq!(by_color.cards, vec![0, 2]);
        let by_value = GiveInformation::describing(1, &hand, Information::Value(2));
        assert_eq!(by_value.cards, vec![1]);
        let nothing = GiveInformation::describing(1, &hand, Information::Value(5));
        assert!(nothing.cards.is_empty());
    }

    #[test]
    fn display_names_every_field() {
        let action = Action::GiveInformation(GiveInformation {
            player: 2,
            cards: vec![1, 3],
            information: Information::Color(Color::Red),
        });
        assert_eq!(
            action.to_string(),
            "GiveInformation < PlayerIndex:2 Cards:[1, 3] Color:RED >"
        );
        assert_eq!(Action::Play(3).to_string(), "Play < Index:3 >");
        assert_eq!(Action::Discard(0).quick_string(), "Discarded card 0");
    }
}
