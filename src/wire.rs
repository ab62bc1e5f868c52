//! JSON encoding of actions and of the messages exchanged with a remote
//! player.
//!
//! An [`ActionMessage`] mirrors the wire shape, where each sub action is an
//! optional field. It only becomes an [`Action`] after the structural check
//! in [`validation::well_formed`].

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::action::*;
use crate::cards::*;
use crate::game::{HandIndex, Player};
use crate::validation::{self, MalformedAction};

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.full_name())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActionMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub give_information: Option<GiveInformationMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discard: Option<IndexMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play: Option<IndexMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GiveInformationMessage {
    pub player_index: Player,
    #[serde(default)]
    pub cards: Vec<HandIndex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IndexMessage {
    pub index: HandIndex,
}

impl ActionMessage {
    pub fn invalid_reason(&self) -> Option<MalformedAction> {
        validation::well_formed(self.clone()).err()
    }
}

impl From<&Action> for ActionMessage {
    fn from(action: &Action) -> ActionMessage {
        match action {
            Action::GiveInformation(give) => {
                let (color, value) = match give.information {
                    Information::Color(color) => (Some(color), None),
                    Information::Value(value) => (None, Some(value)),
                };
                ActionMessage {
                    give_information: Some(GiveInformationMessage {
                        player_index: give.player,
                        cards: give.cards.clone(),
                        color,
                        value,
                    }),
                    ..ActionMessage::default()
                }
            }
            &Action::Discard(index) => ActionMessage {
                discard: Some(IndexMessage { index }),
                ..ActionMessage::default()
            },
            &Action::Play(index) => ActionMessage {
                play: Some(IndexMessage { index }),
                ..ActionMessage::default()
            },
        }
    }
}

impl TryFrom<ActionMessage> for Action {
    type Error = MalformedAction;

    fn try_from(message: ActionMessage) -> Result<Action, MalformedAction> {
        validation::well_formed(message)
    }
}

#[derive(Error, Debug)]
pub enum WireError {
    #[error("could not decode message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Malformed(#[from] MalformedAction),
}

pub fn encode_action(action: &Action) -> Result<String, WireError> {
    Ok(serde_json::to_string(&ActionMessage::from(action))?)
}

pub fn decode_action(data: &str) -> Result<Action, WireError> {
    let message: ActionMessage = serde_json::from_str(data)?;
    Ok(Action::try_from(message)?)
}

/// Everything a remote player is sent. Exactly one field is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_request: Option<ActionRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<Observation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActionRequest {
    pub other_players_cards: BTreeMap<Player, Cards>,
    pub my_card_count: usize,
    pub blue_tokens: u32,
    pub red_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Observation {
    pub actor: Player,
    pub action: ActionMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(action: Action, expected: &str) {
        let data = encode_action(&action).unwrap();
        assert_eq!(data, expected);
        let decoded = decode_action(&data).unwrap();
        assert_eq!(decoded.to_string(), action.to_string());
        assert_eq!(decoded, action);
    }

    #[test]
    fn actions_round_trip() {
        round_trip(
            Action::GiveInformation(GiveInformation {
                player: 2,
                cards: vec![1, 3],
                information: Information::Color(Color::Red),
            }),
            r#"{"GiveInformation":{"PlayerIndex":2,"Cards":[1,3],"Color":"RED"}}"#,
        );
        round_trip(
            Action::GiveInformation(GiveInformation {
                player: 2,
                cards: vec![1, 3],
                information: Information::Value(4),
            }),
            r#"{"GiveInformation":{"PlayerIndex":2,"Cards":[1,3],"Value":4}}"#,
        );
        round_trip(Action::Play(3), r#"{"Play":{"Index":3}}"#);
        round_trip(Action::Discard(3), r#"{"Discard":{"Index":3}}"#);
    }

    #[test]
    fn malformed_messages_are_rejected_after_decoding() {
        match decode_action(r#"{"Play":{"Index":1},"Discard":{"Index":2}}"#) {
            Err(WireError::Malformed(MalformedAction::MultipleSubActions)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        match decode_action("{}") {
            Err(WireError::Malformed(MalformedAction::NoSubAction)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        let message: ActionMessage =
            serde_json::from_str(r#"{"GiveInformation":{"PlayerIndex":1,"Cards":[]}}"#).unwrap();
        assert_eq!(
            message.invalid_reason(),
            Some(MalformedAction::NoInformationType)
        );
    }

    #[test]
    fn bad_colors_fail_to_decode() {
        let result = decode_action(r#"{"GiveInformation":{"PlayerIndex":1,"Cards":[0],"Color":"PURPLE"}}"#);
        assert!(matches!(result, Err(WireError::Json(_))));
        let result = decode_action(r#"{"GiveInformation":{"PlayerIndex":1,"Cards":[0],"Color":3}}"#);
        assert!(matches!(result, Err(WireError::Json(_))));
    }

    #[test]
    fn action_requests_key_hands_by_player() {
        let mut other_players_cards = BTreeMap::new();
        other_players_cards.insert(1, vec![Card::new(Color::Red, 1)]);
        let transmission = Transmission {
            action_request: Some(ActionRequest {
                other_players_cards,
                my_card_count: 5,
                blue_tokens: 8,
                red_tokens: 3,
            }),
            observation: None,
        };
        let data = serde_json::to_string(&transmission).unwrap();
        assert_eq!(
            data,
            r#"{"ActionRequest":{"OtherPlayersCards":{"1":[{"Value":1,"Color":"RED"}]},"MyCardCount":5,"BlueTokens":8,"RedTokens":3}}"#
        );
        let decoded: Transmission = serde_json::from_str(&data).unwrap();
        assert_eq!(decoded, transmission);
    }

    #[test]
    fn observations_carry_the_action() {
        let transmission = Transmission {
            action_request: None,
            observation: Some(Observation {
                actor: 0,
                action: ActionMessage::from(&Action::Discard(2)),
            }),
        };
        assert_eq!(
            serde_json::to_string(&transmission).unwrap(),
            r#"{"Observation":{"Actor":0,"Action":{"Discard":{"Index":2}}}}"#
        );
    }
}
