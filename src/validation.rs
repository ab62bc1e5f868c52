//! Legality checks for actions.
//!
//! Structural checks turn a decoded [`ActionMessage`] into an [`Action`];
//! semantic checks compare an [`Action`] against the real game before any
//! effect is applied.

use thiserror::Error;

use crate::action::*;
use crate::cards::{Card, Cards};
use crate::game::{HandIndex, Player};
use crate::wire::ActionMessage;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedAction {
    #[error("No sub action (GiveInformation, Play, Discard) was set.")]
    NoSubAction,
    #[error("More than one sub action (GiveInformation, Play, Discard) was set.")]
    MultipleSubActions,
    #[error("No information type (Color, Value) was set.")]
    NoInformationType,
    #[error("More than one information type (Color, Value) was set.")]
    MultipleInformationTypes,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("malformed action: {0}")]
    Malformed(#[from] MalformedAction),
    #[error("index ({index}) was out of bounds (len: {len})")]
    HandIndexOutOfBounds { index: HandIndex, len: usize },
    #[error("there is no player {target}")]
    TargetOutOfRange { target: Player },
    #[error("information can't be given to the acting player")]
    InformationToSelf,
    #[error("color does not match referenced card at position {index}")]
    ColorMismatch { index: HandIndex },
    #[error("color matches un-referenced card at position {index}")]
    ColorOnUnreferencedCard { index: HandIndex },
    #[error("value does not match referenced card at position {index}")]
    ValueMismatch { index: HandIndex },
    #[error("value matches un-referenced card at position {index}")]
    ValueOnUnreferencedCard { index: HandIndex },
    #[error("not enough information tokens")]
    NotEnoughInformationTokens,
}

/// Exactly one sub action, and for information exactly one of color/value.
pub fn well_formed(message: ActionMessage) -> Result<Action, MalformedAction> {
    match (message.give_information, message.discard, message.play) {
        (Some(give), None, None) => {
            let information = match (give.color, give.value) {
                (Some(color), None) => Information::Color(color),
                (None, Some(value)) => Information::Value(value),
                (None, None) => return Err(MalformedAction::NoInformationType),
                (Some(_), Some(_)) => return Err(MalformedAction::MultipleInformationTypes),
            };
            Ok(Action::GiveInformation(GiveInformation {
                player: give.player_index,
                cards: give.cards,
                information,
            }))
        }
        (None, Some(discard), None) => Ok(Action::Discard(discard.index)),
        (None, None, Some(play)) => Ok(Action::Play(play.index)),
        (None, None, None) => Err(MalformedAction::NoSubAction),
        _ => Err(MalformedAction::MultipleSubActions),
    }
}

pub fn check_hand_index(index: HandIndex, hand: &[Card]) -> Result<(), Violation> {
    if index >= hand.len() {
        return Err(Violation::HandIndexOutOfBounds {
            index,
            len: hand.len(),
        });
    }
    Ok(())
}

/// The referenced positions must be precisely the positions in the target's
/// hand that match the information.
pub fn check_information(
    actor: Player,
    hands: &[Cards],
    give: &GiveInformation,
) -> Result<(), Violation> {
    let hand = hands
        .get(give.player as usize)
        .ok_or(Violation::TargetOutOfRange {
            target: give.player,
        })?;
    if give.player == actor {
        return Err(Violation::InformationToSelf);
    }
    for &index in &give.cards {
        check_hand_index(index, hand)?;
    }

    for (index, card) in hand.iter().enumerate() {
        let referenced = give.cards.contains(&index);
        let matches = give.information.matches(card);
        if referenced == matches {
            continue;
        }
        return Err(match (give.information, referenced) {
            (Information::Color(_), true) => Violation::ColorMismatch { index },
            (Information::Color(_), false) => Violation::ColorOnUnreferencedCard { index },
            (Information::Value(_), true) => Violation::ValueMismatch { index },
            (Information::Value(_), false) => Violation::ValueOnUnreferencedCard { index },
        });
    }
    Ok(())
}
