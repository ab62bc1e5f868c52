use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use crate::action::*;
use crate::game::*;
use crate::strategy::*;

// dummy, terrible strategy: always plays its first card
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysPlay;

impl PlayerStrategy for AlwaysPlay {
    fn name(&self) -> String {
        "always play".to_string()
    }
    fn decide(&mut self, _: &PlayerView<'_>) -> Result<Action, StrategyError> {
        Ok(Action::Play(0))
    }
    fn observe_action(&mut self, _: Player, _: &Action) {}
}

impl GameStrategy for AlwaysPlay {
    fn initialize(&self, _: Player) -> Box<dyn PlayerStrategy> {
        Box::new(AlwaysPlay)
    }
}

impl GameStrategyConfig for AlwaysPlay {
    fn initialize(&self, _: &GameOptions, _: u64) -> Box<dyn GameStrategy> {
        Box::new(AlwaysPlay)
    }
}

// dummy, terrible strategy: always discards its first card
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysDiscard;

impl PlayerStrategy for AlwaysDiscard {
    fn name(&self) -> String {
        "always discard".to_string()
    }
    fn decide(&mut self, _: &PlayerView<'_>) -> Result<Action, StrategyError> {
        Ok(Action::Discard(0))
    }
    fn observe_action(&mut self, _: Player, _: &Action) {}
}

impl GameStrategy for AlwaysDiscard {
    fn initialize(&self, _: Player) -> Box<dyn PlayerStrategy> {
        Box::new(AlwaysDiscard)
    }
}

impl GameStrategyConfig for AlwaysDiscard {
    fn initialize(&self, _: &GameOptions, _: u64) -> Box<dyn GameStrategy> {
        Box::new(AlwaysDiscard)
    }
}

// dummy, terrible strategy, as an example. Never breaks the rules.
#[derive(Clone)]
pub struct RandomStrategyConfig {
    pub hint_probability: f64,
    pub play_probability: f64,
}

impl GameStrategyConfig for RandomStrategyConfig {
    fn initialize(&self, _: &GameOptions, seed: u64) -> Box<dyn GameStrategy> {
        Box::new(RandomStrategy {
            hint_probability: self.hint_probability,
            play_probability: self.play_probability,
            seed,
        })
    }
}

pub struct RandomStrategy {
    hint_probability: f64,
    play_probability: f64,
    seed: u64,
}
impl GameStrategy for RandomStrategy {
    fn initialize(&self, player: Player) -> Box<dyn PlayerStrategy> {
        Box::new(RandomStrategyPlayer {
            hint_probability: self.hint_probability,
            play_probability: self.play_probability,
            rng: ChaChaRng::seed_from_u64(self.seed ^ (u64::from(player) << 32)),
        })
    }
}

pub struct RandomStrategyPlayer {
    hint_probability: f64,
    play_probability: f64,
    rng: ChaChaRng,
}

impl RandomStrategyPlayer {
    fn give_information(&mut self, view: &PlayerView<'_>) -> Option<Action> {
        if view.information_tokens == 0 {
            return None;
        }
        let target = view.player_to_left(view.player);
        let hand = view.hand(target)?;
        let information = match hand.choose(&mut self.rng) {
            Some(card) if self.rng.gen() => Information::Color(card.color),
            Some(card) => Information::Value(card.value),
            // nothing to point at; this discloses that the hand is empty
            None => Information::Value(1),
        };
        Some(Action::GiveInformation(GiveInformation::describing(
            target,
            hand,
            information,
        )))
    }
}

impl PlayerStrategy for RandomStrategyPlayer {
    fn name(&self) -> String {
        format!(
            "random(hint={}, play={})",
            self.hint_probability, self.play_probability
        )
    }
    fn decide(&mut self, view: &PlayerView<'_>) -> Result<Action, StrategyError> {
        if view.hand_size == 0 {
            return self
                .give_information(view)
                .ok_or(StrategyError::NoLegalAction);
        }
        let index = self.rng.gen_range(0..view.hand_size);
        let p = self.rng.gen::<f64>();
        if p < self.play_probability {
            return Ok(Action::Play(index));
        }
        let must_hint = view.information_tokens == MAX_INFORMATION_TOKENS;
        if must_hint || p < self.play_probability + self.hint_probability {
            if let Some(action) = self.give_information(view) {
                return Ok(action);
            }
        }
        Ok(Action::Discard(index))
    }
    fn observe_action(&mut self, _: Player, _: &Action) {}
}
