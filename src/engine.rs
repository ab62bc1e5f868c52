use rand::Rng;
use tracing::{debug, info, trace};

use crate::action::*;
use crate::cards::Cards;
use crate::deck;
use crate::error::{GameError, Result};
use crate::game::*;
use crate::helpers::PerPlayer;
use crate::observer::GameObserver;
use crate::strategy::PlayerStrategy;
use crate::validation::{self, Violation};

macro_rules! notify {
    ($observers:expr, $method:ident($($arg:expr),*)) => {
        for observer in $observers.iter_mut() {
            observer.$method($($arg),*);
        }
    };
}

/// A game in progress: the state, plus whoever decides and whoever watches.
pub struct Game<'a> {
    pub state: GameState,
    strategies: PerPlayer<Box<dyn PlayerStrategy>>,
    observers: Vec<&'a mut dyn GameObserver>,
    started: bool,
    aborted: bool,
}

impl<'a> Game<'a> {
    /// Shuffles a fresh deck, picks a random first player and deals.
    pub fn initialize<R: Rng>(
        strategies: Vec<Box<dyn PlayerStrategy>>,
        observers: Vec<&'a mut dyn GameObserver>,
        rng: &mut R,
    ) -> Result<Game<'a>> {
        let opts = GameOptions::for_players(strategies.len())?;
        let deck = deck::shuffle(deck::new_deck(), rng);
        let first_player = rng.gen_range(0..opts.num_players);
        Game::with_deck(strategies, observers, deck, first_player)
    }

    /// Deals `deck` as given; its first card is dealt first.
    pub fn with_deck(
        strategies: Vec<Box<dyn PlayerStrategy>>,
        mut observers: Vec<&'a mut dyn GameObserver>,
        deck: Cards,
        first_player: Player,
    ) -> Result<Game<'a>> {
        let opts = GameOptions::for_players(strategies.len())?;
        let state = GameState::new(&opts, deck, first_player);
        debug!("Dealt {} players, player {} starts", opts.num_players, state.player);
        notify!(observers, game_start(state.hands.as_slice(), state.player));

        Ok(Game {
            state,
            strategies: PerPlayer::from(strategies),
            observers,
            started: false,
            aborted: false,
        })
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Runs turns until the game is won or lost. Returns whether it was won.
    pub fn play(&mut self) -> Result<bool> {
        if let Some(outcome) = self.state.outcome {
            return Ok(outcome.won());
        }
        loop {
            if let Some(outcome) = self.take_turn()? {
                return Ok(outcome.won());
            }
        }
    }

    fn start(&mut self) {
        for (player, strategy) in self.strategies.iter_mut() {
            strategy.start_game(&self.state.get_view(player));
        }
        self.started = true;
    }

    /// Plays a single turn. Returns the outcome once the game has ended.
    ///
    /// Any error leaves the state as it was before the turn and aborts the
    /// game for good.
    pub fn take_turn(&mut self) -> Result<Option<Outcome>> {
        if self.aborted {
            return Err(GameError::Aborted);
        }
        if self.state.is_over() {
            return Err(GameError::AlreadyOver);
        }
        if !self.started {
            self.start();
        }

        let player = self.state.player;
        debug!("");
        debug!("=======================================================");
        debug!("Turn {}, Player {} to go", self.state.turn, player);
        debug!("=======================================================");
        trace!("{}", self.state);

        let action = match self.strategies[player].decide(&self.state.get_view(player)) {
            Ok(action) => action,
            Err(source) => {
                self.aborted = true;
                return Err(GameError::Strategy { player, source });
            }
        };
        if let Err(violation) = self.check(player, &action) {
            self.aborted = true;
            info!("Player {} broke the rules with '{}': {}", player, action, violation);
            return Err(GameError::ProtocolViolation {
                player,
                action,
                violation,
            });
        }

        notify!(self.observers, observe_action(player, &action));
        match action {
            Action::GiveInformation(ref give) => self.give_information(give),
            Action::Discard(index) => self.discard(player, index),
            Action::Play(index) => self.play_card(player, index),
        }

        for (other, strategy) in self.strategies.iter_mut() {
            if other != player {
                strategy.observe_action(player, &action);
            }
        }

        self.state.end_turn();
        notify!(
            self.observers,
            turn_complete(
                &self.state.piles,
                self.state.information_tokens,
                self.state.error_tokens
            )
        );

        if let Some(outcome) = self.state.outcome {
            debug!("Final state:\n{}", self.state);
            debug!("SCORE: {:?}", self.state.score());
            notify!(self.observers, game_complete(outcome.won(), &self.state.piles));
        }
        Ok(self.state.outcome)
    }

    // everything that can be wrong with an action, checked before any effect
    fn check(&self, player: Player, action: &Action) -> std::result::Result<(), Violation> {
        match *action {
            Action::GiveInformation(ref give) => {
                if self.state.information_tokens < 1 {
                    return Err(Violation::NotEnoughInformationTokens);
                }
                validation::check_information(player, self.state.hands.as_slice(), give)
            }
            Action::Discard(index) | Action::Play(index) => {
                validation::check_hand_index(index, &self.state.hands[player])
            }
        }
    }

    fn give_information(&mut self, give: &GiveInformation) {
        debug!(
            "Information to player {}, about {} (positions {:?})",
            give.player, give.information, give.cards
        );
        self.state.information_tokens -= 1;
    }

    fn discard(&mut self, player: Player, index: HandIndex) {
        let card = self.state.take_from_hand(player, index);
        debug!("Discard card in position {}, which is {}", index, card);
        notify!(self.observers, observe_discard(player, &card, index));
        self.state.discard_card(card);
        self.replace(player, index);
        self.state.add_information_token();
    }

    fn play_card(&mut self, player: Player, index: HandIndex) {
        let card = self.state.take_from_hand(player, index);
        debug!("Playing card at position {}, which is {}", index, card);
        let successful = self.state.piles.is_playable(&card);
        notify!(self.observers, observe_play(player, &card, index, successful));

        if self.state.play_card(card) {
            debug!("Successfully played {}!", card);
        } else {
            debug!(
                "Removing an error token! Error tokens remaining: {}",
                self.state.error_tokens
            );
        }
        self.replace(player, index);
    }

    fn replace(&mut self, player: Player, index: HandIndex) {
        if let Some(drawn) = self.state.draw_replacement(player, index) {
            notify!(self.observers, observe_draw(player, &drawn, index));
        } else {
            debug!("Nothing left to draw for player {}", player);
        }
    }
}
