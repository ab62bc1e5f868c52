use fnv::FnvHashMap;
use std::collections::VecDeque;
use std::fmt;
use tracing::debug;

use crate::cards::*;
use crate::error::GameError;
use crate::helpers::PerPlayer;

pub type Player = u32;
pub type HandIndex = usize;

pub type Score = u32;
pub const PERFECT_SCORE: Score = 25;

pub const MAX_INFORMATION_TOKENS: u32 = 8;
pub const STARTING_ERROR_TOKENS: u32 = 3;

// represents possible settings for the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOptions {
    pub num_players: u32,
    pub hand_size: u32,
    // when hits 0, you cannot give information
    pub num_information_tokens: u32,
    // when hits 0, you lose
    pub num_error_tokens: u32,
}
impl GameOptions {
    pub fn for_players(num_players: usize) -> Result<GameOptions, GameError> {
        let hand_size = match num_players {
            2 | 3 => 5,
            4 | 5 => 4,
            _ => return Err(GameError::InvalidPlayerCount(num_players)),
        };
        Ok(GameOptions {
            num_players: num_players as u32,
            hand_size,
            num_information_tokens: MAX_INFORMATION_TOKENS,
            num_error_tokens: STARTING_ERROR_TOKENS,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}
impl Outcome {
    pub fn won(self) -> bool {
        self == Outcome::Won
    }
}

/// Top value of each color's pile; 0 is an empty pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PileHeights([Value; 5]);
impl PileHeights {
    pub fn new() -> PileHeights {
        PileHeights::default()
    }

    pub fn height(&self, color: Color) -> Value {
        self.0[color.index()]
    }

    pub fn is_playable(&self, card: &Card) -> bool {
        card.value == self.height(card.color) + 1
    }

    // caller checks is_playable first
    fn place(&mut self, card: &Card) {
        debug_assert!(self.is_playable(card));
        self.0[card.color.index()] = card.value;
    }

    pub fn complete(&self, color: Color) -> bool {
        self.height(color) == FINAL_VALUE
    }

    pub fn all_complete(&self) -> bool {
        COLORS.iter().all(|&color| self.complete(color))
    }

    pub fn score(&self) -> Score {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Color, Value)> + '_ {
        COLORS.iter().map(move |&color| (color, self.height(color)))
    }
}
impl fmt::Display for PileHeights {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let piles = self
            .iter()
            .map(|(color, height)| format!("{}{}", color.short_name(), height))
            .collect::<Vec<_>>();
        f.write_str(&piles.join(" "))
    }
}

// complete game state (known to nobody!)
#[derive(Debug, Clone)]
pub struct GameState {
    pub opts: GameOptions,
    pub hands: PerPlayer<Cards>,
    // drawn from the front
    pub draw_pile: VecDeque<Card>,
    pub piles: PileHeights,
    // discarded cards and failed plays
    pub discard: Cards,

    pub information_tokens: u32,
    pub error_tokens: u32,

    // which turn is it?
    pub turn: u32,
    // whose turn is it?
    pub player: Player,

    pub outcome: Option<Outcome>,
}
impl GameState {
    /// Deals `deck` round-robin, one card per player at a time, and keeps
    /// the rest as the draw pile in deck order.
    pub fn new(opts: &GameOptions, deck: Cards, first_player: Player) -> GameState {
        let mut draw_pile: VecDeque<Card> = deck.into();
        let mut hands = PerPlayer::new(opts.num_players, |_| Cards::new());
        for _ in 0..opts.hand_size {
            for (_, hand) in hands.iter_mut() {
                if let Some(card) = draw_pile.pop_front() {
                    hand.push(card);
                }
            }
        }

        GameState {
            opts: *opts,
            hands,
            draw_pile,
            piles: PileHeights::new(),
            discard: Cards::new(),
            information_tokens: opts.num_information_tokens,
            error_tokens: opts.num_error_tokens,
            turn: 1,
            player: first_player % opts.num_players,
            outcome: None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn score(&self) -> Score {
        self.piles.score()
    }

    pub fn player_to_left(&self, player: Player) -> Player {
        (player + 1) % self.opts.num_players
    }

    /// Every card still in play or already used up; always the deck size.
    pub fn card_count(&self) -> usize {
        let in_hands: usize = self.hands.iter().map(|(_, hand)| hand.len()).sum();
        self.draw_pile.len() + in_hands + self.discard.len() + self.score() as usize
    }

    // get the game state view of a particular player
    pub fn get_view(&self, player: Player) -> PlayerView<'_> {
        let other_hands = self
            .hands
            .iter()
            .filter(|&(other, _)| other != player)
            .map(|(other, hand)| (other, hand.as_slice()))
            .collect();
        PlayerView {
            player,
            other_hands,
            hand_size: self.hands[player].len(),
            information_tokens: self.information_tokens,
            error_tokens: self.error_tokens,
            piles: &self.piles,
            draw_pile_size: self.draw_pile.len(),
        }
    }

    pub(crate) fn take_from_hand(&mut self, player: Player, index: HandIndex) -> Card {
        self.hands[player].remove(index)
    }

    /// Fills the vacated position from the front of the draw pile. With an
    /// empty draw pile the hand stays one card shorter.
    pub(crate) fn draw_replacement(&mut self, player: Player, index: HandIndex) -> Option<Card> {
        let drawn = self.draw_pile.pop_front()?;
        debug!("Player {} drew new card, {}", player, drawn);
        self.hands[player].insert(index, drawn);
        Some(drawn)
    }

    pub(crate) fn discard_card(&mut self, card: Card) {
        self.discard.push(card);
    }

    pub(crate) fn add_information_token(&mut self) {
        if self.information_tokens < MAX_INFORMATION_TOKENS {
            self.information_tokens += 1;
        }
    }

    /// Returns whether the card landed on its pile.
    pub(crate) fn play_card(&mut self, card: Card) -> bool {
        if self.piles.is_playable(&card) {
            self.piles.place(&card);
            if self.piles.all_complete() {
                self.outcome = Some(Outcome::Won);
            }
            true
        } else {
            self.discard.push(card);
            self.error_tokens -= 1;
            if self.error_tokens == 0 {
                self.outcome = Some(Outcome::Lost);
            }
            false
        }
    }

    pub(crate) fn end_turn(&mut self) {
        self.turn += 1;
        self.player = self.player_to_left(self.player);
    }
}
impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("==========================\n")?;
        f.write_str("Hands:\n")?;
        f.write_str("==========================\n")?;
        for (player, hand) in self.hands.iter() {
            writeln!(f, "player {} hand: [{}]", player, summarize(hand))?;
        }
        f.write_str("==========================\n")?;
        f.write_str("Board:\n")?;
        f.write_str("==========================\n")?;
        writeln!(f, "Turn {} (Player {}'s turn)", self.turn, self.player)?;
        writeln!(f, "{} cards remaining in draw pile", self.draw_pile.len())?;
        writeln!(
            f,
            "{}/{} information tokens remaining",
            self.information_tokens, MAX_INFORMATION_TOKENS
        )?;
        writeln!(
            f,
            "{}/{} error tokens remaining",
            self.error_tokens, self.opts.num_error_tokens
        )?;
        writeln!(f, "Piles: {}", self.piles)?;
        writeln!(f, "Discard: [{}]", summarize(&self.discard))
    }
}

/// What the acting player may know: everyone else's cards, but only the
/// size of their own hand.
#[derive(Debug, Clone)]
pub struct PlayerView<'a> {
    // the player whose view it is
    pub player: Player,
    pub other_hands: FnvHashMap<Player, &'a [Card]>,
    pub hand_size: usize,
    pub information_tokens: u32,
    pub error_tokens: u32,
    pub piles: &'a PileHeights,
    pub draw_pile_size: usize,
}
impl<'a> PlayerView<'a> {
    pub fn hand(&self, player: Player) -> Option<&'a [Card]> {
        self.other_hands.get(&player).copied()
    }

    pub fn num_players(&self) -> u32 {
        self.other_hands.len() as u32 + 1
    }

    pub fn player_to_left(&self, player: Player) -> Player {
        (player + 1) % self.num_players()
    }
}
