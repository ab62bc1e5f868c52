use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use std::collections::VecDeque;

use hanabi_engine::deck::new_deck;
use hanabi_engine::game::{PileHeights, Player};
use hanabi_engine::observer::GameObserver;
use hanabi_engine::strategies::examples::AlwaysPlay;
use hanabi_engine::strategy::{PlayerStrategy, StrategyError};
use hanabi_engine::validation::Violation;
use hanabi_engine::*;

struct Scripted(VecDeque<Action>);

impl PlayerStrategy for Scripted {
    fn name(&self) -> String {
        "scripted".to_string()
    }
    fn decide(&mut self, _: &PlayerView<'_>) -> Result<Action, StrategyError> {
        self.0.pop_front().ok_or(StrategyError::NoLegalAction)
    }
    fn observe_action(&mut self, _: Player, _: &Action) {}
}

fn scripted_pair(first: Vec<Action>) -> Vec<Box<dyn PlayerStrategy>> {
    vec![
        Box::new(Scripted(first.into())),
        Box::new(Scripted(VecDeque::new())),
    ]
}

#[derive(Default)]
struct Tally {
    turns: u32,
    draws: u32,
    result: Option<bool>,
}

impl GameObserver for Tally {
    fn observe_draw(&mut self, _: Player, _: &Card, _: usize) {
        self.draws += 1;
    }
    fn turn_complete(&mut self, _: &PileHeights, _: u32, _: u32) {
        self.turns += 1;
    }
    fn game_complete(&mut self, won: bool, _: &PileHeights) {
        self.result = Some(won);
    }
}

#[test]
fn always_play_terminates() {
    for seed in 0..25 {
        let mut tally = Tally::default();
        let strategies: Vec<Box<dyn PlayerStrategy>> = vec![Box::new(AlwaysPlay), Box::new(AlwaysPlay)];
        let mut rng = ChaChaRng::seed_from_u64(seed);
        let mut game = Game::initialize(strategies, vec![&mut tally], &mut rng).unwrap();
        for (_, hand) in game.state.hands.iter() {
            assert_eq!(hand.len(), 5);
        }
        let won = game.play().unwrap();
        let error_tokens = game.state.error_tokens;
        let piles = game.state.piles;
        drop(game);

        if won {
            assert!(piles.all_complete());
        } else {
            assert_eq!(error_tokens, 0);
        }
        assert_eq!(tally.result, Some(won));
        assert!(tally.turns <= 50 + 5);
        assert!(tally.draws <= tally.turns);
    }
}

#[test]
fn playing_a_red_one_on_empty_piles() {
    let mut tally = Tally::default();
    let mut game = Game::with_deck(scripted_pair(vec![Action::Play(0)]), vec![&mut tally], new_deck(), 0).unwrap();
    game.state.hands[0] = vec![Card::new(Color::Red, 1), Card::new(Color::Blue, 4)];
    let next_draw = game.state.draw_pile[0];

    assert_eq!(game.take_turn().unwrap(), None);
    assert_eq!(game.state.piles.height(Color::Red), 1);
    assert_eq!(game.state.error_tokens, 3);
    assert_eq!(
        game.state.hands[0],
        vec![next_draw, Card::new(Color::Blue, 4)]
    );
    drop(game);
    assert_eq!(tally.draws, 1);
}

#[test]
fn out_of_bounds_play_is_fatal_and_changes_nothing() {
    let mut game = Game::with_deck(scripted_pair(vec![Action::Play(5)]), vec![], new_deck(), 0).unwrap();
    let before = game.state.clone();

    let err = game.take_turn().unwrap_err();
    assert_eq!(
        err.violation(),
        Some(&Violation::HandIndexOutOfBounds { index: 5, len: 5 })
    );
    assert!(err.to_string().contains("out of bounds"));
    assert_eq!(game.state.piles, before.piles);
    assert_eq!(game.state.information_tokens, before.information_tokens);
    assert_eq!(game.state.error_tokens, before.error_tokens);
    assert_eq!(game.state.hands, before.hands);
    assert_eq!(game.state.draw_pile, before.draw_pile);
    assert_eq!(game.state.player, before.player);
    assert!(matches!(game.take_turn(), Err(GameError::Aborted)));
}

fn red_information(cards: Vec<usize>) -> Action {
    Action::GiveInformation(GiveInformation {
        player: 1,
        cards,
        information: Information::Color(Color::Red),
    })
}

fn game_with_target_hand(action: Action) -> Game<'static> {
    let mut game = Game::with_deck(scripted_pair(vec![action]), vec![], new_deck(), 0).unwrap();
    game.state.hands[1] = vec![
        Card::new(Color::Red, 1),
        Card::new(Color::Blue, 2),
        Card::new(Color::Red, 3),
    ];
    game
}

#[test]
fn information_must_be_complete() {
    let mut game = game_with_target_hand(red_information(vec![0, 2]));
    assert_eq!(game.take_turn().unwrap(), None);
    assert_eq!(game.state.information_tokens, 7);

    let mut game = game_with_target_hand(red_information(vec![0]));
    let err = game.take_turn().unwrap_err();
    assert_eq!(
        err.violation(),
        Some(&Violation::ColorOnUnreferencedCard { index: 2 })
    );
    assert_eq!(game.state.information_tokens, 8);
}
