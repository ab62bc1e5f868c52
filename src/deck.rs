use rand::prelude::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use tracing::trace;

use crate::cards::*;

// the full multiset, grouped by color then value
pub fn new_deck() -> Cards {
    let mut deck: Cards = Cards::with_capacity(TOTAL_CARDS as usize);

    for &color in COLORS.iter() {
        for &value in VALUES.iter() {
            for _ in 0..get_count_for_value(value) {
                deck.push(Card::new(color, value));
            }
        }
    }
    debug_assert_eq!(deck.len(), TOTAL_CARDS as usize);
    deck
}

pub fn shuffle<R: Rng + ?Sized>(mut deck: Cards, rng: &mut R) -> Cards {
    deck.shuffle(rng);
    trace!("Shuffled deck: {:?}", deck);
    deck
}

pub fn new_shuffled_deck(seed: u64) -> Cards {
    shuffle(new_deck(), &mut ChaChaRng::seed_from_u64(seed))
}
