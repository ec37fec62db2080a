use rand::prelude::*;
use rand_mt::Mt;

use crate::card::{Card, Suits, N_CARDS, N_RANKS};

pub type CardDeck = [Card; N_CARDS as usize];

// random pair swaps done by the swap shuffle
const N_SWAPS: usize = 1000;

/// Unshuffled combined deck: pack after pack, suit after suit, ace to king
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn ordered_deck(suits: Suits) -> CardDeck {
    let per_pack = usize::from(suits.count() * N_RANKS);
    core::array::from_fn(|i| {
        let j = i % per_pack;
        Card::new((j % N_RANKS as usize) as u8 + 1, (j / N_RANKS as usize) as u8)
    })
}

#[must_use]
pub fn default_shuffle(suits: Suits, seed: u64) -> CardDeck {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut cards = ordered_deck(suits);
    cards.shuffle(&mut rng);
    cards
}

pub fn uniform_int<R: RngCore>(a: u32, b: u32, rng: &mut R) -> u32 {
    const B_RANGE: u32 = u32::MAX;

    let range = b - a;
    let bucket_size = B_RANGE / (range + 1) + u32::from(B_RANGE % (range + 1) == range);
    loop {
        let val = rng.next_u32() / bucket_size;
        if val <= range {
            return val + a;
        }
    }
}

/// Fisher-Yates over a Mersenne Twister, stable across `rand` releases
#[must_use]
pub fn mt_shuffle(suits: Suits, seed: u32) -> CardDeck {
    let mut cards = ordered_deck(suits);
    let mut rng = Mt::new(seed);

    #[allow(clippy::cast_possible_truncation)]
    for i in (1..cards.len()).rev() {
        let val = uniform_int(0, i as u32, &mut rng);
        cards.swap(i, val as usize);
    }
    cards
}

/// Random transpositions of the ordered deck
#[must_use]
pub fn swap_shuffle(suits: Suits, seed: u32) -> CardDeck {
    let mut cards = ordered_deck(suits);
    let mut rng = Mt::new(seed);

    for _ in 0..N_SWAPS {
        let a = rng.next_u32() % u32::from(N_CARDS);
        let b = rng.next_u32() % u32::from(N_CARDS);
        cards.swap(a as usize, b as usize);
    }
    cards
}
