use crate::card::{Card, Suit};
use crate::error::{BlackjackError, Result};
use lazy_static::lazy_static;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

lazy_static! {
    /// The 52 cards in build order: suit major (hearts, diamonds, spades, clubs), rank minor (ace..king).
    static ref BUILD_ORDER: Vec<Card> = Suit::ALL
        .iter()
        .flat_map(|&suit| (Card::ACE..=Card::KING).filter_map(move |rank| Card::new(rank, suit).ok()))
        .collect();
}

/// Trait for anything that can reorder the cards of a shoe.
pub trait Shuffler {
    fn shuffle(&mut self, cards: &mut [Card]);
}

/// Uniform shuffling backed by `rand`. Every pass is a full Fisher-Yates shuffle, so any number of
/// passes is still uniform over all permutations.
pub struct RandomShuffle {
    rng: StdRng,
    passes: u32,
}

impl RandomShuffle {
    /// Associated function for a shuffler seeded from the operating system.
    pub fn new(passes: u32) -> RandomShuffle {
        RandomShuffle {
            rng: StdRng::from_entropy(),
            passes: passes.max(1),
        }
    }

    /// Associated function for a reproducible shuffler, the same seed always produces the same shoes.
    pub fn seeded(seed: u64, passes: u32) -> RandomShuffle {
        RandomShuffle {
            rng: StdRng::seed_from_u64(seed),
            passes: passes.max(1),
        }
    }
}

impl Shuffler for RandomShuffle {
    fn shuffle(&mut self, cards: &mut [Card]) {
        for _ in 0..self.passes {
            cards.shuffle(&mut self.rng);
        }
    }
}

/// Leaves the shoe in build order.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoShuffle;

impl Shuffler for NoShuffle {
    fn shuffle(&mut self, _cards: &mut [Card]) {}
}

/// Stacks the shoe so that `deal_order` is drawn first, in the given order. Cards of the shoe that
/// are not named keep their relative order underneath.
#[derive(Clone, Debug)]
pub struct PresetOrder {
    deal_order: Vec<Card>,
}

impl PresetOrder {
    pub fn new(deal_order: Vec<Card>) -> PresetOrder {
        PresetOrder { deal_order }
    }
}

impl Shuffler for PresetOrder {
    fn shuffle(&mut self, cards: &mut [Card]) {
        let mut stacked: Vec<Card> = Vec::with_capacity(self.deal_order.len());
        for card in &self.deal_order {
            if cards.contains(card) && !stacked.contains(card) {
                stacked.push(*card);
            }
        }

        // The top of the shoe is the end of the slice
        let mut reordered: Vec<Card> = cards
            .iter()
            .filter(|card| !stacked.contains(card))
            .copied()
            .collect();
        reordered.extend(stacked.iter().rev());
        cards.copy_from_slice(&reordered);
    }
}

/// The working set of cards available to be dealt. Cards are drawn from the top and never return
/// until a new shoe is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shoe {
    cards: Vec<Card>,
}

impl Shoe {
    pub const SIZE: usize = 52;

    /// Associated function that builds a full, unshuffled shoe.
    pub fn build() -> Shoe {
        Shoe {
            cards: BUILD_ORDER.clone(),
        }
    }

    /// Reorders every card left in the shoe with `shuffler`.
    pub fn shuffle<S: Shuffler + ?Sized>(&mut self, shuffler: &mut S) {
        shuffler.shuffle(&mut self.cards);
    }

    /// Removes and returns the top card, fails with `ShoeEmpty` when nothing is left.
    pub fn draw(&mut self) -> Result<Card> {
        self.cards.pop().ok_or(BlackjackError::ShoeEmpty)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The cards left in the shoe, bottom first.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Shoe {
    fn default() -> Self {
        Shoe::build()
    }
}
