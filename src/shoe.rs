use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::rules::DECK_SIZE;
use crate::Card;

/// The cards still available to deal. Cards leave from the back of the vector.
#[derive(Debug, Clone)]
pub struct Shoe<R = StdRng> {
    cards: Vec<Card>,
    rng: R,
}

impl Shoe<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Shoe<R> {
    /// A freshly shuffled 52-card shoe.
    pub fn new(rng: R) -> Self {
        let mut shoe = Self {
            cards: Vec::with_capacity(DECK_SIZE),
            rng,
        };
        shoe.reset();
        shoe
    }

    /// A shoe whose next draws come out in exactly `draw_order`. Once those
    /// run out the shoe reshuffles a full deck like any other.
    pub fn stacked(draw_order: &[Card], rng: R) -> Self {
        Self {
            cards: draw_order.iter().rev().copied().collect(),
            rng,
        }
    }

    /// Replace the contents with the canonical 52 cards in a uniformly random order.
    pub fn reset(&mut self) {
        self.cards = Card::full_deck();
        // Fisher-Yates
        for i in (1..self.cards.len()).rev() {
            let j = self.rng.gen_range(0..=i);
            self.cards.swap(i, j);
        }
        debug!("shoe reshuffled: {} cards", self.cards.len());
    }

    /// Never fails: an empty shoe is reshuffled before drawing.
    pub fn draw(&mut self) -> Card {
        loop {
            if let Some(card) = self.cards.pop() {
                return card;
            }
            debug!("shoe exhausted, reshuffling before draw");
            self.reset();
        }
    }

    pub fn remaining_count(&self) -> usize {
        self.cards.len()
    }
}
