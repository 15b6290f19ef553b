//! Dealer auto-play.
//!
//! The dealer's turn is a finite sequence of draws. [`DealerDraws`] yields
//! them one at a time so a caller can pace the reveal however it likes;
//! [`play_dealer`] runs the sequence to completion and returns the log.

use std::iter::FusedIterator;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{dealer_should_hit, Card, Hand, Shoe};

/// One dealer draw and the dealer's total right after it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerStep {
    pub card: Card,
    pub value: u8,
}

pub struct DealerDraws<'a, R: Rng> {
    hand: &'a mut Hand,
    shoe: &'a mut Shoe<R>,
}

impl<'a, R: Rng> DealerDraws<'a, R> {
    pub fn new(hand: &'a mut Hand, shoe: &'a mut Shoe<R>) -> Self {
        Self { hand, shoe }
    }
}

impl<R: Rng> Iterator for DealerDraws<'_, R> {
    type Item = DealerStep;

    fn next(&mut self) -> Option<DealerStep> {
        if !dealer_should_hit(self.hand.cards()) {
            return None;
        }
        let card = self.shoe.draw();
        self.hand.add_card(card);
        Some(DealerStep {
            card,
            value: self.hand.value(),
        })
    }
}

// Once the dealer stands the hand only grows on a new turn.
impl<R: Rng> FusedIterator for DealerDraws<'_, R> {}

/// Draw for the dealer until the hand stands or busts.
pub fn play_dealer<R: Rng>(hand: &mut Hand, shoe: &mut Shoe<R>) -> Vec<DealerStep> {
    DealerDraws::new(hand, shoe).collect()
}
