use crate::rules::{BLACKJACK_VALUE, DEALER_STAND_VALUE};
use crate::Card;
use serde::{Deserialize, Serialize};

/// Calculate the value of a blackjack hand
pub fn calculate_hand_value(cards: &[Card]) -> u8 {
    let (total, _) = reduce_aces(cards);
    u8::try_from(total).unwrap_or(u8::MAX)
}

/// Running total after ace reduction, plus how many aces still count as 11.
fn reduce_aces(cards: &[Card]) -> (u16, u8) {
    let mut total: u16 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total += u16::from(card.value());
    }

    // Count aces as 1 instead of 11 until the hand fits
    while total > u16::from(BLACKJACK_VALUE) && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    (total, aces)
}

/// Check if a hand is soft (an ace is still counted as 11)
pub fn is_soft_hand(cards: &[Card]) -> bool {
    let (_, aces_as_eleven) = reduce_aces(cards);
    aces_as_eleven > 0
}

/// Check if a hand is busted
pub fn is_busted(cards: &[Card]) -> bool {
    calculate_hand_value(cards) > BLACKJACK_VALUE
}

/// Check if a hand is blackjack (21 with 2 cards)
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && calculate_hand_value(cards) == BLACKJACK_VALUE
}

/// Dealer stands on every 17, soft or hard.
pub fn dealer_should_hit(cards: &[Card]) -> bool {
    calculate_hand_value(cards) < DEALER_STAND_VALUE
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn from_cards(cards: &[Card]) -> Self {
        Self {
            cards: cards.to_vec(),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn value(&self) -> u8 {
        calculate_hand_value(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft_hand(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        is_busted(&self.cards)
    }

    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }
}
