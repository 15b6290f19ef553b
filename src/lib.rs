mod card;
mod dealer;
mod error;
mod hand;
mod observer;
mod outcome;
mod round;
mod rules;
mod shoe;

pub use card::{Card, Rank, Suit, SuitColor};
pub use dealer::{play_dealer, DealerDraws, DealerStep};
pub use error::TableError;
pub use hand::{
    calculate_hand_value, dealer_should_hit, is_blackjack, is_busted, is_soft_hand, Hand,
};
pub use observer::TableObserver;
pub use outcome::{resolve, Outcome, OutcomeCategory, OutcomeReason};
pub use round::{RoundController, RoundPhase};
pub use rules::{
    PayoutRatio, TableConfig, BLACKJACK_VALUE, DEALER_STAND_VALUE, DECK_SIZE,
    DEFAULT_RESHUFFLE_THRESHOLD, DEFAULT_STARTING_BANKROLL,
};
pub use shoe::Shoe;
