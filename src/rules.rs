use serde::{Deserialize, Serialize};

use crate::TableError;

pub const BLACKJACK_VALUE: u8 = 21;

/// The dealer stands on any total at or above this value, soft totals included.
pub const DEALER_STAND_VALUE: u8 = 17;

pub const DECK_SIZE: usize = 52;
pub const DEFAULT_STARTING_BANKROLL: u64 = 1000;
pub const DEFAULT_RESHUFFLE_THRESHOLD: usize = 15;

/// Total return on a bet, stake included, as a ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRatio {
    pub numerator: u16,
    pub denominator: u16,
}

impl PayoutRatio {
    /// Natural blackjack: stake back plus 3:2.
    pub const BLACKJACK_RETURN: Self = Self {
        numerator: 5,
        denominator: 2,
    };
    pub const WIN_RETURN: Self = Self {
        numerator: 2,
        denominator: 1,
    };
    pub const PUSH_RETURN: Self = Self {
        numerator: 1,
        denominator: 1,
    };
    pub const LOSS_RETURN: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    pub fn new(numerator: u16, denominator: u16) -> Result<Self, &'static str> {
        if denominator == 0 {
            return Err("Denominator cannot be zero");
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Rounds down when the bet does not divide evenly.
    pub fn calculate_payout(&self, bet: u64) -> u64 {
        let payout = u128::from(bet) * u128::from(self.numerator) / u128::from(self.denominator);
        u64::try_from(payout).unwrap_or(u64::MAX)
    }
}

/// Table configuration for a single-player session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Bankroll at session start, and after a busted-out player starts over
    pub starting_bankroll: u64,

    /// `new_round` reshuffles when fewer cards than this remain in the shoe
    pub reshuffle_threshold: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_bankroll: DEFAULT_STARTING_BANKROLL,
            reshuffle_threshold: DEFAULT_RESHUFFLE_THRESHOLD,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), TableError> {
        if self.starting_bankroll == 0 {
            return Err(TableError::InvalidConfig(
                "starting bankroll must be greater than zero".to_string(),
            ));
        }
        if self.reshuffle_threshold > DECK_SIZE {
            return Err(TableError::InvalidConfig(format!(
                "reshuffle threshold {} exceeds the {DECK_SIZE}-card shoe",
                self.reshuffle_threshold
            )));
        }
        Ok(())
    }
}
