use thiserror::Error;

/// Validation failures reported to the caller. The round state is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Insufficient funds: bet {bet} exceeds bankroll {bankroll}")]
    InsufficientFunds { bet: u64, bankroll: u64 },
    #[error("Bet must be greater than zero")]
    ZeroBet,
    #[error("Invalid table config: {0}")]
    InvalidConfig(String),
}
