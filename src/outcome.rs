use serde::{Deserialize, Serialize};

use crate::{Hand, PayoutRatio};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeCategory {
    Win,
    Blackjack,
    Lose,
    Push,
}

/// Which settlement rule decided the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeReason {
    PlayerBust,
    DealerBust,
    PlayerBlackjack,
    DealerBlackjack,
    BothBlackjack,
    HigherTotal,
    LowerTotal,
    EqualTotal,
}

impl OutcomeReason {
    pub fn category(&self) -> OutcomeCategory {
        match self {
            OutcomeReason::DealerBust | OutcomeReason::HigherTotal => OutcomeCategory::Win,
            OutcomeReason::PlayerBlackjack => OutcomeCategory::Blackjack,
            OutcomeReason::PlayerBust
            | OutcomeReason::DealerBlackjack
            | OutcomeReason::LowerTotal => OutcomeCategory::Lose,
            OutcomeReason::BothBlackjack | OutcomeReason::EqualTotal => OutcomeCategory::Push,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            OutcomeReason::PlayerBust => "Bust! You lose.",
            OutcomeReason::DealerBust => "Dealer busts! You win!",
            OutcomeReason::PlayerBlackjack => "Blackjack! You win!",
            OutcomeReason::DealerBlackjack => "Dealer has Blackjack!",
            OutcomeReason::BothBlackjack => "Both Blackjack! Push.",
            OutcomeReason::HigherTotal => "You win!",
            OutcomeReason::LowerTotal => "Dealer wins!",
            OutcomeReason::EqualTotal => "Push! It's a tie.",
        }
    }
}

impl OutcomeCategory {
    pub fn multiplier(&self) -> PayoutRatio {
        match self {
            OutcomeCategory::Blackjack => PayoutRatio::BLACKJACK_RETURN,
            OutcomeCategory::Win => PayoutRatio::WIN_RETURN,
            OutcomeCategory::Push => PayoutRatio::PUSH_RETURN,
            OutcomeCategory::Lose => PayoutRatio::LOSS_RETURN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub category: OutcomeCategory,
    pub reason: OutcomeReason,
    pub multiplier: PayoutRatio,
}

impl Outcome {
    fn from_reason(reason: OutcomeReason) -> Self {
        let category = reason.category();
        Self {
            category,
            reason,
            multiplier: category.multiplier(),
        }
    }

    /// Amount credited back to the bankroll, original stake included.
    pub fn payout(&self, bet: u64) -> u64 {
        self.multiplier.calculate_payout(bet)
    }

    pub fn message(&self) -> &'static str {
        self.reason.message()
    }
}

/// Settle two finished hands. Rules are checked in order and the first match
/// wins, so a player bust loses even if the dealer also busted.
pub fn resolve(player: &Hand, dealer: &Hand) -> Outcome {
    let player_blackjack = player.is_blackjack();
    let dealer_blackjack = dealer.is_blackjack();

    let reason = if player.is_busted() {
        OutcomeReason::PlayerBust
    } else if dealer.is_busted() {
        OutcomeReason::DealerBust
    } else if player_blackjack && !dealer_blackjack {
        OutcomeReason::PlayerBlackjack
    } else if dealer_blackjack && !player_blackjack {
        OutcomeReason::DealerBlackjack
    } else if player_blackjack && dealer_blackjack {
        OutcomeReason::BothBlackjack
    } else {
        match player.value().cmp(&dealer.value()) {
            std::cmp::Ordering::Greater => OutcomeReason::HigherTotal,
            std::cmp::Ordering::Less => OutcomeReason::LowerTotal,
            std::cmp::Ordering::Equal => OutcomeReason::EqualTotal,
        }
    };

    Outcome::from_reason(reason)
}
