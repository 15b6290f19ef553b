use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    calculate_hand_value, play_dealer, resolve, DealerStep, Hand, Outcome, Shoe, TableConfig,
    TableError, TableObserver, BLACKJACK_VALUE,
};

const PLACE_BET_MESSAGE: &str = "Place your bet to start!";
const GAME_OVER_MESSAGE: &str = "Game Over! You're out of money.";

/// Lifecycle of a single round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    AwaitingBet,
    PlayerTurn,
    DealerTurn,
    Settled,
}

/// Owns one game session: the shoe, the bankroll and the round in progress.
///
/// Every public action is either applied in full or ignored. Actions that do
/// not belong to the current phase are silent no-ops; only a zero bet or one
/// the bankroll cannot cover is reported back as an error.
pub struct RoundController<R: Rng, O: TableObserver> {
    config: TableConfig,
    shoe: Shoe<R>,
    observer: O,
    bankroll: u64,
    bet: u64,
    player: Hand,
    dealer: Hand,
    phase: RoundPhase,
    outcome: Option<Outcome>,
    dealer_draws: Vec<DealerStep>,
}

impl<R: Rng, O: TableObserver> RoundController<R, O> {
    pub fn new(config: TableConfig, shoe: Shoe<R>, observer: O) -> Result<Self, TableError> {
        config.validate()?;

        let mut controller = Self {
            config,
            shoe,
            observer,
            bankroll: config.starting_bankroll,
            bet: 0,
            player: Hand::new(),
            dealer: Hand::new(),
            phase: RoundPhase::AwaitingBet,
            outcome: None,
            dealer_draws: Vec::new(),
        };

        controller.observer.on_bankroll_changed(controller.bankroll);
        controller.observer.on_bet_changed(0);
        controller.observer.on_round_phase_changed(controller.phase);
        controller.observer.on_message(PLACE_BET_MESSAGE);
        Ok(controller)
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn bankroll(&self) -> u64 {
        self.bankroll
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    /// Settlement of the current round, once it reached `Settled`.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Cards the dealer drew during the last dealer turn, in order.
    pub fn dealer_draws(&self) -> &[DealerStep] {
        &self.dealer_draws
    }

    pub fn shoe(&self) -> &Shoe<R> {
        &self.shoe
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The round is over and the bankroll is empty; `new_round` starts a fresh game.
    pub fn is_game_over(&self) -> bool {
        self.phase == RoundPhase::Settled && self.bankroll == 0
    }

    /// Debit the bet and deal two cards each, player first.
    pub fn place_bet(&mut self, amount: u64) -> Result<(), TableError> {
        if self.phase != RoundPhase::AwaitingBet {
            debug!("ignoring bet of {amount} during {:?}", self.phase);
            return Ok(());
        }
        if amount == 0 {
            warn!("rejected zero bet");
            self.observer.on_message("Bet must be greater than zero!");
            return Err(TableError::ZeroBet);
        }
        if amount > self.bankroll {
            warn!("rejected bet of {amount} with bankroll {}", self.bankroll);
            self.observer.on_message("Not enough money!");
            return Err(TableError::InsufficientFunds {
                bet: amount,
                bankroll: self.bankroll,
            });
        }

        self.bet = amount;
        self.bankroll -= amount;
        self.observer.on_bankroll_changed(self.bankroll);
        self.observer.on_bet_changed(self.bet);

        self.deal();
        Ok(())
    }

    fn deal(&mut self) {
        self.player = Hand::new();
        self.dealer = Hand::new();
        self.outcome = None;
        self.dealer_draws.clear();

        for _ in 0..2 {
            self.player.add_card(self.shoe.draw());
            self.dealer.add_card(self.shoe.draw());
        }
        debug!(
            "dealt player {} and dealer up card {}, {} cards left",
            self.player.value(),
            calculate_hand_value(&self.dealer.cards()[..1]),
            self.shoe.remaining_count()
        );

        self.set_phase(RoundPhase::PlayerTurn);
        self.notify_hands();
        self.observer.on_message("Hit or Stand?");

        if self.player.is_blackjack() {
            self.observer.on_message("Blackjack! Checking dealer...");
            self.play_dealer_turn();
        }
    }

    pub fn hit(&mut self) {
        if self.phase != RoundPhase::PlayerTurn {
            debug!("ignoring hit during {:?}", self.phase);
            return;
        }

        self.player.add_card(self.shoe.draw());
        self.notify_hands();

        if self.player.is_busted() {
            // Dealer hand is revealed but not played out
            self.settle();
        } else if self.player.value() == BLACKJACK_VALUE {
            self.observer.on_message("21! Dealer's turn...");
            self.play_dealer_turn();
        }
    }

    pub fn stand(&mut self) {
        if self.phase != RoundPhase::PlayerTurn {
            debug!("ignoring stand during {:?}", self.phase);
            return;
        }
        self.observer.on_message("Dealer's turn...");
        self.play_dealer_turn();
    }

    /// Clear the table after settlement, restoring the starting stake if the
    /// player went broke and reshuffling a thin shoe.
    pub fn new_round(&mut self) {
        if self.phase != RoundPhase::Settled {
            debug!("ignoring new round during {:?}", self.phase);
            return;
        }

        if self.bankroll == 0 {
            self.bankroll = self.config.starting_bankroll;
            info!("bankroll empty, starting a new game with {}", self.bankroll);
            self.observer.on_bankroll_changed(self.bankroll);
        }

        self.bet = 0;
        self.observer.on_bet_changed(0);

        self.player = Hand::new();
        self.dealer = Hand::new();
        self.outcome = None;
        self.dealer_draws.clear();

        if self.shoe.remaining_count() < self.config.reshuffle_threshold {
            debug!(
                "{} cards left, below threshold {}",
                self.shoe.remaining_count(),
                self.config.reshuffle_threshold
            );
            self.shoe.reset();
        }

        self.set_phase(RoundPhase::AwaitingBet);
        self.notify_hands();
        self.observer.on_message(PLACE_BET_MESSAGE);
    }

    fn play_dealer_turn(&mut self) {
        self.set_phase(RoundPhase::DealerTurn);
        self.notify_hands();

        let steps = play_dealer(&mut self.dealer, &mut self.shoe);
        let shown_before = self.dealer.len() - steps.len();
        for (i, step) in steps.iter().enumerate() {
            debug!("dealer draws {} for {}", step.card, step.value);
            self.observer.on_hands_changed(
                self.player.cards(),
                self.player.value(),
                &self.dealer.cards()[..shown_before + i + 1],
                step.value,
                false,
            );
        }
        self.dealer_draws = steps;

        self.settle();
    }

    fn settle(&mut self) {
        let outcome = resolve(&self.player, &self.dealer);
        let payout = outcome.payout(self.bet);
        self.bankroll = self.bankroll.saturating_add(payout);
        self.outcome = Some(outcome);
        info!(
            "round settled: {:?} player {} dealer {}, bet {} paid {}",
            outcome.category,
            self.player.value(),
            self.dealer.value(),
            self.bet,
            payout
        );

        self.set_phase(RoundPhase::Settled);
        self.notify_hands();
        self.observer.on_bankroll_changed(self.bankroll);
        self.observer.on_message(outcome.message());

        if self.bankroll == 0 {
            self.observer.on_message(GAME_OVER_MESSAGE);
        }
    }

    fn set_phase(&mut self, phase: RoundPhase) {
        self.phase = phase;
        self.observer.on_round_phase_changed(phase);
    }

    fn notify_hands(&mut self) {
        let hidden = self.phase == RoundPhase::PlayerTurn;
        let visible = if hidden {
            &self.dealer.cards()[..self.dealer.len().min(1)]
        } else {
            self.dealer.cards()
        };
        self.observer.on_hands_changed(
            self.player.cards(),
            self.player.value(),
            self.dealer.cards(),
            calculate_hand_value(visible),
            hidden,
        );
    }
}

#[cfg(test)]
mod tests;
