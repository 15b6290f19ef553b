use super::*;
use crate::{Card, OutcomeCategory, OutcomeReason, Rank, Suit};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, PartialEq)]
struct HandsEvent {
    player: Vec<Card>,
    player_value: u8,
    dealer: Vec<Card>,
    dealer_value: u8,
    hidden: bool,
}

#[derive(Debug, Default)]
struct Recorder {
    hands: Vec<HandsEvent>,
    messages: Vec<String>,
    bankrolls: Vec<u64>,
    bets: Vec<u64>,
    phases: Vec<RoundPhase>,
}

impl TableObserver for Recorder {
    fn on_hands_changed(
        &mut self,
        player: &[Card],
        player_value: u8,
        dealer: &[Card],
        dealer_value: u8,
        dealer_hole_hidden: bool,
    ) {
        self.hands.push(HandsEvent {
            player: player.to_vec(),
            player_value,
            dealer: dealer.to_vec(),
            dealer_value,
            hidden: dealer_hole_hidden,
        });
    }

    fn on_message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }

    fn on_bankroll_changed(&mut self, amount: u64) {
        self.bankrolls.push(amount);
    }

    fn on_bet_changed(&mut self, amount: u64) {
        self.bets.push(amount);
    }

    fn on_round_phase_changed(&mut self, phase: RoundPhase) {
        self.phases.push(phase);
    }
}

fn c(rank: Rank) -> Card {
    Card::new(rank, Suit::Clubs)
}

/// Deal order is player, dealer, player, dealer, then hits. Padding keeps the
/// shoe above the reshuffle threshold.
fn table(order: &[Rank], padding: usize, config: TableConfig) -> RoundController<ChaCha8Rng, Recorder> {
    let mut cards: Vec<Card> = order.iter().map(|&r| c(r)).collect();
    cards.extend(std::iter::repeat(c(Rank::Two)).take(padding));
    let shoe = Shoe::stacked(&cards, ChaCha8Rng::seed_from_u64(99));
    RoundController::new(config, shoe, Recorder::default()).unwrap()
}

#[test]
fn test_new_announces_initial_state() {
    let game = table(&[], 0, TableConfig::default());
    assert_eq!(game.phase(), RoundPhase::AwaitingBet);
    assert_eq!(game.bankroll(), 1000);
    assert_eq!(game.bet(), 0);
    assert!(game.outcome().is_none());

    let recorder = game.observer();
    assert_eq!(recorder.bankrolls, vec![1000]);
    assert_eq!(recorder.phases, vec![RoundPhase::AwaitingBet]);
    assert_eq!(recorder.messages, vec!["Place your bet to start!"]);
}

#[test]
fn test_new_rejects_invalid_config() {
    let config = TableConfig {
        starting_bankroll: 0,
        ..TableConfig::default()
    };
    let shoe = Shoe::new(ChaCha8Rng::seed_from_u64(1));
    assert!(RoundController::new(config, shoe, ()).is_err());
}

#[test]
fn test_bet_over_bankroll_is_rejected() {
    let mut game = table(&[], 0, TableConfig::default());
    let err = game.place_bet(1001).unwrap_err();
    assert_eq!(
        err,
        TableError::InsufficientFunds {
            bet: 1001,
            bankroll: 1000
        }
    );
    assert_eq!(game.phase(), RoundPhase::AwaitingBet);
    assert_eq!(game.bankroll(), 1000);
    assert_eq!(game.bet(), 0);
    assert_eq!(game.shoe().remaining_count(), 0);
    assert_eq!(game.observer().messages.last().unwrap(), "Not enough money!");
}

#[test]
fn test_zero_bet_is_rejected() {
    let mut game = table(&[], 0, TableConfig::default());
    assert_eq!(game.place_bet(0), Err(TableError::ZeroBet));
    assert_eq!(game.phase(), RoundPhase::AwaitingBet);
}

#[test]
fn test_bet_of_whole_bankroll_is_allowed() {
    let mut game = table(&[Rank::Ten, Rank::Nine, Rank::Seven, Rank::Eight], 20, TableConfig::default());
    game.place_bet(1000).unwrap();
    assert_eq!(game.bankroll(), 0);
    assert_eq!(game.phase(), RoundPhase::PlayerTurn);
}

#[test]
fn test_deal_alternates_player_and_dealer() {
    let mut game = table(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five], 20, TableConfig::default());
    game.place_bet(100).unwrap();

    assert_eq!(game.bankroll(), 900);
    assert_eq!(game.bet(), 100);
    assert_eq!(game.player_hand().cards(), &[c(Rank::Two), c(Rank::Four)]);
    assert_eq!(game.dealer_hand().cards(), &[c(Rank::Three), c(Rank::Five)]);
    assert_eq!(game.phase(), RoundPhase::PlayerTurn);
    assert_eq!(game.observer().bets, vec![0, 100]);
}

#[test]
fn test_hole_card_hidden_during_player_turn() {
    let mut game = table(&[Rank::Two, Rank::King, Rank::Four, Rank::Six], 20, TableConfig::default());
    game.place_bet(100).unwrap();

    let last = game.observer().hands.last().unwrap().clone();
    assert!(last.hidden);
    assert_eq!(last.dealer.len(), 2);
    assert_eq!(last.dealer_value, 10); // up card only
    assert_eq!(last.player_value, 6);
    assert_eq!(game.observer().messages.last().unwrap(), "Hit or Stand?");
}

#[test]
fn test_actions_outside_their_phase_are_ignored() {
    let mut game = table(&[Rank::Ten, Rank::Nine, Rank::Seven, Rank::Eight], 20, TableConfig::default());

    game.hit();
    game.stand();
    game.new_round();
    assert_eq!(game.phase(), RoundPhase::AwaitingBet);
    assert_eq!(game.shoe().remaining_count(), 24);

    game.place_bet(100).unwrap();
    assert!(game.place_bet(100).is_ok());
    game.new_round();
    assert_eq!(game.phase(), RoundPhase::PlayerTurn);
    assert_eq!(game.bankroll(), 900);

    game.stand();
    assert_eq!(game.phase(), RoundPhase::Settled);
    let remaining = game.shoe().remaining_count();
    game.hit();
    game.stand();
    assert!(game.place_bet(50).is_ok());
    assert_eq!(game.shoe().remaining_count(), remaining);
    assert_eq!(game.phase(), RoundPhase::Settled);
}

#[test]
fn test_stand_runs_dealer_and_settles() {
    // player 10+7, dealer 9+6 draws 8 and busts
    let mut game = table(
        &[Rank::Ten, Rank::Nine, Rank::Seven, Rank::Six, Rank::Eight],
        20,
        TableConfig::default(),
    );
    game.place_bet(100).unwrap();
    game.stand();

    let outcome = *game.outcome().unwrap();
    assert_eq!(outcome.category, OutcomeCategory::Win);
    assert_eq!(outcome.reason, OutcomeReason::DealerBust);
    assert_eq!(game.bankroll(), 1100);
    assert_eq!(game.dealer_hand().value(), 23);
    assert_eq!(
        game.dealer_draws(),
        &[DealerStep {
            card: c(Rank::Eight),
            value: 23
        }]
    );
    assert_eq!(
        game.observer().phases,
        vec![
            RoundPhase::AwaitingBet,
            RoundPhase::PlayerTurn,
            RoundPhase::DealerTurn,
            RoundPhase::Settled
        ]
    );
    assert!(game
        .observer()
        .messages
        .iter()
        .any(|m| m == "Dealer busts! You win!"));
}

#[test]
fn test_dealer_draws_are_reported_one_at_a_time() {
    // dealer 2+3 draws 4, 5, 6 to reach 20
    let mut game = table(
        &[Rank::Ten, Rank::Two, Rank::Nine, Rank::Three, Rank::Four, Rank::Five, Rank::Six],
        20,
        TableConfig::default(),
    );
    game.place_bet(10).unwrap();
    let before = game.observer().hands.len();
    game.stand();

    let events = &game.observer().hands[before..];
    let dealer_sizes: Vec<usize> = events.iter().map(|e| e.dealer.len()).collect();
    // reveal, three draws, settlement
    assert_eq!(dealer_sizes, vec![2, 3, 4, 5, 5]);
    assert!(events.iter().all(|e| !e.hidden));
    assert_eq!(events[0].dealer_value, 5);
    let values: Vec<u8> = game.dealer_draws().iter().map(|s| s.value).collect();
    assert_eq!(values, vec![9, 14, 20]);
    assert_eq!(game.outcome().unwrap().reason, OutcomeReason::LowerTotal);
    assert_eq!(game.bankroll(), 990);
}

#[test]
fn test_hit_bust_settles_without_dealer_turn() {
    let mut game = table(
        &[Rank::Ten, Rank::Nine, Rank::Six, Rank::Two, Rank::King],
        20,
        TableConfig::default(),
    );
    game.place_bet(100).unwrap();
    game.hit();

    assert_eq!(game.phase(), RoundPhase::Settled);
    assert_eq!(game.player_hand().value(), 26);
    assert_eq!(game.dealer_hand().len(), 2);
    assert!(game.dealer_draws().is_empty());
    assert_eq!(game.shoe().remaining_count(), 20);
    assert_eq!(game.outcome().unwrap().category, OutcomeCategory::Lose);
    assert_eq!(game.bankroll(), 900);
    assert!(!game.observer().phases.contains(&RoundPhase::DealerTurn));

    let last = game.observer().hands.last().unwrap();
    assert!(!last.hidden);
    assert_eq!(last.dealer_value, 11);
    assert!(game.observer().messages.iter().any(|m| m == "Bust! You lose."));
}

#[test]
fn test_hit_below_21_keeps_player_turn() {
    let mut game = table(
        &[Rank::Two, Rank::Nine, Rank::Three, Rank::Eight, Rank::Four],
        20,
        TableConfig::default(),
    );
    game.place_bet(100).unwrap();
    game.hit();
    assert_eq!(game.phase(), RoundPhase::PlayerTurn);
    assert_eq!(game.player_hand().value(), 9);
    assert!(game.observer().hands.last().unwrap().hidden);
}

#[test]
fn test_hit_to_21_forces_dealer_turn() {
    // player 5+6 hits K, dealer 10+7 stands
    let mut game = table(
        &[Rank::Five, Rank::Ten, Rank::Six, Rank::Seven, Rank::King],
        20,
        TableConfig::default(),
    );
    game.place_bet(100).unwrap();
    game.hit();

    assert_eq!(game.phase(), RoundPhase::Settled);
    assert!(game.observer().messages.iter().any(|m| m == "21! Dealer's turn..."));
    let outcome = game.outcome().unwrap();
    assert_eq!(outcome.category, OutcomeCategory::Win);
    assert_eq!(game.bankroll(), 1100);
}

#[test]
fn test_natural_blackjack_skips_player_actions() {
    let mut game = table(&[Rank::Ace, Rank::Ten, Rank::King, Rank::Nine], 20, TableConfig::default());
    game.place_bet(200).unwrap();

    assert_eq!(game.phase(), RoundPhase::Settled);
    assert_eq!(game.outcome().unwrap().category, OutcomeCategory::Blackjack);
    assert_eq!(game.bankroll(), 1300);
    assert!(game
        .observer()
        .messages
        .iter()
        .any(|m| m == "Blackjack! Checking dealer..."));
}

#[test]
fn test_natural_blackjack_dealer_still_draws_to_17() {
    // dealer 10+5 draws 9 and busts, which settles as an ordinary win
    let mut game = table(
        &[Rank::Ace, Rank::Ten, Rank::King, Rank::Five, Rank::Nine],
        20,
        TableConfig::default(),
    );
    game.place_bet(100).unwrap();

    assert_eq!(game.dealer_draws().len(), 1);
    assert_eq!(game.outcome().unwrap().reason, OutcomeReason::DealerBust);
    assert_eq!(game.bankroll(), 1100);
}

#[test]
fn test_both_blackjack_push_returns_stake() {
    let mut game = table(&[Rank::Ace, Rank::Ace, Rank::King, Rank::Queen], 20, TableConfig::default());
    game.place_bet(100).unwrap();
    assert_eq!(game.outcome().unwrap().reason, OutcomeReason::BothBlackjack);
    assert_eq!(game.bankroll(), 1000);
}

#[test]
fn test_dealer_blackjack_beats_standing_player() {
    let mut game = table(&[Rank::Ten, Rank::Ace, Rank::Queen, Rank::King], 20, TableConfig::default());
    game.place_bet(100).unwrap();
    assert_eq!(game.phase(), RoundPhase::PlayerTurn);
    game.stand();
    assert_eq!(game.outcome().unwrap().reason, OutcomeReason::DealerBlackjack);
    assert_eq!(game.bankroll(), 900);
}

#[test]
fn test_new_round_clears_table() {
    let mut game = table(
        &[Rank::Ten, Rank::Nine, Rank::Nine, Rank::Ten],
        30,
        TableConfig::default(),
    );
    game.place_bet(100).unwrap();
    game.stand();
    assert_eq!(game.outcome().unwrap().category, OutcomeCategory::Push);

    game.new_round();
    assert_eq!(game.phase(), RoundPhase::AwaitingBet);
    assert_eq!(game.bet(), 0);
    assert_eq!(game.bankroll(), 1000);
    assert!(game.player_hand().is_empty());
    assert!(game.dealer_hand().is_empty());
    assert!(game.outcome().is_none());
    assert!(game.dealer_draws().is_empty());
    assert_eq!(game.shoe().remaining_count(), 30);
    assert_eq!(game.observer().bets.last(), Some(&0));
    assert_eq!(game.observer().messages.last().unwrap(), "Place your bet to start!");
}

#[test]
fn test_new_round_reshuffles_thin_shoe() {
    let mut game = table(&[Rank::Ten, Rank::Nine, Rank::Nine, Rank::Ten], 10, TableConfig::default());
    game.place_bet(100).unwrap();
    game.stand();
    assert_eq!(game.shoe().remaining_count(), 10);

    game.new_round();
    assert_eq!(game.shoe().remaining_count(), 52);
}

#[test]
fn test_new_round_keeps_shoe_at_threshold() {
    let mut game = table(&[Rank::Ten, Rank::Nine, Rank::Nine, Rank::Ten], 15, TableConfig::default());
    game.place_bet(100).unwrap();
    game.stand();
    game.new_round();
    assert_eq!(game.shoe().remaining_count(), 15);
}

#[test]
fn test_broke_player_gets_starting_stake_back() {
    let config = TableConfig {
        starting_bankroll: 100,
        ..TableConfig::default()
    };
    // player 10+6 stands against dealer 10+9
    let mut game = table(&[Rank::Ten, Rank::Ten, Rank::Six, Rank::Nine], 20, config);
    game.place_bet(100).unwrap();
    game.stand();

    assert_eq!(game.bankroll(), 0);
    assert!(game.is_game_over());
    assert_eq!(
        game.observer().messages.last().unwrap(),
        "Game Over! You're out of money."
    );

    game.new_round();
    assert!(!game.is_game_over());
    assert_eq!(game.bankroll(), 100);
    assert_eq!(game.phase(), RoundPhase::AwaitingBet);
    assert_eq!(game.observer().bankrolls.last(), Some(&100));
}

#[test]
fn test_many_random_rounds_keep_invariants() {
    let shoe = Shoe::new(ChaCha8Rng::seed_from_u64(2718));
    let mut game = RoundController::new(TableConfig::default(), shoe, ()).unwrap();

    for round in 0..300u64 {
        let bet = (round % 7 + 1) * 25;
        let bet = bet.min(game.bankroll());
        game.place_bet(bet).unwrap();
        while game.phase() == RoundPhase::PlayerTurn {
            if game.player_hand().value() < 15 {
                game.hit();
            } else {
                game.stand();
            }
        }
        assert_eq!(game.phase(), RoundPhase::Settled);
        let outcome = game.outcome().unwrap();
        if outcome.reason != OutcomeReason::PlayerBust {
            assert!(game.dealer_hand().value() >= 17 || game.player_hand().is_blackjack());
        }
        game.new_round();
        assert!(game.bankroll() > 0);
        assert!(game.shoe().remaining_count() >= 15);
    }
}
