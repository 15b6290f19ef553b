use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use blackjack_engine::{Card, RoundController, RoundPhase, Shoe, TableConfig, TableObserver};
use clap::Parser;
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

type BoxErr = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(name = "blackjack", about = "Play single-player blackjack against the dealer")]
struct Args {
    /// JSON table config file
    #[arg(long, env = "BLACKJACK_CONFIG")]
    config: Option<PathBuf>,

    /// Starting bankroll (overrides the config file)
    #[arg(long)]
    bankroll: Option<u64>,

    /// Reshuffle when fewer cards than this remain (overrides the config file)
    #[arg(long)]
    reshuffle_threshold: Option<usize>,

    /// Seed for a reproducible shoe
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between dealer draws, in milliseconds
    #[arg(long, default_value = "600")]
    pace_ms: u64,
}

/// Prints every table update to stdout.
struct Terminal {
    phase: RoundPhase,
    pace: Duration,
}

fn render(cards: &[Card], hide_hole: bool) -> String {
    cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            if hide_hole && i == 1 {
                "??".to_string()
            } else {
                card.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl TableObserver for Terminal {
    fn on_hands_changed(
        &mut self,
        player: &[Card],
        player_value: u8,
        dealer: &[Card],
        dealer_value: u8,
        dealer_hole_hidden: bool,
    ) {
        if player.is_empty() {
            return;
        }
        if self.phase == RoundPhase::DealerTurn {
            thread::sleep(self.pace);
        }
        let dealer_score = if dealer_hole_hidden {
            "?".to_string()
        } else {
            dealer_value.to_string()
        };
        println!("  dealer: {} ({})", render(dealer, dealer_hole_hidden), dealer_score);
        println!("  you:    {} ({})", render(player, false), player_value);
    }

    fn on_message(&mut self, text: &str) {
        println!("{text}");
    }

    fn on_bankroll_changed(&mut self, amount: u64) {
        println!("bankroll: ${amount}");
    }

    fn on_bet_changed(&mut self, amount: u64) {
        if amount > 0 {
            println!("current bet: ${amount}");
        }
    }

    fn on_round_phase_changed(&mut self, phase: RoundPhase) {
        self.phase = phase;
    }
}

fn load_config(args: &Args) -> Result<TableConfig, BoxErr> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str(&raw)?
        }
        None => TableConfig::default(),
    };
    if let Some(bankroll) = args.bankroll {
        config.starting_bankroll = bankroll;
    }
    if let Some(threshold) = args.reshuffle_threshold {
        config.reshuffle_threshold = threshold;
    }
    Ok(config)
}

fn prompt(phase: RoundPhase, game_over: bool) -> &'static str {
    match phase {
        RoundPhase::AwaitingBet => "bet <amount> | quit",
        RoundPhase::PlayerTurn => "hit | stand | quit",
        RoundPhase::DealerTurn => "",
        RoundPhase::Settled if game_over => "new (reset game) | quit",
        RoundPhase::Settled => "new | quit",
    }
}

fn main() -> Result<(), BoxErr> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;

    let rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let observer = Terminal {
        phase: RoundPhase::AwaitingBet,
        pace: Duration::from_millis(args.pace_ms),
    };
    let mut game = RoundController::new(config, Shoe::new(rng), observer)?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("[{}] > ", prompt(game.observer().phase, game.is_game_over()));
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let was_settled = game.phase() == RoundPhase::Settled;
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (Some("bet"), Some(amount)) => match amount.parse::<u64>() {
                Ok(amount) => {
                    if let Err(e) = game.place_bet(amount) {
                        log::debug!("bet rejected: {e}");
                    }
                }
                Err(_) => println!("not a whole amount: {amount}"),
            },
            (Some("hit"), None) => game.hit(),
            (Some("stand"), None) => game.stand(),
            (Some("new"), None) => game.new_round(),
            (Some("quit"), None) => break,
            (None, _) => continue,
            _ => println!("unknown command: {}", line.trim()),
        }

        if !was_settled && game.phase() == RoundPhase::Settled && !game.dealer_draws().is_empty() {
            let draws: Vec<String> = game
                .dealer_draws()
                .iter()
                .map(|step| format!("{} -> {}", step.card, step.value))
                .collect();
            log::info!("dealer drew: {}", draws.join(", "));
        }
    }

    println!("leaving the table with ${}", game.bankroll());
    Ok(())
}
