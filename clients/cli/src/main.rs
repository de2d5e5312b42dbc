mod command;
mod render;
mod table;

use blackjack::{PayoutRatio, RoundEngine, RoundError, TableRules};
use clap::Parser;
use command::Command;
use render::Renderer;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use table::{Reply, Table};

type BoxErr = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(name = "blackjack-cli", about = "Single-seat blackjack at the terminal")]
struct Cli {
    /// Opening balance, also the amount offered when the balance runs out
    #[arg(long, env = "BLACKJACK_BALANCE", default_value_t = 1000)]
    balance: u64,

    /// Wager used by `deal` when the bet slip is empty
    #[arg(long, env = "BLACKJACK_BET", default_value_t = 100)]
    bet: u64,

    /// Seed for reproducible shuffles
    #[arg(long, env = "BLACKJACK_SEED")]
    seed: Option<u64>,

    /// Pause before each dealer draw, in milliseconds
    #[arg(long, env = "BLACKJACK_PACE_MS", default_value_t = 380)]
    pace_ms: u64,

    /// Dealer hits soft 17
    #[arg(long, env = "DEALER_HITS_SOFT_17", default_value_t = false, action = clap::ArgAction::Set)]
    dealer_hits_soft_17: bool,

    /// Blackjack payout ratio (e.g. "3:2")
    #[arg(long, env = "BLACKJACK_PAYOUT", default_value = "3:2")]
    blackjack_payout: String,

    /// Print events as JSON lines instead of text
    #[arg(long)]
    json: bool,
}

fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), BoxErr> {
    let blackjack_payout: PayoutRatio = cli.blackjack_payout.parse()?;
    let rules = TableRules {
        starting_balance: cli.balance,
        dealer_hits_soft_17: cli.dealer_hits_soft_17,
        blackjack_payout,
        ..TableRules::default()
    };
    let engine = match cli.seed {
        Some(seed) => RoundEngine::seeded(rules, seed)?,
        None => RoundEngine::from_entropy(rules)?,
    };
    log::debug!("table rules: {rules:?}");

    let renderer = Renderer::new(cli.json, Duration::from_millis(cli.pace_ms));
    let mut table = Table::new(engine, cli.bet);
    let mut out = io::stdout().lock();

    renderer.message(&mut out, &format!("Balance {}. Type `help` for commands.", cli.balance))?;
    if !cli.json {
        write!(out, "> ")?;
        out.flush()?;
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            match line.parse::<Command>() {
                Ok(command) => match table.execute(command) {
                    Ok(Reply::Quit) => break,
                    Ok(Reply::Events(events)) => renderer.show(&mut out, &events)?,
                    Ok(Reply::Message(text)) => renderer.message(&mut out, &text)?,
                    Err(RoundError::ShoeExhausted) => return Err(RoundError::ShoeExhausted.into()),
                    Err(e) => {
                        log::debug!("{command:?} rejected: {e}");
                        renderer.message(&mut out, &e.to_string())?;
                    }
                },
                Err(e) => renderer.message(&mut out, &e.to_string())?,
            }
        }
        if !cli.json {
            write!(out, "> ")?;
            out.flush()?;
        }
    }

    log::info!(
        "leaving the table with {} after {} rounds",
        table.session().balance(),
        table.session().stats().games_played
    );
    Ok(())
}
