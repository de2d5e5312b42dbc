use blackjack::{Owner, RoundEvent, RoundState, StatsSnapshot};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// Turns engine events into terminal output.
pub struct Renderer {
    json: bool,
    pace: Duration,
}

impl Renderer {
    pub fn new(json: bool, pace: Duration) -> Self {
        Self { json, pace }
    }

    /// Prints `events` in order. In text mode the dealer's own draws are
    /// spaced out by the configured pace.
    pub fn show<W: Write>(&self, out: &mut W, events: &[RoundEvent]) -> io::Result<()> {
        let mut dealer_playing = false;
        for event in events {
            if self.json {
                let line = serde_json::to_string(event)?;
                writeln!(out, "{line}")?;
                continue;
            }

            if let RoundEvent::StateChanged { to, .. } = event {
                dealer_playing = *to == RoundState::DealerTurn;
            }
            if dealer_playing && event.is_dealer_draw() && !self.pace.is_zero() {
                out.flush()?;
                thread::sleep(self.pace);
            }
            if let Some(line) = describe(event) {
                writeln!(out, "{line}")?;
            }
        }
        out.flush()
    }

    pub fn message<W: Write>(&self, out: &mut W, text: &str) -> io::Result<()> {
        if self.json {
            let line = serde_json::json!({ "type": "message", "text": text });
            writeln!(out, "{line}")
        } else {
            writeln!(out, "{text}")
        }
    }
}

/// Text line for one event, if it is worth showing.
pub fn describe(event: &RoundEvent) -> Option<String> {
    let line = match event {
        RoundEvent::StateChanged { to, .. } => match to {
            RoundState::PlayerTurn => "Your move: hit, stand or double.".to_string(),
            RoundState::DealerTurn => "Dealer plays.".to_string(),
            _ => return None,
        },
        RoundEvent::BalanceChanged { balance, bet: 0 } => format!("Balance {balance}"),
        RoundEvent::BalanceChanged { balance, bet } => format!("Balance {balance}, bet {bet}"),
        RoundEvent::CardDealt {
            owner: Owner::Player,
            card,
            ..
        } => format!("You draw {card}"),
        RoundEvent::CardDealt {
            owner: Owner::Dealer,
            face_up: false,
            ..
        } => "Dealer takes a face-down card".to_string(),
        RoundEvent::CardDealt {
            owner: Owner::Dealer,
            card,
            ..
        } => format!("Dealer draws {card}"),
        RoundEvent::HoleCardRevealed { card } => format!("Dealer reveals {card}"),
        RoundEvent::TotalsChanged {
            player_total,
            dealer_visible_total,
        } => format!("  You {player_total} | Dealer {dealer_visible_total}"),
        RoundEvent::RoundResolved {
            resolution, payout, ..
        } => match payout {
            0 => resolution.to_string(),
            won => format!("{resolution} (+{won})"),
        },
        RoundEvent::StatsChanged { stats } => format!(
            "Record {}-{}-{}, streak {}",
            stats.wins, stats.losses, stats.pushes, stats.current_streak
        ),
    };
    Some(line)
}

pub fn describe_stats(stats: &StatsSnapshot) -> String {
    let recent: String = stats
        .recent
        .iter()
        .map(|mark| match mark {
            1 => 'W',
            0 => 'P',
            _ => 'L',
        })
        .collect();
    let win_rate = stats
        .win_rate()
        .map(|rate| format!("{:.0}%", rate * 100.0))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "Games {}  Wins {}  Losses {}  Pushes {}\n\
         Streak {} (best {})  Biggest win {}  Win rate {}\n\
         Recent [{}]",
        stats.games_played,
        stats.wins,
        stats.losses,
        stats.pushes,
        stats.current_streak,
        stats.best_streak,
        stats.biggest_win,
        win_rate,
        recent
    )
}
