use crate::{Card, HandOutcome, Owner, Resolution, RoundState, StatsSnapshot};
use serde::{Deserialize, Serialize};

/// Notification emitted by an engine command, in the order things happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoundEvent {
    StateChanged {
        from: RoundState,
        to: RoundState,
    },
    BalanceChanged {
        balance: u64,
        bet: u64,
    },
    CardDealt {
        owner: Owner,
        card: Card,
        face_up: bool,
    },
    /// The dealer's face-down card was turned over.
    HoleCardRevealed {
        card: Card,
    },
    TotalsChanged {
        player_total: u8,
        dealer_visible_total: u8,
    },
    RoundResolved {
        outcome: HandOutcome,
        resolution: Resolution,
        /// Winnings above the returned stake
        payout: u64,
    },
    StatsChanged {
        stats: StatsSnapshot,
    },
}

impl RoundEvent {
    /// Whether this event is a card drawn for the dealer.
    pub fn is_dealer_draw(&self) -> bool {
        matches!(
            self,
            RoundEvent::CardDealt {
                owner: Owner::Dealer,
                ..
            }
        )
    }
}
