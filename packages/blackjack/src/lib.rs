mod card;
mod engine;
mod error;
mod event;
mod hand;
mod ledger;
mod rules;
mod session;
mod shoe;
mod stats;

pub use card::{Card, Rank, Suit};
pub use engine::RoundEngine;
pub use error::RoundError;
pub use event::RoundEvent;
pub use hand::{
    calculate_hand_value, compare_totals, is_busted, is_natural, is_soft_hand, Hand, HandOutcome,
    Owner, Resolution, BLACKJACK,
};
pub use ledger::{BetSlip, Ledger, Settlement, CHIP_DENOMINATIONS};
pub use rules::{PayoutRatio, TableRules};
pub use session::{Action, GameSession, Round, RoundState};
pub use shoe::{Shoe, DECK_SIZE};
pub use stats::{RoundMark, StatsSnapshot, StatsTracker, DEFAULT_HISTORY_LEN};
