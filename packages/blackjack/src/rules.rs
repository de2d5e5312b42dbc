use crate::RoundError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Blackjack payout multiplier as a ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRatio {
    pub numerator: u16,
    pub denominator: u16,
}

impl PayoutRatio {
    pub const THREE_TO_TWO: Self = Self {
        numerator: 3,
        denominator: 2,
    };
    pub const SIX_TO_FIVE: Self = Self {
        numerator: 6,
        denominator: 5,
    };
    pub const ONE_TO_ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    pub fn new(numerator: u16, denominator: u16) -> Result<Self, RoundError> {
        if denominator == 0 {
            return Err(RoundError::InvalidRules("payout denominator cannot be zero"));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Winnings on `bet`, rounded down.
    pub fn calculate_payout(&self, bet: u64) -> u64 {
        let payout = (bet as u128 * self.numerator as u128) / self.denominator.max(1) as u128;
        u64::try_from(payout).unwrap_or(u64::MAX)
    }
}

impl FromStr for PayoutRatio {
    type Err = RoundError;

    /// Parses `"N:D"`, e.g. `"3:2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (num, den) = s
            .split_once(':')
            .ok_or(RoundError::InvalidRules("payout ratio must look like N:D"))?;
        let num = num
            .trim()
            .parse()
            .map_err(|_| RoundError::InvalidRules("invalid payout numerator"))?;
        let den = den
            .trim()
            .parse()
            .map_err(|_| RoundError::InvalidRules("invalid payout denominator"))?;
        Self::new(num, den)
    }
}

/// Table configuration for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRules {
    /// Opening balance, also the amount offered when topping up an empty balance
    pub starting_balance: u64,

    /// Dealer stops drawing at this total
    pub dealer_stands_on: u8,

    /// Dealer keeps drawing on a soft total equal to `dealer_stands_on`
    pub dealer_hits_soft_17: bool,

    /// Natural blackjack payout multiplier
    pub blackjack_payout: PayoutRatio,

    /// Number of recent results kept by the stats tracker
    pub history_len: usize,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            starting_balance: 1000,
            dealer_stands_on: 17,
            dealer_hits_soft_17: false,
            blackjack_payout: PayoutRatio::THREE_TO_TWO,
            history_len: 10,
        }
    }
}

impl TableRules {
    /// Default table, but the dealer draws on soft 17
    pub fn hits_soft_17() -> Self {
        Self {
            dealer_hits_soft_17: true,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), RoundError> {
        if self.blackjack_payout.denominator == 0 {
            return Err(RoundError::InvalidRules("payout denominator cannot be zero"));
        }
        if !(2..=21).contains(&self.dealer_stands_on) {
            return Err(RoundError::InvalidRules("dealer stand total must be between 2 and 21"));
        }
        if self.history_len == 0 {
            return Err(RoundError::InvalidRules("history length must be positive"));
        }
        Ok(())
    }

    /// Whether the dealer draws another card to `cards`
    pub fn dealer_should_hit(&self, cards: &[crate::Card]) -> bool {
        let value = crate::calculate_hand_value(cards);
        if value < self.dealer_stands_on {
            true
        } else {
            value == self.dealer_stands_on
                && self.dealer_hits_soft_17
                && crate::is_soft_hand(cards)
        }
    }
}
