use crate::{HandOutcome, PayoutRatio, RoundError};
use serde::{Deserialize, Serialize};

/// Chip values offered when building a wager.
pub const CHIP_DENOMINATIONS: [u64; 4] = [50, 100, 500, 1000];

/// Money moved by a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Stake that was riding on the round
    pub stake: u64,
    /// Amount credited back to the balance, stake included
    pub credited: u64,
    /// Winnings above the stake
    pub payout: u64,
}

/// Player balance and the wager committed to the live round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    balance: u64,
    current_bet: u64,
}

impl Ledger {
    pub fn new(balance: u64) -> Self {
        Self {
            balance,
            current_bet: 0,
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    /// Deducts the stake for a new round, clamping `bet` to the balance.
    pub fn commit(&mut self, bet: u64) -> Result<u64, RoundError> {
        if bet == 0 {
            return Err(RoundError::InvalidBet);
        }
        if self.balance == 0 {
            return Err(RoundError::InsufficientBalance {
                required: bet,
                available: 0,
            });
        }
        let stake = bet.min(self.balance);
        if stake < bet {
            log::warn!("bet {bet} exceeds balance, clamped to {stake}");
        }
        self.balance -= stake;
        self.current_bet = stake;
        Ok(stake)
    }

    /// Matches the current bet from the balance. Returns the doubled bet.
    pub fn double_down(&mut self) -> Result<u64, RoundError> {
        if self.balance < self.current_bet {
            return Err(RoundError::InsufficientBalance {
                required: self.current_bet,
                available: self.balance,
            });
        }
        self.balance -= self.current_bet;
        self.current_bet *= 2;
        Ok(self.current_bet)
    }

    /// Pays out the current bet according to `outcome` and clears it.
    pub fn settle(&mut self, outcome: HandOutcome, blackjack_payout: PayoutRatio) -> Settlement {
        let stake = self.current_bet;
        let payout = match outcome {
            HandOutcome::Win => stake,
            HandOutcome::NaturalWin => blackjack_payout.calculate_payout(stake),
            HandOutcome::Push | HandOutcome::Loss => 0,
        };
        let credited = match outcome {
            HandOutcome::Loss => 0,
            _ => stake.saturating_add(payout),
        };
        self.balance = self.balance.saturating_add(credited);
        self.current_bet = 0;
        Settlement {
            stake,
            credited,
            payout,
        }
    }

    /// External refill. Returns the new balance.
    pub fn top_up(&mut self, amount: u64) -> u64 {
        self.balance = self.balance.saturating_add(amount);
        self.balance
    }
}

/// Wager being assembled from chips before a deal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetSlip {
    amount: u64,
}

impl BetSlip {
    pub fn new(amount: u64) -> Self {
        Self { amount }
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Adds a chip without letting the slip exceed `balance`.
    pub fn add_chip(&mut self, chip: u64, balance: u64) -> u64 {
        let room = balance.saturating_sub(self.amount);
        self.amount += chip.min(room);
        self.amount
    }

    pub fn remove_chip(&mut self, chip: u64) -> u64 {
        self.amount = self.amount.saturating_sub(chip);
        self.amount
    }

    pub fn clear(&mut self) {
        self.amount = 0;
    }
}
