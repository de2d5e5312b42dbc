use crate::{Hand, Ledger, Owner, RoundError, Shoe, StatsSnapshot, StatsTracker, TableRules};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundState {
    Idle,
    Dealing,
    PlayerTurn,
    DealerTurn,
    Resolved,
}

impl RoundState {
    /// A round is underway and owns the stake.
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            RoundState::Dealing | RoundState::PlayerTurn | RoundState::DealerTurn
        )
    }
}

impl fmt::Display for RoundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundState::Idle => "idle",
            RoundState::Dealing => "dealing",
            RoundState::PlayerTurn => "player turn",
            RoundState::DealerTurn => "dealer turn",
            RoundState::Resolved => "resolved",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Hit,
    Stand,
    Double,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Hit => "hit",
            Action::Stand => "stand",
            Action::Double => "double",
        };
        f.write_str(name)
    }
}

/// Cards in play for one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub(crate) shoe: Shoe,
    pub(crate) player: Hand,
    pub(crate) dealer: Hand,
    pub(crate) hole_revealed: bool,
    pub(crate) doubled: bool,
}

impl Round {
    pub(crate) fn new(shoe: Shoe) -> Self {
        Self {
            shoe,
            player: Hand::new(Owner::Player),
            dealer: Hand::new(Owner::Dealer),
            hole_revealed: false,
            doubled: false,
        }
    }

    pub fn player(&self) -> &Hand {
        &self.player
    }

    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    pub fn hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    pub fn doubled(&self) -> bool {
        self.doubled
    }

    pub fn cards_remaining(&self) -> usize {
        self.shoe.len()
    }

    /// Dealer total the player is allowed to see.
    pub fn dealer_visible_total(&self) -> u8 {
        if self.hole_revealed {
            self.dealer.value()
        } else {
            self.dealer.up_card_value()
        }
    }
}

/// Everything that persists between commands: money, stats, and the live
/// round. Owned by the caller and handed to each engine command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub(crate) ledger: Ledger,
    pub(crate) stats: StatsTracker,
    pub(crate) state: RoundState,
    pub(crate) round: Option<Round>,
}

impl GameSession {
    pub fn new(rules: &TableRules) -> Self {
        Self {
            ledger: Ledger::new(rules.starting_balance),
            stats: StatsTracker::with_capacity(rules.history_len),
            state: RoundState::Idle,
            round: None,
        }
    }

    pub fn balance(&self) -> u64 {
        self.ledger.balance()
    }

    pub fn current_bet(&self) -> u64 {
        self.ledger.current_bet()
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Most recent round, kept after resolution until the next deal.
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn player_hand(&self) -> Option<&Hand> {
        self.round.as_ref().map(Round::player)
    }

    pub fn dealer_hand(&self) -> Option<&Hand> {
        self.round.as_ref().map(Round::dealer)
    }

    pub fn hole_revealed(&self) -> bool {
        self.round.as_ref().is_some_and(Round::hole_revealed)
    }

    pub fn player_total(&self) -> u8 {
        self.round.as_ref().map_or(0, |round| round.player.value())
    }

    pub fn dealer_visible_total(&self) -> u8 {
        self.round.as_ref().map_or(0, Round::dealer_visible_total)
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub(crate) fn round_mut(&mut self, action: Action) -> Result<&mut Round, RoundError> {
        let state = self.state;
        self.round
            .as_mut()
            .ok_or(RoundError::InvalidAction { action, state })
    }

    /// Adds funds between rounds. Returns the new balance.
    pub fn top_up(&mut self, amount: u64) -> Result<u64, RoundError> {
        if self.state.is_live() {
            return Err(RoundError::IllegalState(self.state));
        }
        let balance = self.ledger.top_up(amount);
        log::info!("balance topped up by {amount} to {balance}");
        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_from_rules() {
        let session = GameSession::new(&TableRules::default());
        assert_eq!(session.balance(), 1000);
        assert_eq!(session.current_bet(), 0);
        assert_eq!(session.state(), RoundState::Idle);
        assert!(session.round().is_none());
        assert_eq!(session.player_total(), 0);
        assert_eq!(session.dealer_visible_total(), 0);
        assert_eq!(session.stats(), StatsSnapshot::default());
    }

    #[test]
    fn test_top_up_rejected_during_live_round() {
        let mut session = GameSession::new(&TableRules::default());
        session.state = RoundState::PlayerTurn;
        assert_eq!(
            session.top_up(500),
            Err(RoundError::IllegalState(RoundState::PlayerTurn))
        );
        assert_eq!(session.balance(), 1000);

        session.state = RoundState::Resolved;
        assert_eq!(session.top_up(500), Ok(1500));
    }

    #[test]
    fn test_state_names() {
        assert_eq!(RoundState::PlayerTurn.to_string(), "player turn");
        assert_eq!(Action::Double.to_string(), "double");
        assert!(RoundState::Dealing.is_live());
        assert!(!RoundState::Resolved.is_live());
    }
}
