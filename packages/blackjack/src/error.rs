use crate::{Action, RoundState};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundError {
    /// Internal invariant violation: a round never needs the whole deck.
    #[error("shoe exhausted")]
    ShoeExhausted,
    #[error("bet must be greater than zero")]
    InvalidBet,
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: u64, available: u64 },
    #[error("cannot {action} while the round is {state}")]
    InvalidAction { action: Action, state: RoundState },
    #[error("a round is already in progress ({0})")]
    IllegalState(RoundState),
    #[error("invalid table rules: {0}")]
    InvalidRules(&'static str),
}
