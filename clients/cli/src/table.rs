use crate::command::{Command, HELP};
use crate::render::describe_stats;
use blackjack::{BetSlip, GameSession, RoundEngine, RoundError, RoundEvent};

/// What the player sees after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Events(Vec<RoundEvent>),
    Message(String),
    Quit,
}

/// One seat at the table: the engine, the player's session and the chips
/// stacked for the next deal.
pub struct Table {
    engine: RoundEngine,
    session: GameSession,
    slip: BetSlip,
    default_bet: u64,
    refill: u64,
}

impl Table {
    pub fn new(engine: RoundEngine, default_bet: u64) -> Self {
        let session = engine.new_session();
        let refill = engine.rules().starting_balance;
        Self {
            engine,
            session,
            slip: BetSlip::default(),
            default_bet,
            refill,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn execute(&mut self, command: Command) -> Result<Reply, RoundError> {
        let reply = match command {
            Command::Deal(amount) => return self.deal(amount),
            Command::Hit => Reply::Events(self.engine.hit(&mut self.session)?),
            Command::Stand => Reply::Events(self.engine.stand(&mut self.session)?),
            Command::Double => Reply::Events(self.engine.double(&mut self.session)?),
            Command::Chip(value) => self.edit_slip(|slip, balance| slip.add_chip(value, balance)),
            Command::Unchip(value) => self.edit_slip(|slip, _| slip.remove_chip(value)),
            Command::Clear => self.edit_slip(|slip, _| {
                slip.clear();
                0
            }),
            Command::TopUp => self.top_up()?,
            Command::Stats => Reply::Message(describe_stats(&self.session.stats())),
            Command::Help => Reply::Message(HELP.to_string()),
            Command::Quit => Reply::Quit,
        };
        Ok(reply)
    }

    /// Wager for a plain `deal`: the slip, or the default bet capped at the
    /// balance when the slip is empty.
    pub fn next_bet(&self) -> u64 {
        match self.slip.amount() {
            0 => self.default_bet.min(self.session.balance()),
            amount => amount,
        }
    }

    fn deal(&mut self, amount: Option<u64>) -> Result<Reply, RoundError> {
        if self.session.balance() == 0 && !self.session.state().is_live() {
            return Ok(Reply::Message(format!(
                "You are out of chips. Type `topup` to refill {}.",
                self.refill
            )));
        }
        let bet = amount.unwrap_or_else(|| self.next_bet());
        let events = self.engine.start_round(&mut self.session, bet)?;
        Ok(Reply::Events(events))
    }

    fn edit_slip(&mut self, edit: impl FnOnce(&mut BetSlip, u64) -> u64) -> Reply {
        if self.session.state().is_live() {
            return Reply::Message("Finish the current hand first.".to_string());
        }
        let amount = edit(&mut self.slip, self.session.balance());
        Reply::Message(format!("Bet slip: {amount}"))
    }

    fn top_up(&mut self) -> Result<Reply, RoundError> {
        if self.session.balance() > 0 {
            return Ok(Reply::Message(
                "Top-ups are only offered once the balance runs out.".to_string(),
            ));
        }
        let balance = self.session.top_up(self.refill)?;
        Ok(Reply::Message(format!("Balance refilled to {balance}.")))
    }
}
