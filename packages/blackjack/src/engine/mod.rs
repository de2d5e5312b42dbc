use crate::{
    compare_totals, Action, GameSession, Owner, Resolution, Round, RoundError, RoundEvent,
    RoundState, Shoe, TableRules,
};
use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Cards drawn before the player acts.
const INITIAL_DEAL: usize = 4;

/// Drives rounds for any number of sessions. Holds the table rules and the
/// random source used to shuffle each round's shoe.
#[derive(Debug, Clone)]
pub struct RoundEngine<R = ChaCha8Rng> {
    rules: TableRules,
    rng: R,
}

impl RoundEngine<ChaCha8Rng> {
    /// Reproducible shuffles from a fixed seed.
    pub fn seeded(rules: TableRules, seed: u64) -> Result<Self, RoundError> {
        Self::new(rules, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy(rules: TableRules) -> Result<Self, RoundError> {
        Self::new(rules, ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> RoundEngine<R> {
    pub fn new(rules: TableRules, rng: R) -> Result<Self, RoundError> {
        rules.validate()?;
        Ok(Self { rules, rng })
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    /// Fresh session funded with the table's starting balance.
    pub fn new_session(&self) -> GameSession {
        GameSession::new(&self.rules)
    }

    /// Commits `bet` and deals a new round from a freshly shuffled shoe.
    pub fn start_round(
        &mut self,
        session: &mut GameSession,
        bet: u64,
    ) -> Result<Vec<RoundEvent>, RoundError> {
        check_can_start(session, bet)?;
        let shoe = Shoe::new(&mut self.rng);
        self.start_round_with_shoe(session, bet, shoe)
    }

    /// Same as [`start_round`](Self::start_round) but deals from `shoe`.
    pub fn start_round_with_shoe(
        &self,
        session: &mut GameSession,
        bet: u64,
        shoe: Shoe,
    ) -> Result<Vec<RoundEvent>, RoundError> {
        check_can_start(session, bet)?;
        if shoe.len() < INITIAL_DEAL {
            log::error!("shoe holds {} cards, cannot deal a round", shoe.len());
            return Err(RoundError::ShoeExhausted);
        }

        let mut events = Vec::new();
        if session.state == RoundState::Resolved {
            transition(session, RoundState::Idle, &mut events);
        }

        let stake = session.ledger.commit(bet)?;
        log::debug!("bet {stake} committed, balance {}", session.balance());
        events.push(balance_changed(session));

        transition(session, RoundState::Dealing, &mut events);
        let round = session.round.insert(Round::new(shoe));
        deal(round, Owner::Player, true, &mut events)?;
        deal(round, Owner::Dealer, true, &mut events)?;
        deal(round, Owner::Player, true, &mut events)?;
        deal(round, Owner::Dealer, false, &mut events)?;
        events.push(totals(round));

        if round.player.is_natural() {
            reveal_hole(round, &mut events);
            let resolution = if round.dealer.is_natural() {
                Resolution::BothNatural
            } else {
                Resolution::Natural
            };
            self.resolve(session, resolution, &mut events);
        } else {
            transition(session, RoundState::PlayerTurn, &mut events);
        }

        Ok(events)
    }

    /// Draws one card for the player. A bust ends the round.
    pub fn hit(&self, session: &mut GameSession) -> Result<Vec<RoundEvent>, RoundError> {
        let mut events = Vec::new();
        let round = player_round(session, Action::Hit)?;
        deal(round, Owner::Player, true, &mut events)?;
        events.push(totals(round));

        if round.player.is_busted() {
            reveal_hole(round, &mut events);
            self.resolve(session, Resolution::PlayerBust, &mut events);
        }
        Ok(events)
    }

    /// Ends the player's turn and plays out the dealer.
    pub fn stand(&self, session: &mut GameSession) -> Result<Vec<RoundEvent>, RoundError> {
        let mut events = Vec::new();
        let round = player_round(session, Action::Stand)?;
        reveal_hole(round, &mut events);

        transition(session, RoundState::DealerTurn, &mut events);
        self.play_dealer(session, Action::Stand, &mut events)?;
        Ok(events)
    }

    /// Doubles the stake, draws exactly one card, then plays out the dealer
    /// unless the player busted.
    pub fn double(&self, session: &mut GameSession) -> Result<Vec<RoundEvent>, RoundError> {
        if player_round(session, Action::Double)?.shoe.is_empty() {
            log::error!("no card left to double on");
            return Err(RoundError::ShoeExhausted);
        }
        let bet = session.ledger.double_down()?;
        log::debug!("doubled to {bet}, balance {}", session.balance());

        let mut events = vec![balance_changed(session)];
        let round = session.round_mut(Action::Double)?;
        round.doubled = true;
        deal(round, Owner::Player, true, &mut events)?;
        events.push(totals(round));
        reveal_hole(round, &mut events);

        if round.player.is_busted() {
            self.resolve(session, Resolution::DoubledBust, &mut events);
        } else {
            transition(session, RoundState::DealerTurn, &mut events);
            self.play_dealer(session, Action::Double, &mut events)?;
        }
        Ok(events)
    }

    fn play_dealer(
        &self,
        session: &mut GameSession,
        action: Action,
        events: &mut Vec<RoundEvent>,
    ) -> Result<(), RoundError> {
        let round = session.round_mut(action)?;
        while self.rules.dealer_should_hit(round.dealer.cards()) {
            deal(round, Owner::Dealer, true, events)?;
            events.push(totals(round));
        }

        let resolution = compare_totals(round.player.value(), round.dealer.value());
        self.resolve(session, resolution, events);
        Ok(())
    }

    fn resolve(
        &self,
        session: &mut GameSession,
        resolution: Resolution,
        events: &mut Vec<RoundEvent>,
    ) {
        let outcome = resolution.outcome();
        let settlement = session.ledger.settle(outcome, self.rules.blackjack_payout);
        session.stats.record(outcome, settlement.payout);
        transition(session, RoundState::Resolved, events);

        log::info!(
            "round resolved: {outcome:?} ({resolution}), stake {}, payout {}, balance {}",
            settlement.stake,
            settlement.payout,
            session.balance()
        );

        events.push(RoundEvent::RoundResolved {
            outcome,
            resolution,
            payout: settlement.payout,
        });
        events.push(balance_changed(session));
        events.push(RoundEvent::StatsChanged {
            stats: session.stats(),
        });
    }
}

fn check_can_start(session: &GameSession, bet: u64) -> Result<(), RoundError> {
    if session.state.is_live() {
        return Err(RoundError::IllegalState(session.state));
    }
    if bet == 0 {
        return Err(RoundError::InvalidBet);
    }
    if session.balance() == 0 {
        return Err(RoundError::InsufficientBalance {
            required: bet,
            available: 0,
        });
    }
    Ok(())
}

fn player_round(session: &mut GameSession, action: Action) -> Result<&mut Round, RoundError> {
    if session.state != RoundState::PlayerTurn {
        return Err(RoundError::InvalidAction {
            action,
            state: session.state,
        });
    }
    session.round_mut(action)
}

fn transition(session: &mut GameSession, to: RoundState, events: &mut Vec<RoundEvent>) {
    let from = session.state;
    session.state = to;
    log::debug!("round state {from} -> {to}");
    events.push(RoundEvent::StateChanged { from, to });
}

fn deal(
    round: &mut Round,
    owner: Owner,
    face_up: bool,
    events: &mut Vec<RoundEvent>,
) -> Result<(), RoundError> {
    let card = round.shoe.draw()?;
    match owner {
        Owner::Player => round.player.add_card(card),
        Owner::Dealer => round.dealer.add_card(card),
    }
    if face_up {
        log::debug!("{owner:?} dealt {card}");
    } else {
        log::debug!("{owner:?} dealt a face-down card");
    }
    events.push(RoundEvent::CardDealt {
        owner,
        card,
        face_up,
    });
    Ok(())
}

// No-op once the hole card is showing.
fn reveal_hole(round: &mut Round, events: &mut Vec<RoundEvent>) {
    if round.hole_revealed {
        return;
    }
    round.hole_revealed = true;
    if let Some(card) = round.dealer.cards().get(1).copied() {
        log::debug!("hole card {card}");
        events.push(RoundEvent::HoleCardRevealed { card });
    }
    events.push(totals(round));
}

fn totals(round: &Round) -> RoundEvent {
    RoundEvent::TotalsChanged {
        player_total: round.player.value(),
        dealer_visible_total: round.dealer_visible_total(),
    }
}

fn balance_changed(session: &GameSession) -> RoundEvent {
    RoundEvent::BalanceChanged {
        balance: session.balance(),
        bet: session.current_bet(),
    }
}
