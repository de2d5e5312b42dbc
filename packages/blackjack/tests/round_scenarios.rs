use blackjack::{
    Card, HandOutcome, Owner, Rank, Resolution, RoundEngine, RoundError, RoundEvent, RoundState,
    Shoe, Suit, TableRules,
};
use serde_json::json;

fn stacked(ranks: &[Rank]) -> Shoe {
    Shoe::stacked(ranks.iter().map(|rank| Card::new(*rank, Suit::Hearts)))
}

#[test]
fn bust_scenario() {
    let engine = RoundEngine::seeded(TableRules::default(), 1).unwrap();
    let mut session = engine.new_session();

    engine
        .start_round_with_shoe(
            &mut session,
            100,
            stacked(&[Rank::Nine, Rank::Ten, Rank::Nine, Rank::Eight, Rank::Seven]),
        )
        .unwrap();
    assert_eq!(session.balance(), 900);

    let events = engine.hit(&mut session).unwrap();
    assert_eq!(session.player_total(), 25);
    assert!(events.contains(&RoundEvent::RoundResolved {
        outcome: HandOutcome::Loss,
        resolution: Resolution::PlayerBust,
        payout: 0,
    }));
    assert_eq!(session.balance(), 900);
    assert_eq!(session.stats().losses, 1);
    assert_eq!(session.stats().current_streak, 0);
}

#[test]
fn natural_scenario() {
    let engine = RoundEngine::seeded(TableRules::default(), 1).unwrap();
    let mut session = engine.new_session();

    let events = engine
        .start_round_with_shoe(
            &mut session,
            100,
            stacked(&[Rank::Ace, Rank::Nine, Rank::King, Rank::Seven]),
        )
        .unwrap();
    assert_eq!(session.balance(), 1150);
    assert_eq!(session.state(), RoundState::Resolved);
    assert!(events.contains(&RoundEvent::RoundResolved {
        outcome: HandOutcome::NaturalWin,
        resolution: Resolution::Natural,
        payout: 150,
    }));
}

#[test]
fn six_to_five_table_pays_less_on_naturals() {
    let rules = TableRules {
        blackjack_payout: "6:5".parse().unwrap(),
        ..TableRules::default()
    };
    let engine = RoundEngine::seeded(rules, 1).unwrap();
    let mut session = engine.new_session();

    engine
        .start_round_with_shoe(
            &mut session,
            100,
            stacked(&[Rank::Ace, Rank::Nine, Rank::Queen, Rank::Seven]),
        )
        .unwrap();
    assert_eq!(session.balance(), 1120);
}

#[test]
fn double_refused_without_funds() {
    let rules = TableRules {
        starting_balance: 150,
        ..TableRules::default()
    };
    let engine = RoundEngine::seeded(rules, 1).unwrap();
    let mut session = engine.new_session();
    engine
        .start_round_with_shoe(
            &mut session,
            100,
            stacked(&[Rank::Five, Rank::Ten, Rank::Six, Rank::Seven]),
        )
        .unwrap();

    let err = engine.double(&mut session).unwrap_err();
    assert_eq!(
        err,
        RoundError::InsufficientBalance {
            required: 100,
            available: 50
        }
    );
    assert_eq!(
        err.to_string(),
        "insufficient balance: required 100, available 50"
    );
    assert_eq!(session.state(), RoundState::PlayerTurn);
    assert_eq!(session.player_hand().map(|hand| hand.len()), Some(2));
    assert_eq!(session.balance(), 50);

    // the player can still finish the hand
    engine.stand(&mut session).unwrap();
    assert_eq!(session.state(), RoundState::Resolved);
    assert_eq!(session.balance(), 50);
}

#[test]
fn broke_session_needs_top_up() {
    let rules = TableRules {
        starting_balance: 100,
        ..TableRules::default()
    };
    let engine = RoundEngine::seeded(rules, 1).unwrap();
    let mut session = engine.new_session();
    engine
        .start_round_with_shoe(
            &mut session,
            100,
            stacked(&[Rank::Ten, Rank::Ten, Rank::Six, Rank::Nine]),
        )
        .unwrap();
    engine.stand(&mut session).unwrap();
    assert_eq!(session.balance(), 0);

    let err = engine
        .start_round_with_shoe(&mut session, 100, stacked(&[]))
        .unwrap_err();
    assert!(matches!(err, RoundError::InsufficientBalance { .. }));
    assert_eq!(session.state(), RoundState::Resolved);

    session.top_up(engine.rules().starting_balance).unwrap();
    assert_eq!(session.balance(), 100);
}

#[test]
fn hit_after_resolution_is_rejected() {
    let engine = RoundEngine::seeded(TableRules::default(), 1).unwrap();
    let mut session = engine.new_session();
    engine
        .start_round_with_shoe(
            &mut session,
            100,
            stacked(&[Rank::Ace, Rank::Nine, Rank::King, Rank::Seven, Rank::Two]),
        )
        .unwrap();
    let balance = session.balance();

    let err = engine.hit(&mut session).unwrap_err();
    assert_eq!(err.to_string(), "cannot hit while the round is resolved");
    assert_eq!(session.balance(), balance);
    assert_eq!(session.player_hand().map(|hand| hand.len()), Some(2));
}

#[test]
fn events_serialize_with_type_tag() {
    let card_dealt = RoundEvent::CardDealt {
        owner: Owner::Dealer,
        card: Card::new(Rank::Queen, Suit::Diamonds),
        face_up: false,
    };
    assert_eq!(
        serde_json::to_value(&card_dealt).unwrap(),
        json!({
            "type": "card_dealt",
            "owner": "dealer",
            "card": { "rank": "queen", "suit": "diamonds" },
            "face_up": false,
        })
    );

    let resolved = RoundEvent::RoundResolved {
        outcome: HandOutcome::NaturalWin,
        resolution: Resolution::Natural,
        payout: 150,
    };
    assert_eq!(
        serde_json::to_value(&resolved).unwrap(),
        json!({
            "type": "round_resolved",
            "outcome": "natural_win",
            "resolution": "natural",
            "payout": 150,
        })
    );

    let state = RoundEvent::StateChanged {
        from: RoundState::PlayerTurn,
        to: RoundState::DealerTurn,
    };
    let line = serde_json::to_string(&state).unwrap();
    assert_eq!(
        line,
        r#"{"type":"state_changed","from":"player_turn","to":"dealer_turn"}"#
    );
    assert_eq!(serde_json::from_str::<RoundEvent>(&line).unwrap(), state);
}

#[test]
fn stats_snapshot_serializes_all_fields() {
    let mut engine = RoundEngine::seeded(TableRules::default(), 5).unwrap();
    let mut session = engine.new_session();
    let events = engine.start_round(&mut session, 100).unwrap();
    let events = if session.state() == RoundState::PlayerTurn {
        engine.stand(&mut session).unwrap()
    } else {
        events
    };

    let stats = events
        .iter()
        .find(|event| matches!(event, RoundEvent::StatsChanged { .. }))
        .map(|event| serde_json::to_value(event).unwrap())
        .unwrap();
    for key in [
        "games_played",
        "wins",
        "losses",
        "pushes",
        "current_streak",
        "best_streak",
        "biggest_win",
        "recent",
    ] {
        assert!(stats["stats"].get(key).is_some(), "missing {key}");
    }
    assert_eq!(stats["stats"]["games_played"], 1);
}
