use crate::Card;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

pub const BLACKJACK: u8 = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    Player,
    Dealer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandOutcome {
    Win,
    Loss,
    Push,
    NaturalWin,
}

impl HandOutcome {
    pub fn is_win(&self) -> bool {
        matches!(self, HandOutcome::Win | HandOutcome::NaturalWin)
    }
}

/// Why a round ended. The outcome follows from the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    PlayerBust,
    DoubledBust,
    DealerBust,
    BothBust,
    PlayerHigher,
    DealerHigher,
    EqualTotals,
    Natural,
    BothNatural,
}

impl Resolution {
    pub fn outcome(&self) -> HandOutcome {
        match self {
            Resolution::PlayerBust | Resolution::DoubledBust | Resolution::DealerHigher => {
                HandOutcome::Loss
            }
            Resolution::DealerBust | Resolution::PlayerHigher => HandOutcome::Win,
            Resolution::BothBust | Resolution::EqualTotals | Resolution::BothNatural => {
                HandOutcome::Push
            }
            Resolution::Natural => HandOutcome::NaturalWin,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Resolution::PlayerBust => "You busted. Dealer wins.",
            Resolution::DoubledBust => "You busted after doubling.",
            Resolution::DealerBust => "Dealer busted! You win!",
            Resolution::BothBust => "Both busted. Push.",
            Resolution::PlayerHigher => "You win!",
            Resolution::DealerHigher => "Dealer wins.",
            Resolution::EqualTotals => "Push.",
            Resolution::Natural => "Blackjack! You win.",
            Resolution::BothNatural => "Push! Both have 21.",
        };
        f.write_str(message)
    }
}

/// Calculate the value of a blackjack hand
pub fn calculate_hand_value(cards: &[Card]) -> u8 {
    let mut total: u16 = 0;
    let mut aces = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total += u16::from(card.value());
    }

    // Each ace may drop from 11 to 1 once
    while total > u16::from(BLACKJACK) && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    u8::try_from(total).unwrap_or(u8::MAX)
}

/// Check if a hand is soft (has an ace still counted as 11)
pub fn is_soft_hand(cards: &[Card]) -> bool {
    let hard: u16 = cards.iter().map(|c| u16::from(c.rank.numeric())).sum();
    cards.iter().any(Card::is_ace) && hard + 10 == u16::from(calculate_hand_value(cards))
}

pub fn is_busted(cards: &[Card]) -> bool {
    calculate_hand_value(cards) > BLACKJACK
}

/// Two cards worth 21
pub fn is_natural(cards: &[Card]) -> bool {
    cards.len() == 2 && calculate_hand_value(cards) == BLACKJACK
}

/// Settle two final totals. Both busting is a push.
pub fn compare_totals(player: u8, dealer: u8) -> Resolution {
    match (player > BLACKJACK, dealer > BLACKJACK) {
        (true, true) => Resolution::BothBust,
        (true, false) => Resolution::PlayerBust,
        (false, true) => Resolution::DealerBust,
        (false, false) => match player.cmp(&dealer) {
            Ordering::Greater => Resolution::PlayerHigher,
            Ordering::Less => Resolution::DealerHigher,
            Ordering::Equal => Resolution::EqualTotals,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    owner: Owner,
    cards: Vec<Card>,
}

impl Hand {
    pub fn new(owner: Owner) -> Self {
        Self {
            owner,
            cards: Vec::new(),
        }
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn value(&self) -> u8 {
        calculate_hand_value(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft_hand(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        is_busted(&self.cards)
    }

    pub fn is_natural(&self) -> bool {
        is_natural(&self.cards)
    }

    /// Value of the first card alone, ace high. Zero for an empty hand.
    pub fn up_card_value(&self) -> u8 {
        self.cards.first().map(Card::value).unwrap_or(0)
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }
}
