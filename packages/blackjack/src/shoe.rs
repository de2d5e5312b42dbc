use crate::{Card, RoundError};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DECK_SIZE: usize = 52;

/// Undealt cards for the current round. The top of the shoe is the end of
/// `cards`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shoe {
    cards: Vec<Card>,
}

impl Shoe {
    /// Fresh single deck in a uniformly random order.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards: Vec<Card> = (0..DECK_SIZE).filter_map(Card::from_index).collect();
        cards.shuffle(rng);
        Self { cards }
    }

    /// Shoe that deals `order` front to back.
    pub fn stacked<I: IntoIterator<Item = Card>>(order: I) -> Self {
        let mut cards: Vec<Card> = order.into_iter().collect();
        cards.reverse();
        Self { cards }
    }

    pub fn draw(&mut self) -> Result<Card, RoundError> {
        self.cards.pop().ok_or_else(|| {
            log::error!("draw from an empty shoe");
            RoundError::ShoeExhausted
        })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
