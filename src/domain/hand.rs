use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::eval;

/// Рука игрока или дилера. Очки не хранятся — всегда считаются из карт.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn score(&self) -> u32 {
        eval::score(&self.cards)
    }

    pub fn is_blackjack(&self) -> bool {
        eval::is_blackjack(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        eval::is_bust(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        eval::is_soft(&self.cards)
    }
}
