use crate::blackjack::rules::BlackjackRules;
use crate::domain::card::Card;
use crate::domain::deck::Deck;
use crate::domain::hand::Hand;
use crate::engine::{EngineError, RandomSource};

/// Свежая перемешанная колода на один раунд.
pub fn create_deck<R: RandomSource>(rng: &mut R) -> Deck {
    let mut deck = Deck::standard_52();
    rng.shuffle(&mut deck.cards);
    deck
}

/// Должен ли дилер брать карту по правилам заведения (стоит на 17).
///
/// Пошаговый API: клиент сам решает, с какой паузой вызывать
/// `dealer_draw_one`, engine ничего не ждёт и не планирует.
pub fn dealer_should_draw(hand: &Hand) -> bool {
    BlackjackRules::default().dealer_should_draw(hand)
}

/// Дилер берёт одну карту из колоды.
pub fn dealer_draw_one(deck: &mut Deck, hand: &mut Hand) -> Result<Card, EngineError> {
    let card = deck.draw_one().ok_or(EngineError::DeckExhausted)?;
    hand.push(card);
    Ok(card)
}
