use crate::domain::card::Card;

/// Лучший возможный счёт руки.
pub const BLACKJACK: u32 = 21;

/// Сумма очков с пересчётом тузов.
///
/// Сначала каждый туз считается за 11. Пока сумма > 21 и остался туз,
/// посчитанный как 11, один такой туз пересчитывается в 1 (минус 10).
/// Результат — максимальный счёт <= 21, либо минимальный перебор,
/// если уйти от перебора нельзя. Карты не изменяются.
pub fn score(cards: &[Card]) -> u32 {
    let (total, _) = score_with_soft_aces(cards);
    total
}

/// Ровно две карты и 21 очко.
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && score(cards) == BLACKJACK
}

pub fn is_bust(cards: &[Card]) -> bool {
    score(cards) > BLACKJACK
}

/// "Мягкая" рука: хотя бы один туз всё ещё считается за 11.
pub fn is_soft(cards: &[Card]) -> bool {
    let (_, soft_aces) = score_with_soft_aces(cards);
    soft_aces > 0
}

/// (итоговый счёт, сколько тузов осталось посчитано за 11).
fn score_with_soft_aces(cards: &[Card]) -> (u32, u32) {
    let mut total: u32 = 0;
    let mut aces: u32 = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
            total += 11;
        } else {
            total += card.value() as u32;
        }
    }

    while total > BLACKJACK && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    (total, aces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::{Rank, Suit};

    fn cards(ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|&r| Card::new(r, Suit::Spades)).collect()
    }

    #[test]
    fn soft_flag_follows_ace_reduction() {
        assert!(is_soft(&cards(&[Rank::Ace, Rank::Six])));
        assert!(!is_soft(&cards(&[Rank::Ace, Rank::Six, Rank::Nine])));
        assert!(is_soft(&cards(&[Rank::Ace, Rank::Ace])));
        assert!(!is_soft(&cards(&[Rank::King, Rank::Seven])));
    }

    #[test]
    fn two_aces_count_twelve() {
        assert_eq!(score(&cards(&[Rank::Ace, Rank::Ace])), 12);
    }

    #[test]
    fn empty_hand_scores_zero() {
        assert_eq!(score(&[]), 0);
        assert!(!is_blackjack(&[]));
    }
}
