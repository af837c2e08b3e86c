//! Интеграционные тесты блэкджека: подсчёт очков, раздача,
//! действия игрока, ход дилера, выплаты.

use casino_engine::blackjack::*;
use casino_engine::domain::*;
use casino_engine::engine::EngineError;
use casino_engine::eval;
use casino_engine::infra::DeterministicRng;
use proptest::prelude::*;

fn c(s: &str) -> Card {
    s.parse().unwrap()
}

fn cards(list: &[&str]) -> Vec<Card> {
    list.iter().map(|s| c(s)).collect()
}

/// Раунд, сданный из колоды в порядке: игрок, игрок, дилер, дилер, добор...
fn dealt(order: &[&str], stake: u64, balance: u64) -> (BlackjackRound, BlackjackStatus) {
    let mut round = BlackjackRound::new(BlackjackRules::default());
    let status = round
        .deal_from(Chips(stake), Chips(balance), Deck::stacked(&cards(order)))
        .unwrap();
    (round, status)
}

//
// Подсчёт очков
//

#[test]
fn aces_are_reduced_one_at_a_time() {
    assert_eq!(eval::score(&cards(&["Ah", "Ad", "9c"])), 21);
    assert_eq!(eval::score(&cards(&["Ah", "Ad", "Ac", "9s"])), 12);
    assert_eq!(eval::score(&cards(&["Ah", "Ad"])), 12);
    assert_eq!(eval::score(&[]), 0);
}

#[test]
fn three_card_twenty_one_is_not_blackjack() {
    let hand = cards(&["7h", "7d", "7c"]);
    assert_eq!(eval::score(&hand), 21);
    assert!(!eval::is_blackjack(&hand));
    assert!(eval::is_blackjack(&cards(&["Ah", "Kd"])));
    assert!(eval::is_blackjack(&cards(&["Qs", "Ac"])));
}

#[test]
fn bust_is_smallest_possible_total() {
    let hand = cards(&["Kh", "Qd", "Ac", "5s"]);
    assert_eq!(eval::score(&hand), 26);
    assert!(eval::is_bust(&hand));
}

//
// Раздача и натуральные блэкджеки
//

#[test]
fn player_natural_pays_three_to_two() {
    let (round, status) = dealt(&["Ah", "Kd", "9c", "7s"], 10, 100);

    let summary = status.summary().copied().unwrap();
    assert_eq!(summary.result, BlackjackResult::Blackjack);
    assert_eq!(summary.settlement.gross_return, Chips(25));
    assert_eq!(summary.settlement.profit, 15);
    assert_eq!(summary.settlement.balance_delta, 25);
    assert_eq!(summary.settlement.outcome, Outcome::Win);
    assert_eq!(round.phase(), BlackjackPhase::Finished);
}

#[test]
fn natural_payout_rounds_down() {
    let (_, status) = dealt(&["Ah", "Kd", "9c", "7s"], 5, 100);
    assert_eq!(status.summary().unwrap().settlement.gross_return, Chips(12));
}

#[test]
fn both_naturals_push() {
    let (_, status) = dealt(&["Ah", "Kd", "As", "Qc"], 10, 100);
    let summary = status.summary().unwrap();
    assert_eq!(summary.result, BlackjackResult::Push);
    assert_eq!(summary.settlement.gross_return, Chips(10));
    assert_eq!(summary.settlement.outcome, Outcome::Push);
}

#[test]
fn dealer_natural_ends_round_immediately() {
    let (round, status) = dealt(&["Th", "9d", "As", "Kc"], 10, 100);
    let summary = status.summary().unwrap();
    assert_eq!(summary.result, BlackjackResult::Lose);
    assert_eq!(summary.settlement.gross_return, Chips::ZERO);
    assert!(!round.can_hit());
}

#[test]
fn deal_order_is_player_player_dealer_dealer() {
    let (round, status) = dealt(&["2h", "3d", "4c", "5s", "6h"], 10, 100);
    assert_eq!(status, BlackjackStatus::Ongoing(BlackjackPhase::Playing));
    assert_eq!(round.player_hand().cards, cards(&["2h", "3d"]));
    assert_eq!(round.dealer_hand().cards, cards(&["4c", "5s"]));
    assert_eq!(round.cards_left(), 1);
}

#[test]
fn shuffled_deal_uses_fresh_deck() {
    let mut round = BlackjackRound::new(BlackjackRules::default());
    let mut rng = DeterministicRng::from_seed(2024);
    round.deal(Chips(10), Chips(100), &mut rng).unwrap();

    assert_eq!(round.player_hand().len(), 2);
    assert_eq!(round.dealer_hand().len(), 2);
    assert_eq!(round.cards_left(), 48);
}

//
// Ошибки ставок и недопустимые действия
//

#[test]
fn invalid_stakes_are_rejected_before_dealing() {
    let mut round = BlackjackRound::new(BlackjackRules::default());
    let mut rng = DeterministicRng::from_seed(1);

    let err = round.deal(Chips::ZERO, Chips(100), &mut rng).unwrap_err();
    assert_eq!(err, EngineError::ZeroStake);
    assert!(err.is_invalid_stake());

    let err = round.deal(Chips(101), Chips(100), &mut rng).unwrap_err();
    assert_eq!(
        err,
        EngineError::StakeExceedsBalance {
            stake: Chips(101),
            balance: Chips(100)
        }
    );
    assert_eq!(round.phase(), BlackjackPhase::Betting);
    assert!(round.player_hand().is_empty());
}

#[test]
fn actions_outside_their_phase_are_illegal() {
    let mut round = BlackjackRound::new(BlackjackRules::default());
    assert!(round.hit().unwrap_err().is_illegal_action());
    assert!(round.stand().unwrap_err().is_illegal_action());
    assert!(round.dealer_step().unwrap_err().is_illegal_action());
    assert!(round.reset().unwrap_err().is_illegal_action());

    let (mut round, _) = dealt(&["Th", "6d", "9c", "7s", "2h"], 10, 100);
    let err = round
        .deal_from(Chips(10), Chips(100), Deck::standard_52())
        .unwrap_err();
    assert!(err.is_illegal_action());
    assert!(round.reset().unwrap_err().is_illegal_action());
    assert!(round.dealer_step().unwrap_err().is_illegal_action());
}

#[test]
fn too_short_deck_is_rejected() {
    let mut round = BlackjackRound::new(BlackjackRules::default());
    let err = round
        .deal_from(Chips(10), Chips(100), Deck::stacked(&cards(&["Ah", "Kd", "9c"])))
        .unwrap_err();
    assert_eq!(err, EngineError::DeckExhausted);
    assert_eq!(round.phase(), BlackjackPhase::Betting);
}

//
// Действия игрока
//

#[test]
fn hit_to_bust_loses_at_once() {
    let (mut round, _) = dealt(&["Th", "6d", "9c", "8s", "Kh"], 10, 100);
    let status = round.hit().unwrap();
    let summary = status.summary().unwrap();

    assert_eq!(summary.result, BlackjackResult::Lose);
    assert_eq!(summary.player_score, 26);
    assert_eq!(summary.settlement.profit, -10);
    assert_eq!(summary.settlement.outcome, Outcome::Lose);
    assert_eq!(round.dealer_hand().len(), 2, "dealer does not play after a bust");
}

#[test]
fn hitting_to_twenty_one_does_not_auto_stand() {
    let (mut round, _) = dealt(&["Th", "5d", "9c", "8s", "6h"], 10, 100);
    let status = round.hit().unwrap();
    assert_eq!(status, BlackjackStatus::Ongoing(BlackjackPhase::Playing));
    assert_eq!(round.player_hand().score(), 21);
    assert!(round.can_stand());
}

#[test]
fn stand_then_dealer_stands_on_seventeen() {
    let (mut round, _) = dealt(&["Th", "6d", "Tc", "7s", "2h"], 10, 100);
    assert_eq!(round.stand().unwrap(), BlackjackStatus::Ongoing(BlackjackPhase::DealerTurn));
    assert!(!round.dealer_should_draw());

    let status = round.dealer_step().unwrap();
    let summary = status.summary().unwrap();
    assert_eq!(summary.result, BlackjackResult::Lose);
    assert_eq!(summary.dealer_score, 17);
    assert_eq!(round.dealer_hand().len(), 2);
}

#[test]
fn dealer_draws_step_by_step_until_seventeen() {
    let (mut round, _) = dealt(&["Th", "9d", "6c", "5s", "2h", "4d", "Kc"], 10, 100);
    round.stand().unwrap();

    assert!(round.dealer_should_draw());
    assert!(!round.dealer_step().unwrap().is_finished());
    assert_eq!(round.dealer_hand().score(), 13);

    assert!(!round.dealer_step().unwrap().is_finished());
    assert_eq!(round.dealer_hand().score(), 17);

    let summary = *round.dealer_step().unwrap().summary().unwrap();
    assert_eq!(summary.result, BlackjackResult::Win);
    assert_eq!(summary.settlement.gross_return, Chips(20));
    assert_eq!(round.cards_left(), 1);
}

#[test]
fn soft_seventeen_stands() {
    let (mut round, _) = dealt(&["Th", "8d", "Ac", "6s", "5h"], 10, 100);
    round.stand().unwrap();
    let summary = round.play_dealer().unwrap();
    assert_eq!(summary.dealer_score, 17);
    assert_eq!(summary.result, BlackjackResult::Win);
}

#[test]
fn step_wise_dealer_helpers_follow_house_rule() {
    let mut deck = Deck::stacked(&cards(&["Ah", "9s"]));
    let mut hand = Hand::from_cards(cards(&["Th", "6c"]));

    assert!(dealer_should_draw(&hand));
    assert_eq!(dealer_draw_one(&mut deck, &mut hand).unwrap(), c("Ah"));
    assert_eq!(hand.score(), 17);
    assert!(!dealer_should_draw(&hand));
    assert_eq!(deck.len(), 1);

    let soft = Hand::from_cards(cards(&["Ad", "6s"]));
    assert!(soft.is_soft());
    assert!(!dealer_should_draw(&soft));

    let mut empty = Deck::from_cards(Vec::new());
    assert_eq!(
        dealer_draw_one(&mut empty, &mut hand).unwrap_err(),
        EngineError::DeckExhausted
    );
}

#[test]
fn dealer_bust_pays_player() {
    let (mut round, _) = dealt(&["Th", "2d", "Tc", "6s", "Kh"], 10, 100);
    round.stand().unwrap();
    let summary = round.play_dealer().unwrap();
    assert_eq!(summary.dealer_score, 26);
    assert_eq!(summary.result, BlackjackResult::Win);
    assert_eq!(summary.settlement.profit, 10);
}

#[test]
fn equal_totals_push() {
    let (mut round, _) = dealt(&["Th", "8d", "Tc", "8s"], 10, 100);
    round.stand().unwrap();
    let summary = round.play_dealer().unwrap();
    assert_eq!(summary.result, BlackjackResult::Push);
    assert_eq!(summary.settlement.balance_delta, 10);
    assert_eq!(summary.settlement.profit, 0);
}

//
// Удвоение
//

#[test]
fn double_down_doubles_stake_and_takes_one_card() {
    let (mut round, _) = dealt(&["5h", "6d", "Tc", "7s", "Th", "2c"], 10, 100);
    assert!(round.can_double_down(Chips(90)));

    let status = round.double_down(Chips(90)).unwrap();
    assert_eq!(status, BlackjackStatus::Ongoing(BlackjackPhase::DealerTurn));
    assert_eq!(round.stake(), Chips(20));
    assert!(round.is_doubled());
    assert_eq!(round.player_hand().score(), 21);

    let summary = round.play_dealer().unwrap();
    assert_eq!(summary.result, BlackjackResult::Win);
    assert_eq!(summary.settlement.stake, Chips(20));
    assert_eq!(summary.settlement.gross_return, Chips(40));
}

#[test]
fn double_down_needs_second_stake_on_balance() {
    let (mut round, _) = dealt(&["5h", "6d", "Tc", "7s", "Th"], 10, 15);
    assert!(!round.can_double_down(Chips(5)));

    let err = round.double_down(Chips(5)).unwrap_err();
    assert!(err.is_illegal_action());
    assert_eq!(round.stake(), Chips(10));
    assert_eq!(round.player_hand().len(), 2);
    assert_eq!(round.phase(), BlackjackPhase::Playing);
}

#[test]
fn double_down_only_on_first_two_cards() {
    let (mut round, _) = dealt(&["2h", "3d", "Tc", "7s", "4h", "9c"], 10, 100);
    round.hit().unwrap();
    assert!(!round.can_double_down(Chips(90)));
    assert!(round.double_down(Chips(90)).unwrap_err().is_illegal_action());
}

#[test]
fn double_down_disabled_by_rules() {
    let rules = BlackjackRules {
        allow_double_down: false,
        ..BlackjackRules::default()
    };
    let mut round = BlackjackRound::new(rules);
    round
        .deal_from(Chips(10), Chips(100), Deck::stacked(&cards(&["5h", "6d", "Tc", "7s", "Th"])))
        .unwrap();
    assert!(round.double_down(Chips(90)).unwrap_err().is_illegal_action());
}

#[test]
fn double_down_bust_loses_doubled_stake() {
    let (mut round, _) = dealt(&["Th", "6d", "Tc", "7s", "Kh"], 10, 100);
    let summary = *round.double_down(Chips(90)).unwrap().summary().unwrap();
    assert_eq!(summary.result, BlackjackResult::Lose);
    assert_eq!(summary.settlement.profit, -20);
}

//
// Сброс
//

#[test]
fn reset_returns_to_betting() {
    let (mut round, _) = dealt(&["Ah", "Kd", "9c", "7s"], 10, 100);
    assert!(round.can_reset());
    round.reset().unwrap();

    assert_eq!(round.phase(), BlackjackPhase::Betting);
    assert!(round.player_hand().is_empty());
    assert!(round.dealer_hand().is_empty());
    assert_eq!(round.stake(), Chips::ZERO);
    assert!(round.summary().is_none());
    assert!(round.can_deal());
}

#[test]
fn custom_dealer_threshold() {
    let rules = BlackjackRules {
        dealer_stands_on: 16,
        ..BlackjackRules::default()
    };
    let mut round = BlackjackRound::new(rules);
    round
        .deal_from(Chips(10), Chips(100), Deck::stacked(&cards(&["Th", "9d", "Tc", "6s", "5h"])))
        .unwrap();
    round.stand().unwrap();
    let summary = round.play_dealer().unwrap();
    assert_eq!(summary.dealer_score, 16);
    assert_eq!(summary.result, BlackjackResult::Win);
}

//
// Свойства
//

proptest! {
    #[test]
    fn score_is_best_total_not_over_21(indices in prop::collection::vec(0usize..52, 0..8)) {
        let deck = Deck::standard_52();
        let hand: Vec<Card> = indices.iter().map(|&i| deck.cards[i]).collect();

        let hard: u32 = hand
            .iter()
            .map(|c| if c.is_ace() { 1 } else { c.value() as u32 })
            .sum();
        let aces = hand.iter().filter(|c| c.is_ace()).count() as u32;
        let score = eval::score(&hand);

        prop_assert!(score >= hard);
        prop_assert!(score <= hard + 10 * aces);
        prop_assert_eq!((score - hard) % 10, 0);
        if score > 21 {
            prop_assert_eq!(score, hard);
        } else {
            prop_assert!(score + 10 > 21 || score == hard + 10 * aces);
        }
    }

    #[test]
    fn shuffled_deck_is_a_permutation(seed in any::<u64>()) {
        let deck = create_deck(&mut DeterministicRng::from_seed(seed));
        let mut got: Vec<String> = deck.cards.iter().map(|c| c.to_string()).collect();
        let mut expected: Vec<String> =
            Deck::standard_52().cards.iter().map(|c| c.to_string()).collect();
        got.sort();
        expected.sort();
        prop_assert_eq!(got, expected);
    }
}
