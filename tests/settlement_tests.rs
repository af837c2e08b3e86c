//! Интеграционные тесты расчёта итогов раунда (crate::engine::settlement).

use casino_engine::domain::chips::Chips;
use casino_engine::domain::round::{GameType, Outcome};
use casino_engine::engine::{settle, settle_with, StakeDeduction};

#[test]
fn win_push_lose_by_profit_sign() {
    let win = settle(Chips(10), Chips(20));
    assert_eq!(win.profit, 10);
    assert_eq!(win.outcome, Outcome::Win);

    let push = settle(Chips(10), Chips(10));
    assert_eq!(push.profit, 0);
    assert_eq!(push.outcome, Outcome::Push);

    let lose = settle(Chips(10), Chips::ZERO);
    assert_eq!(lose.profit, -10);
    assert_eq!(lose.outcome, Outcome::Lose);
}

#[test]
fn partial_return_is_still_a_loss() {
    let s = settle(Chips(30), Chips(20));
    assert_eq!(s.profit, -10);
    assert_eq!(s.outcome, Outcome::Lose);
}

#[test]
fn upfront_deduction_credits_gross_return() {
    let s = settle(Chips(10), Chips(25));
    assert_eq!(s.balance_delta, 25);

    let lose = settle(Chips(10), Chips::ZERO);
    assert_eq!(lose.balance_delta, 0);
}

#[test]
fn deduction_at_settlement_applies_net_profit() {
    let s = settle_with(Chips(10), Chips(25), StakeDeduction::AtSettlement);
    assert_eq!(s.balance_delta, 15);

    let lose = settle_with(Chips(10), Chips::ZERO, StakeDeduction::AtSettlement);
    assert_eq!(lose.balance_delta, -10);
    assert_eq!(StakeDeduction::default(), StakeDeduction::Upfront);
}

#[test]
fn both_conventions_end_on_same_balance() {
    let start = Chips(100);
    let stake = Chips(10);
    let gross = Chips(35);

    let upfront = (start - stake).apply_delta(settle(stake, gross).balance_delta);
    let deferred =
        start.apply_delta(settle_with(stake, gross, StakeDeduction::AtSettlement).balance_delta);

    assert_eq!(upfront, Chips(125));
    assert_eq!(upfront, deferred);
}

#[test]
fn settlement_becomes_history_record() {
    let record = settle(Chips(10), Chips(20)).to_record(7, GameType::Roulette, 1_700_000_000);
    assert_eq!(record.id, 7);
    assert_eq!(record.game_type, GameType::Roulette);
    assert_eq!(record.stake, Chips(10));
    assert_eq!(record.payout, Chips(20));
    assert_eq!(record.profit, 10);
    assert_eq!(record.outcome, Outcome::Win);
    assert_eq!(record.timestamp, 1_700_000_000);
}
