//! Интеграционные тесты журнала раундов и статистики сессии.

use casino_engine::domain::chips::Chips;
use casino_engine::domain::round::{GameType, Outcome, RoundRecord};
use casino_engine::engine::settle;
use casino_engine::history::*;
use casino_engine::infra::{IdGenerator, InMemoryRoundLog, RoundLog, DEFAULT_LOG_CAPACITY};

const DAY: u64 = SECONDS_PER_DAY;
/// Полдень некоторого дня.
const NOW: u64 = 20_000 * DAY + DAY / 2;

fn rec(id: u64, game: GameType, stake: u64, payout: u64, ts: u64) -> RoundRecord {
    settle(Chips(stake), Chips(payout)).to_record(id, game, ts)
}

fn sample() -> Vec<RoundRecord> {
    vec![
        rec(1, GameType::Blackjack, 10, 25, NOW - 2 * DAY),
        rec(2, GameType::Roulette, 20, 0, NOW - 2 * DAY + 60),
        rec(3, GameType::Slots, 5, 5, NOW - DAY),
        rec(4, GameType::Slots, 5, 0, NOW - 60),
        rec(5, GameType::Blackjack, 10, 20, NOW),
    ]
}

//
// Журнал
//

#[test]
fn log_keeps_order_and_recent_is_newest_first() {
    let mut log = InMemoryRoundLog::new();
    for r in sample() {
        log.append(r);
    }

    assert_eq!(log.len(), 5);
    let ids: Vec<u64> = log.records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    let recent: Vec<u64> = log.recent(2).iter().map(|r| r.id).collect();
    assert_eq!(recent, vec![5, 4]);

    let slots: Vec<u64> = log.by_game(GameType::Slots).iter().map(|r| r.id).collect();
    assert_eq!(slots, vec![3, 4]);

    log.clear();
    assert!(log.is_empty());
}

#[test]
fn log_evicts_oldest_beyond_capacity() {
    let mut log = InMemoryRoundLog::with_capacity(3);
    for id in 1..=5 {
        log.append(rec(id, GameType::Slots, 1, 0, id));
    }
    let ids: Vec<u64> = log.records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 4, 5]);

    let mut default_log = InMemoryRoundLog::default();
    for id in 0..(DEFAULT_LOG_CAPACITY as u64 + 10) {
        default_log.append(rec(id, GameType::Slots, 1, 0, id));
    }
    assert_eq!(default_log.len(), DEFAULT_LOG_CAPACITY);
    assert_eq!(default_log.records()[0].id, 10);
}

#[test]
fn id_generator_is_monotonic() {
    let ids = IdGenerator::new();
    assert_eq!(ids.next_round_id(), 1);
    assert_eq!(ids.next_round_id(), 2);

    let resumed = IdGenerator::starting_at(41);
    assert_eq!(resumed.next_round_id(), 41);
}

//
// Сводка
//

#[test]
fn empty_history_gives_zeroed_stats() {
    let stats = SessionStats::compute(&[], NOW);
    assert_eq!(stats, SessionStats::default());
    assert_eq!(stats.favourite_game, None);
}

#[test]
fn session_stats_over_sample() {
    let stats = SessionStats::compute(&sample(), NOW);

    assert_eq!(stats.total_games, 5);
    assert_eq!(stats.wins, 2);
    assert_eq!(stats.losses, 2);
    assert_eq!(stats.pushes, 1);
    assert_eq!(stats.total_wagered, Chips(50));
    assert_eq!(stats.total_won, Chips(50));
    assert_eq!(stats.net_profit, 0);
    assert!((stats.win_rate - 40.0).abs() < 1e-9);

    assert_eq!(stats.biggest_win, 15);
    assert_eq!(stats.biggest_loss, -20);
    assert!((stats.average_bet - 10.0).abs() < 1e-9);
    assert!((stats.average_win - 25.0).abs() < 1e-9);

    assert_eq!(stats.games_today, 2);
    assert_eq!(stats.profit_today, 5);
    assert!((stats.average_games_per_day - 5.0 / 3.0).abs() < 1e-9);
}

#[test]
fn favourite_game_ties_go_to_first_game() {
    let stats = SessionStats::compute(&sample(), NOW);
    // blackjack 2, slots 2, roulette 1
    assert_eq!(stats.favourite_game, Some(GameType::Blackjack));

    let mut more_slots = sample();
    more_slots.push(rec(6, GameType::Slots, 1, 0, NOW));
    assert_eq!(
        SessionStats::compute(&more_slots, NOW).favourite_game,
        Some(GameType::Slots)
    );
}

#[test]
fn all_losses_keep_biggest_win_at_zero() {
    let records = vec![
        rec(1, GameType::Roulette, 10, 0, NOW),
        rec(2, GameType::Roulette, 30, 0, NOW),
    ];
    let stats = SessionStats::compute(&records, NOW);
    assert_eq!(stats.biggest_win, 0);
    assert_eq!(stats.biggest_loss, -30);
    assert_eq!(stats.average_win, 0.0);
    assert_eq!(stats.win_rate, 0.0);
}

#[test]
fn single_day_history_divides_by_one() {
    let records = vec![
        rec(1, GameType::Slots, 1, 0, NOW - 10),
        rec(2, GameType::Slots, 1, 0, NOW),
    ];
    let stats = SessionStats::compute(&records, NOW);
    assert_eq!(stats.average_games_per_day, 2.0);
}

#[test]
fn all_wins_are_counted_as_win_outcomes() {
    let records = vec![rec(1, GameType::Blackjack, 10, 20, NOW)];
    assert_eq!(records[0].outcome, Outcome::Win);
    assert_eq!(SessionStats::compute(&records, NOW).win_rate, 100.0);
}

//
// По дням и по играм
//

#[test]
fn daily_stats_oldest_first_with_empty_days() {
    let days = daily_stats(&sample(), NOW, 4);
    assert_eq!(days.len(), 4);

    assert_eq!(days[0].day_start, (NOW / DAY - 3) * DAY);
    assert_eq!(days[0].games, 0);

    assert_eq!(days[1].games, 2);
    assert_eq!(days[1].wagered, Chips(30));
    assert_eq!(days[1].won, Chips(25));
    assert_eq!(days[1].profit, -5);

    assert_eq!(days[2].games, 1);
    assert_eq!(days[2].profit, 0);

    assert_eq!(days[3].games, 2);
    assert_eq!(days[3].profit, 5);
    assert_eq!(days[3].day_start, (NOW / DAY) * DAY);
}

#[test]
fn daily_stats_ignores_records_outside_window() {
    let days = daily_stats(&sample(), NOW, 1);
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].games, 2);
}

#[test]
fn per_game_stats_in_fixed_order() {
    let per_game = per_game_stats(&sample(), NOW);
    let order: Vec<GameType> = per_game.iter().map(|g| g.game_type).collect();
    assert_eq!(order, GameType::ALL.to_vec());

    assert_eq!(per_game[0].stats.total_games, 2);
    assert_eq!(per_game[0].stats.net_profit, 25);
    assert_eq!(per_game[1].stats.total_games, 1);
    assert_eq!(per_game[1].stats.net_profit, -20);
    assert_eq!(per_game[2].stats.total_games, 2);
    assert_eq!(per_game[2].stats.favourite_game, Some(GameType::Slots));
}
