use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::blackjack::dealer::{create_deck, dealer_draw_one};
use crate::blackjack::rules::{BlackjackResult, BlackjackRules};
use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::Hand;
use crate::engine::{ensure_stake_covered, settle, validate_stake, EngineError, RandomSource, Settlement};

/// Фаза раунда блэкджека.
///
/// betting -> playing -> dealer_turn -> finished,
/// из finished обратно в betting только через `reset`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BlackjackPhase {
    Betting,
    Playing,
    DealerTurn,
    Finished,
}

/// Итог завершённого раунда.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlackjackSummary {
    pub result: BlackjackResult,
    pub player_score: u32,
    pub dealer_score: u32,
    pub settlement: Settlement,
}

/// Статус раунда для внешнего кода.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlackjackStatus {
    Ongoing(BlackjackPhase),
    Finished(BlackjackSummary),
}

impl BlackjackStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, BlackjackStatus::Finished(_))
    }

    pub fn summary(&self) -> Option<&BlackjackSummary> {
        match self {
            BlackjackStatus::Finished(s) => Some(s),
            BlackjackStatus::Ongoing(_) => None,
        }
    }
}

/// Один раунд блэкджека: своя колода, руки, ставка.
///
/// Баланс раунд не хранит. Клиент:
/// - списывает `stake` перед `deal` и ещё раз `stake` перед `double_down`;
/// - зачисляет `settlement.balance_delta` после завершения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlackjackRound {
    rules: BlackjackRules,
    phase: BlackjackPhase,
    deck: Deck,
    player: Hand,
    dealer: Hand,
    stake: Chips,
    doubled: bool,
    summary: Option<BlackjackSummary>,
}

impl BlackjackRound {
    pub fn new(rules: BlackjackRules) -> Self {
        Self {
            rules,
            phase: BlackjackPhase::Betting,
            deck: Deck::from_cards(Vec::new()),
            player: Hand::new(),
            dealer: Hand::new(),
            stake: Chips::ZERO,
            doubled: false,
            summary: None,
        }
    }

    pub fn rules(&self) -> &BlackjackRules {
        &self.rules
    }

    pub fn phase(&self) -> BlackjackPhase {
        self.phase
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    /// Текущая ставка (после double down — удвоенная).
    pub fn stake(&self) -> Chips {
        self.stake
    }

    pub fn is_doubled(&self) -> bool {
        self.doubled
    }

    pub fn cards_left(&self) -> usize {
        self.deck.len()
    }

    pub fn summary(&self) -> Option<&BlackjackSummary> {
        self.summary.as_ref()
    }

    // ---------------------------------------------------------------------
    // Предикаты допустимости действий (для блокировки кнопок в UI)
    // ---------------------------------------------------------------------

    pub fn can_deal(&self) -> bool {
        self.phase == BlackjackPhase::Betting
    }

    pub fn can_hit(&self) -> bool {
        self.phase == BlackjackPhase::Playing
    }

    pub fn can_stand(&self) -> bool {
        self.phase == BlackjackPhase::Playing
    }

    /// `balance` — баланс клиента ПОСЛЕ списания исходной ставки.
    pub fn can_double_down(&self, balance: Chips) -> bool {
        self.rules.allow_double_down
            && self.phase == BlackjackPhase::Playing
            && self.player.len() == 2
            && balance >= self.stake
    }

    pub fn can_reset(&self) -> bool {
        self.phase == BlackjackPhase::Finished
    }

    // ---------------------------------------------------------------------
    // Переходы
    // ---------------------------------------------------------------------

    /// Раздача со свежей перемешанной колодой.
    pub fn deal<R: RandomSource>(
        &mut self,
        stake: Chips,
        balance: Chips,
        rng: &mut R,
    ) -> Result<BlackjackStatus, EngineError> {
        self.ensure_can_deal()?;
        validate_stake(stake, balance)?;
        self.deal_from(stake, balance, create_deck(rng))
    }

    /// Раздача из заданной колоды (тесты, реплей).
    ///
    /// Порядок: игрок, игрок, дилер, дилер. Если у кого-то натуральный
    /// блэкджек, раунд сразу завершается.
    pub fn deal_from(
        &mut self,
        stake: Chips,
        balance: Chips,
        deck: Deck,
    ) -> Result<BlackjackStatus, EngineError> {
        self.ensure_can_deal()?;
        validate_stake(stake, balance)?;
        if deck.len() < 4 {
            return Err(EngineError::DeckExhausted);
        }

        self.deck = deck;
        self.stake = stake;
        self.doubled = false;
        self.summary = None;
        self.player = Hand::from_cards(self.deck.draw_n(2));
        self.dealer = Hand::from_cards(self.deck.draw_n(2));
        self.phase = BlackjackPhase::Playing;

        debug!(
            stake = stake.0,
            player = %format_cards(&self.player.cards),
            dealer_up = %format_cards(&self.dealer.cards[..1]),
            "blackjack hand dealt"
        );

        let result = match (self.player.is_blackjack(), self.dealer.is_blackjack()) {
            (true, true) => Some(BlackjackResult::Push),
            (true, false) => Some(BlackjackResult::Blackjack),
            (false, true) => Some(BlackjackResult::Lose),
            (false, false) => None,
        };

        Ok(match result {
            Some(r) => self.finish(r),
            None => BlackjackStatus::Ongoing(self.phase),
        })
    }

    /// Игрок берёт карту. Перебор — сразу проигрыш.
    pub fn hit(&mut self) -> Result<BlackjackStatus, EngineError> {
        if !self.can_hit() {
            return Err(EngineError::illegal("hit", "игрок сейчас не ходит"));
        }
        let card = self.deck.draw_one().ok_or(EngineError::DeckExhausted)?;
        self.player.push(card);

        if self.player.is_bust() {
            return Ok(self.finish(BlackjackResult::Lose));
        }
        Ok(BlackjackStatus::Ongoing(self.phase))
    }

    /// Игрок останавливается, ход переходит к дилеру.
    pub fn stand(&mut self) -> Result<BlackjackStatus, EngineError> {
        if !self.can_stand() {
            return Err(EngineError::illegal("stand", "игрок сейчас не ходит"));
        }
        self.phase = BlackjackPhase::DealerTurn;
        Ok(BlackjackStatus::Ongoing(self.phase))
    }

    /// Удвоение: ставка x2, ровно одна карта, затем ход дилера.
    ///
    /// `balance` — баланс клиента после списания исходной ставки;
    /// на нём должна остаться ещё одна такая же ставка.
    pub fn double_down(&mut self, balance: Chips) -> Result<BlackjackStatus, EngineError> {
        if self.phase != BlackjackPhase::Playing {
            return Err(EngineError::illegal("double_down", "игрок сейчас не ходит"));
        }
        if !self.rules.allow_double_down {
            return Err(EngineError::illegal("double_down", "удвоение запрещено правилами стола"));
        }
        if self.player.len() != 2 {
            return Err(EngineError::illegal(
                "double_down",
                "удвоение возможно только на первых двух картах",
            ));
        }
        if ensure_stake_covered(self.stake, balance).is_err() {
            return Err(EngineError::illegal("double_down", "недостаточно средств для удвоения"));
        }
        let card = self.deck.draw_one().ok_or(EngineError::DeckExhausted)?;

        self.stake = self.stake.times(2);
        self.doubled = true;
        self.player.push(card);

        if self.player.is_bust() {
            return Ok(self.finish(BlackjackResult::Lose));
        }
        self.phase = BlackjackPhase::DealerTurn;
        Ok(BlackjackStatus::Ongoing(self.phase))
    }

    /// Нужно ли дилеру брать ещё карту (false вне хода дилера).
    pub fn dealer_should_draw(&self) -> bool {
        self.phase == BlackjackPhase::DealerTurn && self.rules.dealer_should_draw(&self.dealer)
    }

    /// Один шаг дилера: либо одна карта, либо сравнение и завершение раунда.
    pub fn dealer_step(&mut self) -> Result<BlackjackStatus, EngineError> {
        if self.phase != BlackjackPhase::DealerTurn {
            return Err(EngineError::illegal("dealer_step", "сейчас не ход дилера"));
        }

        if self.dealer_should_draw() {
            let card = dealer_draw_one(&mut self.deck, &mut self.dealer)?;
            debug!(card = %card, dealer_score = self.dealer.score(), "dealer draws");
            return Ok(BlackjackStatus::Ongoing(self.phase));
        }

        let result = compare_hands(&self.player, &self.dealer);
        Ok(self.finish(result))
    }

    /// Доиграть за дилера до конца без пауз.
    pub fn play_dealer(&mut self) -> Result<BlackjackSummary, EngineError> {
        loop {
            if let BlackjackStatus::Finished(summary) = self.dealer_step()? {
                return Ok(summary);
            }
        }
    }

    /// Вернуться к приёму ставки. Только из finished.
    pub fn reset(&mut self) -> Result<(), EngineError> {
        if !self.can_reset() {
            return Err(EngineError::illegal("reset", "раунд ещё не завершён"));
        }
        *self = Self::new(self.rules.clone());
        Ok(())
    }

    fn ensure_can_deal(&self) -> Result<(), EngineError> {
        if !self.can_deal() {
            return Err(EngineError::illegal("deal", "раунд уже идёт"));
        }
        Ok(())
    }

    fn finish(&mut self, result: BlackjackResult) -> BlackjackStatus {
        let gross = result.gross_return(self.stake, &self.rules);
        let summary = BlackjackSummary {
            result,
            player_score: self.player.score(),
            dealer_score: self.dealer.score(),
            settlement: settle(self.stake, gross),
        };

        self.phase = BlackjackPhase::Finished;
        self.summary = Some(summary);

        info!(
            ?result,
            player_score = summary.player_score,
            dealer_score = summary.dealer_score,
            stake = self.stake.0,
            payout = gross.0,
            "blackjack round finished"
        );

        BlackjackStatus::Finished(summary)
    }
}

/// Сравнение рук после хода дилера.
/// Перебор дилера или игрок выше -> win, игрок ниже -> lose, равенство -> push.
pub fn compare_hands(player: &Hand, dealer: &Hand) -> BlackjackResult {
    let p = player.score();
    let d = dealer.score();

    if d > 21 || p > d {
        BlackjackResult::Win
    } else if p < d {
        BlackjackResult::Lose
    } else {
        BlackjackResult::Push
    }
}

fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
