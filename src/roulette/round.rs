use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::chips::Chips;
use crate::engine::{settle, EngineError, RandomSource, Settlement};
use crate::roulette::bets::{BetKind, RouletteBet};
use crate::roulette::wheel::{NumberProperties, RouletteConfig, Wheel};

/// Фаза раунда рулетки.
///
/// idle (ставки копятся) -> spinning (ставки списаны) -> settled (выплата посчитана).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoulettePhase {
    Idle,
    Spinning,
    Settled,
}

/// Выплата по одной ставке.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BetResolution {
    pub bet: RouletteBet,
    pub payout: Chips,
}

/// Итог вращения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouletteOutcome {
    pub winning_number: u8,
    pub properties: NumberProperties,
    pub resolutions: Vec<BetResolution>,
    pub settlement: Settlement,
}

/// Один раунд рулетки: набор ставок и одно вращение.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouletteRound {
    wheel: Wheel,
    phase: RoulettePhase,
    bets: Vec<RouletteBet>,
    outcome: Option<RouletteOutcome>,
}

impl Default for RouletteRound {
    fn default() -> Self {
        Self::new(Wheel::european())
    }
}

impl RouletteRound {
    pub fn new(wheel: Wheel) -> Self {
        Self {
            wheel,
            phase: RoulettePhase::Idle,
            bets: Vec::new(),
            outcome: None,
        }
    }

    pub fn from_config(config: &RouletteConfig) -> Result<Self, EngineError> {
        Ok(Self::new(Wheel::from_config(config)?))
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn phase(&self) -> RoulettePhase {
        self.phase
    }

    pub fn bets(&self) -> &[RouletteBet] {
        &self.bets
    }

    pub fn outcome(&self) -> Option<&RouletteOutcome> {
        self.outcome.as_ref()
    }

    /// Сумма всех ставок раунда.
    pub fn total_stake(&self) -> Chips {
        self.bets.iter().map(|b| b.amount).sum()
    }

    pub fn can_place_bet(&self) -> bool {
        self.phase == RoulettePhase::Idle
    }

    pub fn can_spin(&self) -> bool {
        self.phase == RoulettePhase::Idle && !self.bets.is_empty()
    }

    /// Добавить ставку. Повторная ставка на ту же (тип, значение)
    /// увеличивает сумму существующей, а не создаёт дубликат.
    ///
    /// `balance` — баланс клиента; сумма всех ставок не может его превысить.
    pub fn place_bet(
        &mut self,
        kind: BetKind,
        amount: Chips,
        balance: Chips,
    ) -> Result<RouletteBet, EngineError> {
        if !self.can_place_bet() {
            return Err(EngineError::illegal("place_bet", "колесо уже запущено"));
        }
        if amount.is_zero() {
            return Err(EngineError::ZeroStake);
        }
        kind.validate()?;

        let new_total = self.total_stake() + amount;
        if new_total > balance {
            return Err(EngineError::StakeExceedsBalance {
                stake: new_total,
                balance,
            });
        }

        let bet = match self.bets.iter_mut().find(|b| b.kind == kind) {
            Some(existing) => {
                existing.amount += amount;
                *existing
            }
            None => {
                let bet = RouletteBet::new(kind, amount, self.wheel.odds());
                self.bets.push(bet);
                bet
            }
        };

        debug!(bet_type = kind.type_name(), amount = amount.0, total = new_total.0, "roulette bet placed");
        Ok(bet)
    }

    /// Убрать все ставки. Только до запуска колеса.
    pub fn clear_bets(&mut self) -> Result<(), EngineError> {
        if self.phase != RoulettePhase::Idle {
            return Err(EngineError::illegal("clear_bets", "ставки уже в игре"));
        }
        self.bets.clear();
        Ok(())
    }

    /// Запустить колесо: idle -> spinning. Возвращает сумму, которую
    /// клиент должен списать с баланса.
    pub fn begin_spin(&mut self, balance: Chips) -> Result<Chips, EngineError> {
        if self.phase != RoulettePhase::Idle {
            return Err(EngineError::illegal("spin", "колесо уже запущено"));
        }
        if self.bets.is_empty() {
            return Err(EngineError::illegal("spin", "нет ни одной ставки"));
        }
        let total = self.total_stake();
        if total > balance {
            return Err(EngineError::StakeExceedsBalance {
                stake: total,
                balance,
            });
        }
        self.phase = RoulettePhase::Spinning;
        Ok(total)
    }

    /// Вытянуть номер и рассчитать ставки: spinning -> settled.
    pub fn resolve<R: RandomSource>(&mut self, rng: &mut R) -> Result<RouletteOutcome, EngineError> {
        if self.phase != RoulettePhase::Spinning {
            return Err(EngineError::illegal("resolve", "колесо не запущено"));
        }
        let number = self.wheel.spin(rng);
        self.resolve_with(number)
    }

    /// Рассчитать ставки для заданного номера (тесты, внешний результат).
    pub fn resolve_with(&mut self, winning_number: u8) -> Result<RouletteOutcome, EngineError> {
        if self.phase != RoulettePhase::Spinning {
            return Err(EngineError::illegal("resolve", "колесо не запущено"));
        }
        let properties = self.wheel.classify(winning_number)?;

        let mut resolutions = Vec::with_capacity(self.bets.len());
        for bet in &self.bets {
            let payout = self.wheel.resolve_bet(bet, winning_number)?;
            resolutions.push(BetResolution { bet: *bet, payout });
        }

        let total_payout: Chips = resolutions.iter().map(|r| r.payout).sum();
        let outcome = RouletteOutcome {
            winning_number,
            properties,
            resolutions,
            settlement: settle(self.total_stake(), total_payout),
        };

        info!(
            winning_number,
            color = ?properties.color,
            stake = self.total_stake().0,
            payout = total_payout.0,
            "roulette spin settled"
        );

        self.phase = RoulettePhase::Settled;
        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Запуск и расчёт за один вызов.
    pub fn spin<R: RandomSource>(
        &mut self,
        balance: Chips,
        rng: &mut R,
    ) -> Result<RouletteOutcome, EngineError> {
        self.begin_spin(balance)?;
        self.resolve(rng)
    }

    /// Новый раунд: сбрасывает ставки и результат. Недопустимо во время вращения.
    pub fn reset(&mut self) -> Result<(), EngineError> {
        if self.phase == RoulettePhase::Spinning {
            return Err(EngineError::illegal("reset", "колесо ещё вращается"));
        }
        self.phase = RoulettePhase::Idle;
        self.bets.clear();
        self.outcome = None;
        Ok(())
    }
}
