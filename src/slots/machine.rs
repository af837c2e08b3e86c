use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::chips::Chips;
use crate::engine::{settle, validate_stake, EngineError, RandomSource, Settlement};
use crate::slots::paylines::{evaluate, BonusMultiplier, Payline, SpinEvaluation};
use crate::slots::reels::{spin_reels, ReelGrid};
use crate::slots::symbols::SymbolCatalog;

/// Настройки автомата: символы, линии, бонусы.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SlotsConfig {
    pub catalog: SymbolCatalog,
    pub paylines: Vec<Payline>,
    pub bonuses: Vec<BonusMultiplier>,
}

impl Default for SlotsConfig {
    fn default() -> Self {
        Self {
            catalog: SymbolCatalog::classic(),
            paylines: Payline::standard(),
            bonuses: BonusMultiplier::standard(),
        }
    }
}

impl SlotsConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        self.catalog.validate()?;
        if self.paylines.is_empty() {
            return Err(EngineError::InvalidConfig("at least one payline is required".into()));
        }
        for line in &self.paylines {
            line.validate()?;
        }
        for bonus in &self.bonuses {
            if bonus.multiplier == 0 {
                return Err(EngineError::InvalidConfig(format!(
                    "bonus multiplier for {} must be non-zero",
                    bonus.symbol
                )));
            }
            if self.catalog.find(&bonus.symbol).is_none() {
                return Err(EngineError::InvalidConfig(format!(
                    "bonus symbol {} is not in the catalog",
                    bonus.symbol
                )));
            }
        }
        Ok(())
    }
}

/// Результат одного вращения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotSpin {
    pub grid: ReelGrid,
    pub evaluation: SpinEvaluation,
    pub settlement: Settlement,
}

/// Слот-автомат 3x3. Состояния между вращениями не держит:
/// ставка списывается клиентом, выигрыш зачисляется по `settlement`.
/// Разбирается из `SlotsConfig` только через `validate`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(try_from = "SlotsConfig", into = "SlotsConfig")]
pub struct SlotMachine {
    config: SlotsConfig,
}

impl SlotMachine {
    pub fn from_config(config: SlotsConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SlotsConfig {
        &self.config
    }

    pub fn catalog(&self) -> &SymbolCatalog {
        &self.config.catalog
    }

    /// Вращение с проверкой ставки.
    pub fn spin<R: RandomSource>(
        &self,
        stake: Chips,
        balance: Chips,
        rng: &mut R,
    ) -> Result<SlotSpin, EngineError> {
        validate_stake(stake, balance)?;

        let grid = spin_reels(&self.config.catalog, rng);
        let evaluation = self.evaluate(&grid, stake);
        let settlement = settle(stake, evaluation.total_win);

        info!(
            stake = stake.0,
            lines = evaluation.winning_lines.len(),
            multiplier = evaluation.multiplier,
            win = evaluation.total_win.0,
            "slots spin settled"
        );

        Ok(SlotSpin {
            grid,
            evaluation,
            settlement,
        })
    }

    /// Проверка готовой сетки (тесты, реплей).
    pub fn evaluate(&self, grid: &ReelGrid, stake: Chips) -> SpinEvaluation {
        evaluate(
            grid,
            stake,
            &self.config.catalog,
            &self.config.paylines,
            &self.config.bonuses,
        )
    }
}

impl TryFrom<SlotsConfig> for SlotMachine {
    type Error = EngineError;

    fn try_from(config: SlotsConfig) -> Result<Self, Self::Error> {
        SlotMachine::from_config(config)
    }
}

impl From<SlotMachine> for SlotsConfig {
    fn from(machine: SlotMachine) -> Self {
        machine.config
    }
}

/// Почему автоигра остановилась.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AutoPlayStop {
    Completed,
    Stopped,
    InsufficientBalance,
}

/// Серия вращений с фиксированной ставкой.
///
/// Каждый шаг — обычный `SlotMachine::spin`; автоигра только считает
/// оставшиеся вращения и останавливается, когда баланса не хватает.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AutoPlay {
    stake: Chips,
    remaining: u32,
    stopped: Option<AutoPlayStop>,
}

impl AutoPlay {
    pub fn start(count: u32, stake: Chips) -> Result<Self, EngineError> {
        if stake.is_zero() {
            return Err(EngineError::ZeroStake);
        }
        if count == 0 {
            return Err(EngineError::illegal("auto_play", "нужно хотя бы одно вращение"));
        }
        debug!(count, stake = stake.0, "auto play started");
        Ok(Self {
            stake,
            remaining: count,
            stopped: None,
        })
    }

    pub fn stake(&self) -> Chips {
        self.stake
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.stopped.is_none()
    }

    pub fn stop_reason(&self) -> Option<AutoPlayStop> {
        self.stopped
    }

    /// Остановка по запросу игрока.
    pub fn stop(&mut self) {
        if self.stopped.is_none() {
            self.stopped = Some(AutoPlayStop::Stopped);
        }
    }

    /// Следующее вращение серии. `Ok(None)` — серия закончилась.
    pub fn next_spin<R: RandomSource>(
        &mut self,
        machine: &SlotMachine,
        balance: Chips,
        rng: &mut R,
    ) -> Result<Option<SlotSpin>, EngineError> {
        if !self.is_active() {
            return Ok(None);
        }
        if self.remaining == 0 {
            self.stopped = Some(AutoPlayStop::Completed);
            return Ok(None);
        }
        if self.stake > balance {
            self.stopped = Some(AutoPlayStop::InsufficientBalance);
            info!(remaining = self.remaining, "auto play stopped: balance too low");
            return Ok(None);
        }

        let spin = machine.spin(self.stake, balance, rng)?;
        self.remaining -= 1;
        if self.remaining == 0 {
            self.stopped = Some(AutoPlayStop::Completed);
        }
        Ok(Some(spin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::rng::ScriptedRng;

    #[test]
    fn config_rejects_unknown_bonus_symbol() {
        let mut config = SlotsConfig::default();
        config.bonuses.push(BonusMultiplier {
            symbol: "🍀".into(),
            multiplier: 3,
        });
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn auto_play_stops_when_balance_runs_out() {
        let machine = SlotMachine::default();
        let mut rng = ScriptedRng::new(vec![0.5]);
        let mut auto = AutoPlay::start(3, Chips(10)).unwrap();

        assert!(auto.next_spin(&machine, Chips(15), &mut rng).unwrap().is_some());
        assert_eq!(auto.remaining(), 2);

        assert!(auto.next_spin(&machine, Chips(5), &mut rng).unwrap().is_none());
        assert_eq!(auto.stop_reason(), Some(AutoPlayStop::InsufficientBalance));
    }

    #[test]
    fn auto_play_completes_after_count() {
        let machine = SlotMachine::default();
        let mut rng = ScriptedRng::new(vec![0.1, 0.6, 0.9]);
        let mut auto = AutoPlay::start(2, Chips(1)).unwrap();

        let mut spins = 0;
        while let Some(_) = auto.next_spin(&machine, Chips(100), &mut rng).unwrap() {
            spins += 1;
        }
        assert_eq!(spins, 2);
        assert_eq!(auto.stop_reason(), Some(AutoPlayStop::Completed));
    }

    #[test]
    fn restored_auto_play_with_nothing_left_completes() {
        let mut auto: AutoPlay =
            serde_json::from_str(r#"{"stake":10,"remaining":0,"stopped":null}"#).unwrap();
        let mut rng = ScriptedRng::new(vec![0.5]);

        assert!(auto.next_spin(&SlotMachine::default(), Chips(100), &mut rng).unwrap().is_none());
        assert_eq!(auto.stop_reason(), Some(AutoPlayStop::Completed));
        assert_eq!(rng.draws(), 0);
    }
}
