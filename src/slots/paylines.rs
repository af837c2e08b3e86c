use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::engine::EngineError;
use crate::slots::reels::{ReelGrid, REELS, ROWS};
use crate::slots::symbols::{SymbolCatalog, SymbolId};

/// Линия выплат: номер строки (1-based) для каждого из трёх барабанов.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Payline(pub [u8; REELS]);

impl Payline {
    pub const TOP: Payline = Payline([1, 1, 1]);
    pub const MIDDLE: Payline = Payline([2, 2, 2]);
    pub const BOTTOM: Payline = Payline([3, 3, 3]);
    pub const DIAGONAL_DOWN: Payline = Payline([1, 2, 3]);
    pub const DIAGONAL_UP: Payline = Payline([3, 2, 1]);

    /// Пять линий заведения: три строки и две диагонали.
    pub fn standard() -> Vec<Payline> {
        vec![
            Payline::TOP,
            Payline::MIDDLE,
            Payline::BOTTOM,
            Payline::DIAGONAL_DOWN,
            Payline::DIAGONAL_UP,
        ]
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.0.iter().any(|&row| row == 0 || row as usize > ROWS) {
            return Err(EngineError::InvalidConfig(format!(
                "payline {:?} has a row outside 1..={ROWS}",
                self.0
            )));
        }
        Ok(())
    }

    /// Три символа линии, слева направо. `None` для линии со строкой
    /// вне 1..=3.
    pub fn symbols(&self, grid: &ReelGrid) -> Option<[SymbolId; REELS]> {
        let mut out = [0; REELS];
        for (reel, &row) in self.0.iter().enumerate() {
            let row = (row as usize).checked_sub(1)?;
            out[reel] = grid.symbol_at(reel, row)?;
        }
        Some(out)
    }
}

/// Бонусный множитель на весь выигрыш раунда, если среди выигравших
/// линий есть этот символ (и он самый редкий из выигравших).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BonusMultiplier {
    pub symbol: String,
    pub multiplier: u64,
}

impl BonusMultiplier {
    /// 💎 удваивает выигрыш, 👑 умножает на пять.
    pub fn standard() -> Vec<BonusMultiplier> {
        vec![
            BonusMultiplier {
                symbol: "💎".into(),
                multiplier: 2,
            },
            BonusMultiplier {
                symbol: "👑".into(),
                multiplier: 5,
            },
        ]
    }
}

/// Результат проверки линий.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpinEvaluation {
    /// Индексы выигравших линий (в порядке конфигурации).
    pub winning_lines: Vec<usize>,
    /// Сумма по линиям до бонуса.
    pub base_win: Chips,
    /// Применённый бонусный множитель (1, если бонуса нет).
    pub multiplier: u64,
    /// Итоговый выигрыш = base_win * multiplier.
    pub total_win: Chips,
    /// Самый редкий символ среди выигравших линий.
    pub triggering_symbol: Option<SymbolId>,
}

impl SpinEvaluation {
    pub fn is_win(&self) -> bool {
        !self.total_win.is_zero()
    }
}

/// Проверка всех линий.
///
/// Линия выигрывает, если три её символа одинаковы, и приносит
/// `value * stake`. Выигрыши линий складываются. Бонусный множитель
/// применяется ОДИН раз ко всей сумме — по самому редкому выигравшему символу.
/// Линии с недопустимыми строками не играют (`SlotsConfig::validate`
/// отсекает их заранее).
pub fn evaluate(
    grid: &ReelGrid,
    stake: Chips,
    catalog: &SymbolCatalog,
    paylines: &[Payline],
    bonuses: &[BonusMultiplier],
) -> SpinEvaluation {
    let mut winning_lines = Vec::new();
    let mut base_win = Chips::ZERO;
    let mut triggering_symbol: Option<SymbolId> = None;

    for (index, line) in paylines.iter().enumerate() {
        let Some([a, b, c]) = line.symbols(grid) else {
            continue;
        };
        if a != b || b != c {
            continue;
        }
        let Some(symbol) = catalog.get(a) else {
            continue;
        };

        winning_lines.push(index);
        base_win += stake.times(symbol.value);
        triggering_symbol = Some(match triggering_symbol {
            Some(current) => catalog.rarer_of(current, a),
            None => a,
        });
    }

    let multiplier = triggering_symbol
        .and_then(|id| catalog.get(id))
        .and_then(|symbol| bonuses.iter().find(|b| b.symbol == symbol.name))
        .map(|b| b.multiplier)
        .unwrap_or(1);

    SpinEvaluation {
        winning_lines,
        base_win,
        multiplier,
        total_win: base_win.times(multiplier),
        triggering_symbol,
    }
}
