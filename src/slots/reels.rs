use serde::{Deserialize, Serialize};

use crate::engine::RandomSource;
use crate::slots::symbols::{SymbolCatalog, SymbolId};

/// Количество барабанов.
pub const REELS: usize = 3;
/// Видимых строк на каждом барабане.
pub const ROWS: usize = 3;

/// Видимое окно 3x3: `cells[reel][row]`, строки с 0 сверху.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ReelGrid {
    pub cells: [[SymbolId; ROWS]; REELS],
}

impl ReelGrid {
    pub fn new(cells: [[SymbolId; ROWS]; REELS]) -> Self {
        Self { cells }
    }

    /// Окно из трёх строк, заданных слева направо.
    pub fn from_rows(rows: [[SymbolId; REELS]; ROWS]) -> Self {
        let mut cells = [[0; ROWS]; REELS];
        for (row, line) in rows.iter().enumerate() {
            for (reel, &id) in line.iter().enumerate() {
                cells[reel][row] = id;
            }
        }
        Self { cells }
    }

    /// Символ на барабане `reel` (0-based) в строке `row` (0-based).
    /// `None`, если клетка за пределами окна.
    pub fn symbol_at(&self, reel: usize, row: usize) -> Option<SymbolId> {
        self.cells.get(reel)?.get(row).copied()
    }
}

/// Взвешенный розыгрыш одного символа.
///
/// r = next() * сумма весов; вычитаем веса по порядку каталога,
/// пока r не станет <= 0. Запасной вариант — первый символ
/// (на случай ошибок округления).
pub fn draw_symbol<R: RandomSource>(catalog: &SymbolCatalog, rng: &mut R) -> SymbolId {
    let total = catalog.total_weight();
    let mut r = rng.next_f64() * total as f64;

    for (id, symbol) in catalog.symbols().iter().enumerate() {
        if symbol.frequency == 0 {
            continue;
        }
        r -= symbol.frequency as f64;
        if r <= 0.0 {
            return id;
        }
    }

    0
}

/// Девять независимых розыгрышей: барабан за барабаном, сверху вниз.
pub fn spin_reels<R: RandomSource>(catalog: &SymbolCatalog, rng: &mut R) -> ReelGrid {
    let mut cells = [[0; ROWS]; REELS];
    for reel in cells.iter_mut() {
        for cell in reel.iter_mut() {
            *cell = draw_symbol(catalog, rng);
        }
    }
    ReelGrid { cells }
}
