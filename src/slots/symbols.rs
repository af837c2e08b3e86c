use serde::{Deserialize, Serialize};

use crate::engine::EngineError;

/// Индекс символа в каталоге.
pub type SymbolId = usize;

/// Символ барабана.
///
/// `frequency` — относительный вес, а не вероятность:
/// вероятность = frequency / сумма весов каталога.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotSymbol {
    pub name: String,
    /// Множитель ставки за линию из трёх таких символов.
    pub value: u64,
    pub frequency: u32,
}

impl SlotSymbol {
    pub fn new(name: impl Into<String>, value: u64, frequency: u32) -> Self {
        Self {
            name: name.into(),
            value,
            frequency,
        }
    }
}

/// Каталог символов. Статическая конфигурация, порядок важен для розыгрыша.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SymbolCatalog {
    symbols: Vec<SlotSymbol>,
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        Self::classic()
    }
}

impl SymbolCatalog {
    /// Восемь символов заведения: от частой вишни до редкой короны.
    pub fn classic() -> Self {
        Self {
            symbols: vec![
                SlotSymbol::new("🍒", 3, 25),
                SlotSymbol::new("🍋", 4, 20),
                SlotSymbol::new("🍊", 5, 18),
                SlotSymbol::new("🍇", 8, 15),
                SlotSymbol::new("🔔", 12, 10),
                SlotSymbol::new("⭐", 15, 8),
                SlotSymbol::new("💎", 25, 3),
                SlotSymbol::new("👑", 50, 1),
            ],
        }
    }

    pub fn new(symbols: Vec<SlotSymbol>) -> Result<Self, EngineError> {
        let catalog = Self { symbols };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.symbols.is_empty() {
            return Err(EngineError::InvalidConfig("symbol catalog is empty".into()));
        }
        if self.total_weight() == 0 {
            return Err(EngineError::InvalidConfig(
                "symbol frequencies sum to zero".into(),
            ));
        }
        for (i, s) in self.symbols.iter().enumerate() {
            if self.symbols[..i].iter().any(|other| other.name == s.name) {
                return Err(EngineError::InvalidConfig(format!(
                    "symbol {} listed twice",
                    s.name
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn get(&self, id: SymbolId) -> Option<&SlotSymbol> {
        self.symbols.get(id)
    }

    pub fn symbols(&self) -> &[SlotSymbol] {
        &self.symbols
    }

    /// Найти символ по имени.
    pub fn find(&self, name: &str) -> Option<SymbolId> {
        self.symbols.iter().position(|s| s.name == name)
    }

    /// Сумма весов — пространство розыгрыша.
    pub fn total_weight(&self) -> u64 {
        self.symbols.iter().map(|s| s.frequency as u64).sum()
    }

    /// Вероятность выпадения символа на одной ячейке.
    pub fn probability(&self, id: SymbolId) -> f64 {
        let total = self.total_weight();
        match self.get(id) {
            Some(s) if total > 0 => s.frequency as f64 / total as f64,
            _ => 0.0,
        }
    }

    /// Из двух символов выбрать более "высокий" по редкости:
    /// меньше вес, при равенстве — больше множитель.
    pub fn rarer_of(&self, a: SymbolId, b: SymbolId) -> SymbolId {
        let (sa, sb) = match (self.get(a), self.get(b)) {
            (Some(sa), Some(sb)) => (sa, sb),
            (Some(_), None) => return a,
            _ => return b,
        };
        match sa.frequency.cmp(&sb.frequency) {
            std::cmp::Ordering::Less => a,
            std::cmp::Ordering::Greater => b,
            std::cmp::Ordering::Equal => {
                if sb.value > sa.value {
                    b
                } else {
                    a
                }
            }
        }
    }
}
