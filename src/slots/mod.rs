//! Слот-автомат: три барабана, окно 3x3, пять линий выплат.
//!
//! - `symbols` – каталог символов с весами и множителями;
//! - `reels` – взвешенный розыгрыш и окно барабанов;
//! - `paylines` – линии, бонусы, подсчёт выигрыша;
//! - `machine` – вращение со ставкой и автоигра.

pub mod machine;
pub mod paylines;
pub mod reels;
pub mod symbols;

pub use machine::{AutoPlay, AutoPlayStop, SlotMachine, SlotSpin, SlotsConfig};
pub use paylines::{evaluate, BonusMultiplier, Payline, SpinEvaluation};
pub use reels::{draw_symbol, spin_reels, ReelGrid, REELS, ROWS};
pub use symbols::{SlotSymbol, SymbolCatalog, SymbolId};
