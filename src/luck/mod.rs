//! Luck-cycle timing and annual fates

pub mod annual;
pub mod cycle;

pub use annual::{annual_fate, annual_fates, AnnualFate};
pub use cycle::{compute_luck_cycle, cycle_direction, DecadePeriod, Direction, LuckCycle};
